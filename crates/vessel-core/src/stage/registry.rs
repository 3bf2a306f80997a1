//! Registro estático y ordenado de la cadena de stages.
//!
//! El registro es estado global de sólo lectura: se construye una vez al
//! arranque (`Lazy`) y no admite mutación posterior. Los componentes del
//! pipeline (runner, cascada, persistencia) iteran sobre él en orden de
//! ordinal en lugar de duplicar la secuencia en cada llamador.

use once_cell::sync::Lazy;

use super::id::{StageId, STAGE_ORDER};
use crate::model::{ArtifactKind, FileFormat};

/// Gate de dominio adicional al default "artifact previo presente".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageGate {
    /// Sin gate extra.
    None,
    /// El inicializador debe traer al menos un punto semilla externo.
    SeedPoints,
    /// La composición exige una disposición local-vs-remota explícita.
    Disposition,
}

/// Entrada inmutable del registro: todo lo que el pipeline necesita saber
/// de un stage sin conocer su algoritmo (que vive en el motor de cómputo).
#[derive(Debug, Clone)]
pub struct StageDescriptor {
    pub id: StageId,
    pub display_name: &'static str,
    /// Sufijo del archivo persistido: `{user}_{fecha}_{suffix}.{ext}`.
    pub suffix: &'static str,
    pub format: FileFormat,
    pub kind: ArtifactKind,
    pub gate: StageGate,
    /// Peso relativo para el reporte de progreso de una corrida multi-stage.
    pub weight: f32,
    /// Versión del algoritmo del stage. Entra al manifiesto persistido y a
    /// la política de recarga por versión.
    pub version: &'static str,
}

impl StageDescriptor {
    pub fn ordinal(&self) -> usize {
        self.id.ordinal()
    }
}

pub struct StageRegistry {
    descriptors: Vec<StageDescriptor>,
}

impl StageRegistry {
    fn build() -> Self {
        let descriptors = STAGE_ORDER.iter().map(|id| descriptor_for(*id)).collect();
        Self { descriptors }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn get(&self, id: StageId) -> &StageDescriptor {
        &self.descriptors[id.ordinal()]
    }

    pub fn by_ordinal(&self, ordinal: usize) -> Option<&StageDescriptor> {
        self.descriptors.get(ordinal)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageDescriptor> {
        self.descriptors.iter()
    }
}

fn descriptor_for(id: StageId) -> StageDescriptor {
    use ArtifactKind as K;
    use FileFormat as F;
    use StageGate as G;
    let (display_name, suffix, format, kind, gate, weight, version) = match id {
        StageId::Initialization => ("Initialization", "init", F::Structured, K::Track, G::SeedPoints, 0.5, "1.0"),
        StageId::LumenSegmentation => ("Lumen segmentation", "lumen", F::MaskVolume, K::Region, G::None, 3.0, "2.1"),
        StageId::Path => ("Path", "path", F::Structured, K::Track, G::None, 1.0, "1.3"),
        StageId::LumenPartition => ("Lumen partition", "lumen_part", F::LabelVolume, K::Partition, G::None, 1.0, "1.1"),
        StageId::Registration => ("Registration", "reg", F::Structured, K::Transform, G::None, 2.0, "1.0"),
        StageId::WallSegmentation => ("Wall segmentation", "wall", F::MaskVolume, K::Region, G::None, 3.0, "2.0"),
        StageId::WallPartition => ("Wall partition", "wall_part", F::LabelVolume, K::Partition, G::None, 1.0, "1.1"),
        StageId::WallThickness => ("Wall thickness", "wall_thk", F::ScalarVolume, K::ValueMap, G::None, 1.5, "1.0"),
        StageId::PerivascularRegion => ("Perivascular region", "peri", F::MaskVolume, K::Region, G::None, 1.0, "1.0"),
        StageId::PerivascularPartition => {
            ("Perivascular partition", "peri_part", F::LabelVolume, K::Partition, G::None, 1.0, "1.0")
        }
        StageId::Composition => ("Composition", "comp", F::ScalarVolume, K::ProbabilityMap, G::Disposition, 4.0, "3.0"),
        StageId::CapThickness => ("Cap thickness", "cap_thk", F::ScalarVolume, K::ValueMap, G::None, 1.0, "1.0"),
        StageId::Readings => ("Readings", "readings", F::Structured, K::Readings, G::None, 0.5, "1.2"),
        StageId::LesionLumenPartition => {
            ("Lesion lumen partition", "lesion_lumen", F::LabelVolume, K::Partition, G::None, 1.0, "1.0")
        }
        StageId::LesionWallPartition => {
            ("Lesion wall partition", "lesion_wall", F::LabelVolume, K::Partition, G::None, 1.0, "1.0")
        }
        StageId::LesionPerivascularPartition => {
            ("Lesion perivascular partition", "lesion_peri", F::LabelVolume, K::Partition, G::None, 1.0, "1.0")
        }
        StageId::LesionReadings => {
            ("Lesion readings", "lesion_readings", F::Structured, K::Readings, G::None, 0.5, "1.2")
        }
    };
    StageDescriptor { id,
                      display_name,
                      suffix,
                      format,
                      kind,
                      gate,
                      weight,
                      version }
}

static REGISTRY: Lazy<StageRegistry> = Lazy::new(StageRegistry::build);

/// Acceso al registro global (construcción perezosa, sin mutación).
pub fn registry() -> &'static StageRegistry {
    &REGISTRY
}
