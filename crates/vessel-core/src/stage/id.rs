use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::STAGE_COUNT;
use crate::errors::PipelineError;

/// Identidad de un stage dentro de la cadena de derivación.
///
/// El orden de declaración fija el orden total: el ordinal de cada variante
/// es su posición en la cadena y el índice de su slot de artifact en el
/// target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StageId {
    Initialization,
    LumenSegmentation,
    Path,
    LumenPartition,
    Registration,
    WallSegmentation,
    WallPartition,
    WallThickness,
    PerivascularRegion,
    PerivascularPartition,
    Composition,
    CapThickness,
    Readings,
    LesionLumenPartition,
    LesionWallPartition,
    LesionPerivascularPartition,
    LesionReadings,
}

pub(crate) const STAGE_ORDER: [StageId; STAGE_COUNT] = [StageId::Initialization,
                                                        StageId::LumenSegmentation,
                                                        StageId::Path,
                                                        StageId::LumenPartition,
                                                        StageId::Registration,
                                                        StageId::WallSegmentation,
                                                        StageId::WallPartition,
                                                        StageId::WallThickness,
                                                        StageId::PerivascularRegion,
                                                        StageId::PerivascularPartition,
                                                        StageId::Composition,
                                                        StageId::CapThickness,
                                                        StageId::Readings,
                                                        StageId::LesionLumenPartition,
                                                        StageId::LesionWallPartition,
                                                        StageId::LesionPerivascularPartition,
                                                        StageId::LesionReadings];

impl StageId {
    /// Posición del stage en la cadena (0..17).
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    pub fn from_ordinal(ordinal: usize) -> Result<Self, PipelineError> {
        STAGE_ORDER.get(ordinal).copied().ok_or(PipelineError::InvalidStageOrdinal(ordinal))
    }

    /// Nombre estable del stage (clave de auditoría y manifiestos).
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Initialization => "initialization",
            StageId::LumenSegmentation => "lumen_segmentation",
            StageId::Path => "path",
            StageId::LumenPartition => "lumen_partition",
            StageId::Registration => "registration",
            StageId::WallSegmentation => "wall_segmentation",
            StageId::WallPartition => "wall_partition",
            StageId::WallThickness => "wall_thickness",
            StageId::PerivascularRegion => "perivascular_region",
            StageId::PerivascularPartition => "perivascular_partition",
            StageId::Composition => "composition",
            StageId::CapThickness => "cap_thickness",
            StageId::Readings => "readings",
            StageId::LesionLumenPartition => "lesion_lumen_partition",
            StageId::LesionWallPartition => "lesion_wall_partition",
            StageId::LesionPerivascularPartition => "lesion_perivascular_partition",
            StageId::LesionReadings => "lesion_readings",
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
