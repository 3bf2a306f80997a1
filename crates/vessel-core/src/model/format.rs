use serde::{Deserialize, Serialize};

/// Formato de archivo con el que un stage persiste su artifact.
///
/// Regiones y particiones van a volumen-máscara (una o varias etiquetas),
/// los mapas escalares a volumen de canal único y los registros
/// estructurados (inicializador, camino, registración, lecturas) a texto
/// JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    /// Máscara binaria volumétrica.
    MaskVolume,
    /// Volumen de etiquetas múltiples (particiones).
    LabelVolume,
    /// Volumen escalar de canal único.
    ScalarVolume,
    /// Registro estructurado en texto.
    Structured,
}

impl FileFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::MaskVolume | FileFormat::LabelVolume | FileFormat::ScalarVolume => "mha",
            FileFormat::Structured => "json",
        }
    }
}
