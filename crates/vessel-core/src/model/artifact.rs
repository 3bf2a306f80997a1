//! Artifact derivado de un stage.
//!
//! Un `Artifact` es la unidad de datos producida por cada stage. Es opaco
//! para el pipeline:
//! - `payload` es JSON genérico; el runner no interpreta su semántica, sólo
//!   su existencia (para máscaras volumétricas el payload referencia los
//!   buffers del motor de cómputo, no los contiene).
//! - `hash` es calculado por el runner sobre el JSON canonicalizado (ver
//!   `hashing::to_canonical_json`) al almacenarlo en el target. Sirve como
//!   identidad para auditoría y para verificar round-trips de persistencia.
//! - `metadata` permite anotar información auxiliar que no entra al hash.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Clases de artifact que produce la cadena de stages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Región única (máscara binaria).
    Region,
    /// Partición: conjunto nombrado de regiones.
    Partition,
    /// Mapa escalar (p. ej. espesor de pared).
    ValueMap,
    /// Mapa de probabilidad por tipo de tejido.
    ProbabilityMap,
    /// Registro estructurado de lecturas.
    Readings,
    /// Registro de camino / inicializador (puntos semilla o centerline).
    Track,
    /// Transformada de registración.
    Transform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub hash: String,            // hash canonical del payload (asignado por el runner)
    pub payload: Value,          // contenido opaco JSON
    pub metadata: Option<Value>, // información auxiliar (no entra al hash)
}

impl Artifact {
    /// Constructor sin hash; el runner lo asigna al comprometer el artifact.
    pub fn new_unhashed(kind: ArtifactKind, payload: Value, metadata: Option<Value>) -> Self {
        Self { kind,
               hash: String::new(),
               payload,
               metadata }
    }
}
