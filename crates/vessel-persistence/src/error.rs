//! Errores de persistencia.
//! Fallas de E/S o del motor abortan el `save` completo; `dirty` queda
//! encendido y no se intenta rollback de archivos ya escritos en la misma
//! llamada. La carga nunca devuelve error al llamador (ver `LoadReport`).

use thiserror::Error;

use vessel_core::EngineError;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("engine persistence binding failed: {0}")]
    Engine(#[from] EngineError),

    #[error("manifest: {0}")]
    Manifest(String),
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        PersistenceError::Manifest(e.to_string())
    }
}
