use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Snapshot versionado de parámetros de un stage.
///
/// Los valores son escalares (el motor de cómputo sólo acepta parámetros
/// numéricos); el orden de inserción se preserva para que claves y valores
/// puedan volcarse como columnas paralelas en el registro de auditoría.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSnapshot {
    version: String,
    entries: IndexMap<String, f64>,
}

impl ParamSnapshot {
    pub fn new(version: &str) -> Self {
        Self { version: version.to_string(),
               entries: IndexMap::new() }
    }

    /// Inserta (o reemplaza) un parámetro. Rechaza NaN/inf: un snapshot con
    /// valores no finitos no es reproducible al serializar a JSON.
    pub fn set(&mut self, key: &str, value: f64) -> Result<(), DomainError> {
        if !value.is_finite() {
            return Err(DomainError::ValidationError(format!("non-finite parameter {key}: {value}")));
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.get(key).copied()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Claves en orden de inserción (columna `parameterKeys` de auditoría).
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Valores en el mismo orden que `keys()`.
    pub fn values(&self) -> Vec<f64> {
        self.entries.values().copied().collect()
    }
}
