//! Capacidad del motor de cómputo consumida por el pipeline.
//!
//! El motor ejecuta los algoritmos de imagen de cada stage; este crate sólo
//! consume su superficie por stage (preconditions / compute / open / save /
//! close / cached). Las implementaciones reales viven fuera del workspace;
//! `vessel-adapters` provee un stub determinista para tests y validación.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::model::Artifact;
use crate::progress::ProgressReporter;
use crate::stage::StageId;
use crate::target::Target;

/// Falla del motor durante un stage. Aborta la corrida en curso; el estado
/// del target retrocede sólo hasta el último stage comprometido.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum EngineError {
    #[error("stage rejected input: {0}")] Rejected(String),
    #[error("compute failed: {0}")] Compute(String),
    #[error("artifact I/O failed: {0}")] Io(String),
    #[error("engine internal: {0}")] Internal(String),
}

/// Superficie por stage del motor de cómputo.
///
/// Las llamadas a `compute` son bloqueantes y de larga duración; el motor
/// emite progreso fraccional al reporter durante la ejecución. No hay
/// cancelación una vez invocado `compute`.
pub trait ComputeEngine {
    /// Precondición propia del motor, adicional al gate del registro.
    fn preconditions(&self, stage: StageId, target: &Target) -> bool {
        let _ = (stage, target);
        true
    }

    fn compute(&mut self, stage: StageId, target: &Target, progress: &mut dyn ProgressReporter)
               -> Result<Artifact, EngineError>;

    /// Artifact cacheado por el motor para este target, si lo hay.
    fn cached(&self, stage: StageId, target: &Target) -> Option<&Artifact> {
        let _ = (stage, target);
        None
    }

    fn open(&self, stage: StageId, path: &Path) -> Result<Artifact, EngineError>;

    fn save(&self, stage: StageId, artifact: &Artifact, path: &Path) -> Result<(), EngineError>;

    /// Libera el artifact cacheado por el motor sin borrar su archivo.
    fn close(&mut self, stage: StageId, target: &Target) {
        let _ = (stage, target);
    }
}

/// Disposición externa para el stage de composición.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositionDisposition {
    ComputeLocally,
    /// El cómputo queda en manos de un servicio externo; la corrida se
    /// suspende sin error hasta que complete.
    DeferToRemote,
}

/// Hook de decisión inyectado al runner para el gate de composición.
pub trait CompositionPolicy {
    fn disposition(&self, target: &Target) -> CompositionDisposition;
}

/// Política por defecto: componer siempre localmente.
pub struct LocalComposition;

impl CompositionPolicy for LocalComposition {
    fn disposition(&self, _target: &Target) -> CompositionDisposition {
        CompositionDisposition::ComputeLocally
    }
}
