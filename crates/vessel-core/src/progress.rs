//! Contrato del reporter de progreso (colaborador externo).
//!
//! Antes de una corrida multi-stage el runner registra un peso relativo por
//! stage pendiente; durante cada `compute` el motor emite fracciones. Entre
//! límites de stage (nunca adentro) el hilo conductor cede control al event
//! loop anfitrión vía `yield_to_host` para que la UI pueda repintar.

use crate::stage::StageId;

pub trait ProgressReporter {
    fn register_weights(&mut self, weights: &[(StageId, f32)]);
    fn stage_started(&mut self, stage: StageId);
    /// Progreso fraccional (0.0..=1.0) dentro del stage en curso.
    fn fraction(&mut self, stage: StageId, fraction: f64);
    fn stage_finished(&mut self, stage: StageId);
    /// Punto de cesión cooperativa; no es preempción ni cancelación.
    fn yield_to_host(&mut self);
}

/// Reporter nulo para corridas sin observador.
pub struct NullProgress;

impl ProgressReporter for NullProgress {
    fn register_weights(&mut self, _weights: &[(StageId, f32)]) {}
    fn stage_started(&mut self, _stage: StageId) {}
    fn fraction(&mut self, _stage: StageId, _fraction: f64) {}
    fn stage_finished(&mut self, _stage: StageId) {}
    fn yield_to_host(&mut self) {}
}
