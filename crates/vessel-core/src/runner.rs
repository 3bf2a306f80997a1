//! Runner del pipeline: avance hacia adelante de un target.
//!
//! Una única implementación canónica de `compute_remaining_stages`
//! parametrizada por el hook de progreso reemplaza a los llamadores
//! duplicados "rápido" y "con progreso". El recorrido es un lazo sobre el
//! registro ordenado con salida temprana: primera precondición no satisfecha
//! (suspensión normal) o primera falla del motor (corte inmediato).

use crate::cascade;
use crate::constants::STAGE_COUNT;
use crate::engine::{CompositionDisposition, CompositionPolicy, ComputeEngine, EngineError, LocalComposition};
use crate::hashing::hash_value;
use crate::progress::{NullProgress, ProgressReporter};
use crate::stage::{registry, StageDescriptor, StageGate, StageId};
use crate::target::Target;
use serde::{Deserialize, Serialize};

/// Resultado de una corrida. `Suspended` no es un error: es el alto normal
/// ante un gate no satisfecho (p. ej. composición diferida a remoto).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// El inicializador no tiene puntos; la corrida no tuvo efectos.
    NotViable,
    Suspended { at: StageId },
    Failed { at: StageId, cause: EngineError },
    Complete,
}

/// Conduce el avance de un target contra el registro de stages y un motor
/// de cómputo inyectado. Estrictamente secuencial: `&mut Target` garantiza a
/// nivel de tipos una sola corrida en vuelo por target.
pub struct PipelineRunner<'a> {
    engine: &'a mut dyn ComputeEngine,
    policy: &'a dyn CompositionPolicy,
}

impl<'a> PipelineRunner<'a> {
    pub fn new(engine: &'a mut dyn ComputeEngine) -> Self {
        Self { engine,
               policy: &LocalComposition }
    }

    pub fn with_policy(engine: &'a mut dyn ComputeEngine, policy: &'a dyn CompositionPolicy) -> Self {
        Self { engine, policy }
    }

    /// Avanza el target tan lejos como sea posible, sin observador.
    pub fn compute_remaining_stages(&mut self, target: &mut Target) -> RunOutcome {
        self.compute_remaining_stages_with_progress(target, &mut NullProgress)
    }

    /// Variante canónica con reporte de progreso ponderado.
    pub fn compute_remaining_stages_with_progress(&mut self,
                                                  target: &mut Target,
                                                  progress: &mut dyn ProgressReporter)
                                                  -> RunOutcome {
        // Precondición de entrada de la cadena: inicializador no vacío.
        if target.seed_point_count() == 0 {
            return RunOutcome::NotViable;
        }

        let start = target.frontier();
        if start == STAGE_COUNT {
            // Re-ejecución sobre un target completo: cero cómputos, dirty intacto.
            return RunOutcome::Complete;
        }

        let weights: Vec<(StageId, f32)> = registry().iter()
                                                     .skip(start)
                                                     .map(|d| (d.id, d.weight))
                                                     .collect();
        progress.register_weights(&weights);

        for ordinal in start..STAGE_COUNT {
            let descriptor = match registry().by_ordinal(ordinal) {
                Some(d) => d,
                None => break,
            };

            if !self.stage_ready(descriptor, target) {
                log::debug!("target {} suspended at {}", target.id(), descriptor.id);
                return RunOutcome::Suspended { at: descriptor.id };
            }

            progress.stage_started(descriptor.id);
            match self.engine.compute(descriptor.id, target, progress) {
                Ok(mut artifact) => {
                    artifact.hash = hash_value(&artifact.payload);
                    target.store_artifact(descriptor.id, artifact);
                    target.append_audit(descriptor);
                    // Guarda contra sobras de una corrida parcial anterior.
                    cascade::clear_beyond_stage(target, ordinal + 1);
                    progress.stage_finished(descriptor.id);
                    progress.yield_to_host();
                }
                Err(cause) => {
                    log::warn!("target {} failed at {}: {}", target.id(), descriptor.id, cause);
                    return RunOutcome::Failed { at: descriptor.id, cause };
                }
            }
        }

        RunOutcome::Complete
    }

    /// Precondición de stage: artifact previo presente (default), gate de
    /// dominio del registro y precondición propia del motor.
    fn stage_ready(&self, descriptor: &StageDescriptor, target: &Target) -> bool {
        let ordinal = descriptor.ordinal();
        if ordinal > 0 && target.artifact_at(ordinal - 1).is_none() {
            return false;
        }
        let gate_open = match descriptor.gate {
            StageGate::None => true,
            StageGate::SeedPoints => target.seed_point_count() >= 1,
            StageGate::Disposition => {
                self.policy.disposition(target) == CompositionDisposition::ComputeLocally
            }
        };
        gate_open && self.engine.preconditions(descriptor.id, target)
    }
}
