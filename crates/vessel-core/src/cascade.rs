//! Cascada de invalidación: truncado del prefijo de artifacts.
//!
//! Descartar el artifact del stage `k` invalida todo lo derivado de él, así
//! que la cascada vacía los slots `k..N` en orden ascendente junto con sus
//! nombres de archivo registrados. La selección de fallback reporta al
//! viewer el ancestro presente más cercano como nuevo artifact
//! representativo del target; es salida consultiva, no un cambio de estado
//! del pipeline.

use uuid::Uuid;

use crate::constants::STAGE_COUNT;
use crate::engine::ComputeEngine;
use crate::model::Artifact;
use crate::stage::StageId;
use crate::target::Target;

/// Colaborador de UI que muestra el artifact "actual" de un target.
pub trait RepresentativeViewer {
    /// `stage`/`artifact` en `None` cuando no queda ningún ancestro.
    fn representative_changed(&mut self, target_id: Uuid, stage: Option<StageId>, artifact: Option<&Artifact>);
}

/// Vacía los slots `k..N` del target. Devuelve si se removió al menos un
/// artifact (`dirty` se enciende sólo en ese caso). Idempotente: repetir la
/// llamada con igual o mayor `k` no tiene efecto.
pub fn clear_beyond_stage(target: &mut Target, k: usize) -> bool {
    let mut removed = false;
    for ordinal in k..STAGE_COUNT {
        removed |= target.clear_slot(ordinal);
    }
    removed
}

/// Variante con colaboradores: cierra en el motor cada stage vaciado y, si
/// hubo remoción, reporta al viewer el ancestro presente más cercano.
pub fn clear_beyond_stage_notifying(target: &mut Target,
                                    k: usize,
                                    engine: &mut dyn ComputeEngine,
                                    viewer: &mut dyn RepresentativeViewer)
                                    -> bool {
    let mut removed = false;
    for ordinal in k..STAGE_COUNT {
        let had_artifact = target.clear_slot(ordinal);
        if had_artifact {
            // El ordinal es válido dentro de 0..STAGE_COUNT.
            if let Ok(stage) = StageId::from_ordinal(ordinal) {
                engine.close(stage, target);
            }
        }
        removed |= had_artifact;
    }
    if removed {
        let fallback = nearest_present_ancestor(target, k);
        match fallback {
            Some(stage) => viewer.representative_changed(target.id(), Some(stage), target.artifact(stage)),
            None => viewer.representative_changed(target.id(), None, None),
        }
    }
    removed
}

/// Regresión al inicializador: se usa cuando cambian las imágenes fuente.
pub fn reset_to_initializer(target: &mut Target) -> bool {
    clear_beyond_stage(target, 1)
}

/// Vaciado total, previo a la destrucción del target.
pub fn clear_all(target: &mut Target) -> bool {
    clear_beyond_stage(target, 0)
}

/// Ancestro presente de mayor ordinal estrictamente menor a `k`.
fn nearest_present_ancestor(target: &Target, k: usize) -> Option<StageId> {
    (0..k.min(STAGE_COUNT)).rev()
                           .find(|&ordinal| target.artifact_at(ordinal).is_some())
                           .and_then(|ordinal| StageId::from_ordinal(ordinal).ok())
}
