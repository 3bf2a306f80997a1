//! Motor de cómputo stub (determinista, sin algoritmos de imagen).
//!
//! - `compute` produce un payload estable por stage: mismo target y stage ⇒
//!   mismo artifact (salvo los registros de lecturas, que sellan su
//!   timestamp de generación).
//! - `save`/`open` serializan el sobre JSON del artifact al archivo del
//!   stage, sea cual sea el formato declarado; alcanza para ejercitar el
//!   contrato de persistencia sin volúmenes reales.
//! - Inyección de fallas: un stage marcado con `fail_at` corta la corrida;
//!   `block` fuerza precondición de motor en falso; `fail_save_at` aborta
//!   la persistencia.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use vessel_core::{Artifact, ComputeEngine, EngineError, ProgressReporter, StageId, Target};
use vessel_domain::{ReadingsRecord, SegmentReading};

#[derive(Default)]
pub struct StubComputeEngine {
    fail_at: Option<StageId>,
    fail_save_at: Option<StageId>,
    blocked: HashSet<StageId>,
    /// Stages computados, en orden de invocación.
    pub computed: Vec<StageId>,
    /// Stages cerrados por la cascada.
    pub closed: Vec<StageId>,
}

impl StubComputeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// El stage indicado fallará con `EngineError::Compute`.
    pub fn fail_at(mut self, stage: StageId) -> Self {
        self.fail_at = Some(stage);
        self
    }

    /// `preconditions` devolverá falso para el stage indicado.
    pub fn block(mut self, stage: StageId) -> Self {
        self.blocked.insert(stage);
        self
    }

    /// `save` fallará con `EngineError::Io` para el stage indicado.
    pub fn fail_save_at(mut self, stage: StageId) -> Self {
        self.fail_save_at = Some(stage);
        self
    }

    pub fn unblock(&mut self, stage: StageId) {
        self.blocked.remove(&stage);
    }

    fn synth_payload(&self, stage: StageId, target: &Target) -> Result<serde_json::Value, EngineError> {
        use vessel_core::ArtifactKind as K;
        let descriptor = vessel_core::registry().get(stage);
        let payload = match descriptor.kind {
            K::Readings => {
                let segments: Vec<SegmentReading> =
                    target.body_site()
                          .segment_labels()
                          .iter()
                          .enumerate()
                          .map(|(i, label)| SegmentReading { segment: (*label).to_string(),
                                                             lumen_area_mm2: 10.0 + i as f64,
                                                             wall_area_mm2: 6.0 + i as f64,
                                                             max_wall_thickness_mm: 1.0 + 0.1 * i as f64,
                                                             normalized_wall_index: 0.4 })
                          .collect();
                let record = ReadingsRecord::new(target.body_site(), segments)
                    .map_err(|e| EngineError::Internal(e.to_string()))?;
                serde_json::to_value(record).map_err(|e| EngineError::Internal(e.to_string()))?
            }
            K::Track => serde_json::json!({
                "points": [[0.0, 0.0, 0.0], [0.0, 0.0, 10.0]],
                "stage": stage.name(),
            }),
            K::Transform => serde_json::json!({
                "matrix": [[1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 0.0]],
                "stage": stage.name(),
            }),
            K::Partition => serde_json::json!({
                "labels": target.body_site().segment_labels(),
                "stage": stage.name(),
            }),
            // Region / ValueMap / ProbabilityMap: referencia opaca al volumen.
            _ => serde_json::json!({
                "volume_ref": format!("{}:{}", target.id(), stage.name()),
                "stage": stage.name(),
            }),
        };
        Ok(payload)
    }
}

impl ComputeEngine for StubComputeEngine {
    fn preconditions(&self, stage: StageId, _target: &Target) -> bool {
        !self.blocked.contains(&stage)
    }

    fn compute(&mut self, stage: StageId, target: &Target, progress: &mut dyn ProgressReporter)
               -> Result<Artifact, EngineError> {
        if self.fail_at == Some(stage) {
            return Err(EngineError::Compute(format!("injected failure at {stage}")));
        }
        progress.fraction(stage, 0.5);
        let payload = self.synth_payload(stage, target)?;
        progress.fraction(stage, 1.0);
        self.computed.push(stage);
        let kind = vessel_core::registry().get(stage).kind.clone();
        Ok(Artifact::new_unhashed(kind, payload, None))
    }

    fn open(&self, _stage: StageId, path: &Path) -> Result<Artifact, EngineError> {
        let bytes = fs::read(path).map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))?;
        serde_json::from_slice(&bytes).map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))
    }

    fn save(&self, stage: StageId, artifact: &Artifact, path: &Path) -> Result<(), EngineError> {
        if self.fail_save_at == Some(stage) {
            return Err(EngineError::Io(format!("injected save failure at {stage}")));
        }
        let bytes = serde_json::to_vec_pretty(artifact).map_err(|e| EngineError::Internal(e.to_string()))?;
        fs::write(path, bytes).map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))
    }

    fn close(&mut self, stage: StageId, _target: &Target) {
        self.closed.push(stage);
    }
}
