//! Reporter de progreso que graba los eventos recibidos.

use vessel_core::{ProgressReporter, StageId};

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    WeightsRegistered(Vec<(StageId, f32)>),
    Started(StageId),
    Fraction(StageId, f64),
    Finished(StageId),
    Yielded,
}

#[derive(Default)]
pub struct RecordingProgress {
    pub events: Vec<ProgressEvent>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn yields(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, ProgressEvent::Yielded)).count()
    }

    pub fn finished_stages(&self) -> Vec<StageId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Finished(stage) => Some(*stage),
                _ => None,
            })
            .collect()
    }
}

impl ProgressReporter for RecordingProgress {
    fn register_weights(&mut self, weights: &[(StageId, f32)]) {
        self.events.push(ProgressEvent::WeightsRegistered(weights.to_vec()));
    }

    fn stage_started(&mut self, stage: StageId) {
        self.events.push(ProgressEvent::Started(stage));
    }

    fn fraction(&mut self, stage: StageId, fraction: f64) {
        self.events.push(ProgressEvent::Fraction(stage, fraction));
    }

    fn stage_finished(&mut self, stage: StageId) {
        self.events.push(ProgressEvent::Finished(stage));
    }

    fn yield_to_host(&mut self) {
        self.events.push(ProgressEvent::Yielded);
    }
}
