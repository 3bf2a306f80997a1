//! Viewer que graba el artifact representativo reportado por la cascada.

use uuid::Uuid;

use vessel_core::{Artifact, RepresentativeViewer, StageId};

#[derive(Default)]
pub struct RecordingViewer {
    pub notifications: usize,
    pub last: Option<(Uuid, Option<StageId>)>,
    pub last_hash: Option<String>,
}

impl RecordingViewer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepresentativeViewer for RecordingViewer {
    fn representative_changed(&mut self, target_id: Uuid, stage: Option<StageId>, artifact: Option<&Artifact>) {
        self.notifications += 1;
        self.last = Some((target_id, stage));
        self.last_hash = artifact.map(|a| a.hash.clone());
    }
}
