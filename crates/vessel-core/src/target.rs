//! Estado por target: slots de artifacts, flag dirty, parámetros y auditoría.
//!
//! Un `Target` representa una estructura anatómica bajo análisis. Mantiene un
//! slot opcional de artifact por ordinal de stage; el invariante de prefijo
//! (slot `i` vacío ⇒ slots `j > i` vacíos) se conserva fuera de una llamada
//! activa de runner/cascada. El flag `dirty` se enciende con cualquier alta o
//! baja de artifact y sólo lo apaga una persistencia completa exitosa.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use vessel_domain::{BodySite, ParamSnapshot};

use crate::constants::STAGE_COUNT;
use crate::hashing::hash_value;
use crate::model::{Artifact, ArtifactKind};
use crate::stage::{StageDescriptor, StageId};

/// Registro de auditoría de un stage completado.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageAuditRecord {
    pub step_name: String,
    pub target_id: String,
    pub stage_version: String,
    pub parameter_keys: Vec<String>,
    pub parameter_values: Vec<f64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Target {
    id: Uuid,
    label: String,
    body_site: BodySite,
    folder: PathBuf,
    artifacts: Vec<Option<Artifact>>,
    /// Nombres de archivo persistidos, por ordinal. Se rederivan en cada save.
    persisted: Vec<Option<String>>,
    dirty: bool,
    /// Sesión de motor de cómputo asociada (referencia, no propiedad).
    session: Option<Uuid>,
    params: IndexMap<StageId, ParamSnapshot>,
    audit: Vec<StageAuditRecord>,
}

impl Target {
    /// Crea un target definido por el usuario. El inicializador (stage 0) se
    /// puebla de inmediato con los puntos semilla externos; con cero puntos
    /// el target existe pero el runner lo reportará como no viable.
    pub fn new(label: &str, body_site: BodySite, folder: &Path, seed_points: &[[f64; 3]]) -> Self {
        let mut target = Self::empty(Uuid::new_v4(), label, body_site, folder);
        let payload = serde_json::json!({ "points": seed_points });
        let mut init = Artifact::new_unhashed(ArtifactKind::Track, payload, None);
        init.hash = hash_value(&init.payload);
        target.artifacts[StageId::Initialization.ordinal()] = Some(init);
        target.dirty = true;
        target
    }

    /// Target sin artifacts, para rehidratar desde almacenamiento estable.
    pub fn empty(id: Uuid, label: &str, body_site: BodySite, folder: &Path) -> Self {
        Self { id,
               label: label.to_string(),
               body_site,
               folder: folder.to_path_buf(),
               artifacts: vec![None; STAGE_COUNT],
               persisted: vec![None; STAGE_COUNT],
               dirty: false,
               session: None,
               params: IndexMap::new(),
               audit: Vec::new() }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn body_site(&self) -> BodySite {
        self.body_site
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Sólo la persistencia completa exitosa limpia el flag.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn session(&self) -> Option<Uuid> {
        self.session
    }

    pub fn bind_session(&mut self, session: Uuid) {
        self.session = Some(session);
    }

    pub fn artifact(&self, stage: StageId) -> Option<&Artifact> {
        self.artifacts[stage.ordinal()].as_ref()
    }

    pub fn artifact_at(&self, ordinal: usize) -> Option<&Artifact> {
        self.artifacts.get(ordinal).and_then(|slot| slot.as_ref())
    }

    /// Compromete un artifact recién computado. Enciende `dirty`.
    pub fn store_artifact(&mut self, stage: StageId, artifact: Artifact) {
        self.artifacts[stage.ordinal()] = Some(artifact);
        self.dirty = true;
    }

    /// Repone un artifact leído de almacenamiento estable sin tocar `dirty`
    /// (coincide con lo guardado, no hay nada nuevo que persistir).
    pub fn restore_artifact(&mut self, stage: StageId, artifact: Artifact) {
        self.artifacts[stage.ordinal()] = Some(artifact);
    }

    /// Vacía un slot y su nombre persistido. Devuelve si había artifact;
    /// enciende `dirty` sólo en ese caso.
    pub(crate) fn clear_slot(&mut self, ordinal: usize) -> bool {
        self.persisted[ordinal] = None;
        let removed = self.artifacts[ordinal].take().is_some();
        if removed {
            self.dirty = true;
        }
        removed
    }

    /// Ordinal más bajo sin artifact (== STAGE_COUNT para cadena completa).
    pub fn frontier(&self) -> usize {
        self.artifacts
            .iter()
            .position(|slot| slot.is_none())
            .unwrap_or(STAGE_COUNT)
    }

    pub fn is_complete(&self) -> bool {
        self.frontier() == STAGE_COUNT
    }

    /// Un target es viable cuando su partición de lumen existe.
    pub fn viable(&self) -> bool {
        self.artifact(StageId::LumenPartition).is_some()
    }

    /// Puntos semilla del inicializador (0 si el stage 0 está vacío).
    pub fn seed_point_count(&self) -> usize {
        self.artifact(StageId::Initialization)
            .and_then(|a| a.payload.get("points"))
            .and_then(|p| p.as_array())
            .map(|p| p.len())
            .unwrap_or(0)
    }

    /// Invariante de prefijo: ningún slot presente después de un hueco.
    pub fn prefix_intact(&self) -> bool {
        let frontier = self.frontier();
        self.artifacts[frontier..].iter().all(|slot| slot.is_none())
    }

    pub fn record_filename(&mut self, stage: StageId, filename: String) {
        self.persisted[stage.ordinal()] = Some(filename);
    }

    pub fn recorded_filename(&self, stage: StageId) -> Option<&str> {
        self.persisted[stage.ordinal()].as_deref()
    }

    pub fn clear_recorded_filenames(&mut self) {
        for slot in &mut self.persisted {
            *slot = None;
        }
    }

    pub fn set_params(&mut self, stage: StageId, snapshot: ParamSnapshot) {
        self.params.insert(stage, snapshot);
    }

    pub fn params(&self, stage: StageId) -> Option<&ParamSnapshot> {
        self.params.get(&stage)
    }

    /// Anota en la bitácora la finalización de un stage, con el snapshot de
    /// parámetros vigente (vacío si el stage no tiene parámetros asignados).
    pub fn append_audit(&mut self, descriptor: &StageDescriptor) {
        let snapshot = self.params.get(&descriptor.id);
        self.audit.push(StageAuditRecord {
            step_name: descriptor.id.name().to_string(),
            target_id: self.id.to_string(),
            stage_version: descriptor.version.to_string(),
            parameter_keys: snapshot.map(|s| s.keys()).unwrap_or_default(),
            parameter_values: snapshot.map(|s| s.values()).unwrap_or_default(),
            timestamp: Utc::now(),
        });
    }

    pub fn audit(&self) -> &[StageAuditRecord] {
        &self.audit
    }
}
