//! Manifiesto persistido del target: la "descripción" que permite reanudar
//! un análisis en otra sesión. Registra identidad, sitio, y por stage
//! persistido el nombre de archivo, la versión del algoritmo que lo produjo
//! y el hash del payload.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use vessel_core::constants::PIPELINE_VERSION;
use vessel_core::{registry, StageId, Target};
use vessel_domain::BodySite;

use crate::error::PersistenceError;

pub const MANIFEST_SUFFIX: &str = "target";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestStage {
    pub stage: StageId,
    pub filename: String,
    pub stage_version: String,
    pub artifact_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetManifest {
    pub target_id: Uuid,
    pub label: String,
    pub body_site: BodySite,
    pub pipeline_version: String,
    pub stages: Vec<ManifestStage>,
}

impl TargetManifest {
    /// Construye el manifiesto a partir de los archivos registrados en el
    /// target durante el `save` en curso.
    pub fn from_target(target: &Target) -> Self {
        let stages = registry().iter()
                               .filter_map(|d| {
                                   let filename = target.recorded_filename(d.id)?;
                                   let hash = target.artifact(d.id).map(|a| a.hash.clone()).unwrap_or_default();
                                   Some(ManifestStage { stage: d.id,
                                                        filename: filename.to_string(),
                                                        stage_version: d.version.to_string(),
                                                        artifact_hash: hash })
                               })
                               .collect();
        Self { target_id: target.id(),
               label: target.label().to_string(),
               body_site: target.body_site(),
               pipeline_version: PIPELINE_VERSION.to_string(),
               stages }
    }

    pub fn stage_entry(&self, stage: StageId) -> Option<&ManifestStage> {
        self.stages.iter().find(|s| s.stage == stage)
    }
}

pub(crate) fn manifest_filename(user_id: &str, date: &str) -> String {
    format!("{user_id}_{date}_{MANIFEST_SUFFIX}.json")
}

pub(crate) fn write_manifest(manifest: &TargetManifest,
                             folder: &Path,
                             user_id: &str,
                             date: &str)
                             -> Result<String, PersistenceError> {
    let filename = manifest_filename(user_id, date);
    let bytes = serde_json::to_vec_pretty(manifest)?;
    fs::write(folder.join(&filename), bytes)?;
    Ok(filename)
}

/// Busca el manifiesto más reciente en la carpeta (el componente de fecha
/// del nombre ordena lexicográficamente).
pub fn read_manifest(folder: &Path) -> Result<TargetManifest, PersistenceError> {
    let marker = format!("_{MANIFEST_SUFFIX}.json");
    let mut candidates: Vec<String> = fs::read_dir(folder)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(&marker))
        .collect();
    candidates.sort();
    let newest = candidates
        .pop()
        .ok_or_else(|| PersistenceError::Manifest(format!("no target manifest in {}", folder.display())))?;
    let bytes = fs::read(folder.join(&newest))?;
    Ok(serde_json::from_slice(&bytes)?)
}
