//! `save`/`load` del prefijo de artifacts de un target.
//!
//! La persistencia replica la semántica de cadena del cómputo: un stage sólo
//! se escribe si su artifact está en memoria Y el stage anterior acaba de
//! persistirse en esta misma llamada. El primer hueco corta la escritura de
//! todos los ordinales superiores aunque sus artifacts existan.

use chrono::Utc;
use std::fs;
use std::path::Path;

use vessel_core::{cascade, registry, ComputeEngine, Target};

use crate::config::PersistenceConfig;
use crate::error::PersistenceError;
use crate::manifest::{self, TargetManifest};

#[derive(Debug, Default)]
pub struct SaveReport {
    /// `true` cuando el target estaba limpio y no se escribió nada.
    pub skipped_clean: bool,
    pub files_written: Vec<String>,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub warnings: Vec<String>,
}

impl LoadReport {
    fn warn(&mut self, message: String) {
        log::warn!("{message}");
        self.warnings.push(message);
    }
}

/// Persiste el prefijo presente del target en `folder`.
///
/// No-op si el target está limpio. Los nombres registrados se descartan y
/// rederivan siempre; nunca se confían tal cual. Ante una falla de E/S la
/// llamada entera aborta: `dirty` queda encendido y los archivos ya
/// escritos no se revierten. Con el prefijo completo persistido (incluido
/// el manifiesto) se apaga `dirty`.
pub fn save(target: &mut Target,
            folder: &Path,
            engine: &dyn ComputeEngine,
            config: &PersistenceConfig)
            -> Result<SaveReport, PersistenceError> {
    if !target.dirty() {
        return Ok(SaveReport { skipped_clean: true,
                               files_written: Vec::new() });
    }

    fs::create_dir_all(folder)?;
    target.clear_recorded_filenames();

    let date = Utc::now().format("%Y%m%d").to_string();
    let mut report = SaveReport::default();
    let mut chain_unbroken = true;

    for descriptor in registry().iter() {
        let artifact = target.artifact(descriptor.id);
        if let (Some(artifact), true) = (artifact, chain_unbroken) {
            let filename = format!("{}_{}_{}.{}", config.user_id, date, descriptor.suffix, descriptor.format.extension());
            engine.save(descriptor.id, artifact, &folder.join(&filename))?;
            target.record_filename(descriptor.id, filename.clone());
            report.files_written.push(filename);
        } else {
            chain_unbroken = false;
        }
    }

    let manifest = TargetManifest::from_target(target);
    let manifest_file = manifest::write_manifest(&manifest, folder, &config.user_id, &date)?;
    report.files_written.push(manifest_file);

    target.mark_clean();
    Ok(report)
}

/// Rehidrata en memoria los stages con archivo registrado, en orden.
///
/// Nunca devuelve error: ante archivo faltante/ilegible o un hueco en la
/// cadena de nombres (señal de corrupción) la carga se detiene con un
/// warning y el target queda en el estado parcial alcanzado. Reponer
/// artifacts no enciende `dirty`.
pub fn load(target: &mut Target, folder: &Path, engine: &dyn ComputeEngine) -> LoadReport {
    let mut report = LoadReport::default();

    for descriptor in registry().iter() {
        let stage = descriptor.id;
        let Some(filename) = target.recorded_filename(stage).map(str::to_string) else {
            let gap = registry().iter()
                                .skip(stage.ordinal() + 1)
                                .any(|later| target.recorded_filename(later.id).is_some());
            if gap {
                report.warn(format!("target {}: stage {} has no recorded file but a later stage does; stopping load",
                                    target.id(),
                                    stage));
            }
            break;
        };

        let path = folder.join(&filename);
        if !path.is_file() {
            report.warn(format!("target {}: missing file {} for stage {}; stopping load", target.id(), filename, stage));
            break;
        }
        match engine.open(stage, &path) {
            Ok(artifact) => {
                target.restore_artifact(stage, artifact);
                report.loaded += 1;
            }
            Err(e) => {
                report.warn(format!("target {}: unreadable file {} for stage {}: {e}; stopping load",
                                    target.id(),
                                    filename,
                                    stage));
                break;
            }
        }
    }

    report
}

/// Reconstruye un target completo desde la carpeta: lee el manifiesto,
/// registra los nombres persistidos y rehidrata el prefijo. Con la política
/// de versión activa, un stage guardado por otra versión del algoritmo no
/// se registra (queda ausente y el runner lo recomputa).
pub fn load_from_folder(folder: &Path,
                        engine: &dyn ComputeEngine,
                        config: &PersistenceConfig)
                        -> Result<(Target, LoadReport), PersistenceError> {
    let manifest = crate::manifest::read_manifest(folder)?;
    let mut target = Target::empty(manifest.target_id, &manifest.label, manifest.body_site, folder);

    for descriptor in registry().iter() {
        let Some(entry) = manifest.stage_entry(descriptor.id) else {
            break;
        };
        if config.reload_on_version_mismatch && entry.stage_version != descriptor.version {
            log::warn!("target {}: stage {} persisted by version {} (current {}); will recompute",
                       target.id(),
                       descriptor.id,
                       entry.stage_version,
                       descriptor.version);
            break;
        }
        target.record_filename(descriptor.id, entry.filename.clone());
    }

    let report = load(&mut target, folder, engine);
    Ok((target, report))
}

/// Destrucción explícita: vacía todos los stages y elimina la carpeta.
pub fn delete_target(target: &mut Target, folder: &Path) -> Result<(), PersistenceError> {
    cascade::clear_all(target);
    if folder.exists() {
        fs::remove_dir_all(folder)?;
    }
    Ok(())
}
