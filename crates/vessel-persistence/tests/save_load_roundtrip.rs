//! Round-trips de persistencia sobre carpetas temporales con el motor stub.

use tempfile::TempDir;

use vessel_adapters::StubComputeEngine;
use vessel_core::{cascade, registry, PipelineRunner, StageId, Target};
use vessel_domain::BodySite;
use vessel_persistence::{delete_target, load, load_from_folder, read_manifest, save, PersistenceConfig};

fn advanced_target(engine: &mut StubComputeEngine, folder: &std::path::Path) -> Target {
    let mut target = Target::new("demo", BodySite::Carotid, folder, &[[1.0, 2.0, 3.0]]);
    let _ = PipelineRunner::new(engine).compute_remaining_stages(&mut target);
    target
}

#[test]
fn scenario_b_prefix_of_five_writes_five_files_plus_manifest() {
    let dir = TempDir::new().unwrap();
    // bloquear wall_segmentation deja presente el prefijo 0..=4
    let mut engine = StubComputeEngine::new().block(StageId::WallSegmentation);
    let mut target = advanced_target(&mut engine, dir.path());
    assert_eq!(target.frontier(), 5);

    let config = PersistenceConfig::with_user("tester");
    let report = save(&mut target, dir.path(), &engine, &config).unwrap();

    assert!(!report.skipped_clean);
    assert_eq!(report.files_written.len(), 6); // 5 stages + manifiesto
    assert!(!target.dirty());

    // convención de nombres {user}_{yyyyMMdd}_{sufijo}.{ext}
    let lumen = target.recorded_filename(StageId::LumenSegmentation).unwrap();
    assert!(lumen.starts_with("tester_"));
    assert!(lumen.ends_with("_lumen.mha"));
    let init = target.recorded_filename(StageId::Initialization).unwrap();
    assert!(init.ends_with("_init.json"));
    for name in &report.files_written {
        assert!(dir.path().join(name).is_file(), "missing {name}");
    }
}

#[test]
fn scenario_c_reload_reconstructs_prefix_without_warnings() {
    let dir = TempDir::new().unwrap();
    let mut engine = StubComputeEngine::new().block(StageId::WallSegmentation);
    let mut target = advanced_target(&mut engine, dir.path());
    let config = PersistenceConfig::with_user("tester");
    save(&mut target, dir.path(), &engine, &config).unwrap();

    let (restored, report) = load_from_folder(dir.path(), &engine, &config).unwrap();

    assert!(report.warnings.is_empty());
    assert_eq!(report.loaded, 5);
    assert_eq!(restored.frontier(), 5);
    assert!(restored.prefix_intact());
    assert!(!restored.dirty(), "loading restores artifacts, it does not create them");
    assert_eq!(restored.id(), target.id());
    assert_eq!(restored.body_site(), target.body_site());
    for ordinal in 0..5 {
        assert_eq!(restored.artifact_at(ordinal).unwrap().hash,
                   target.artifact_at(ordinal).unwrap().hash);
    }
}

#[test]
fn scenario_d_missing_middle_file_stops_load_with_warning() {
    let dir = TempDir::new().unwrap();
    let mut engine = StubComputeEngine::new().block(StageId::WallSegmentation);
    let mut target = advanced_target(&mut engine, dir.path());
    let config = PersistenceConfig::with_user("tester");
    save(&mut target, dir.path(), &engine, &config).unwrap();

    // falta el archivo del stage 2; el del stage 3 sigue presente
    let path_file = target.recorded_filename(StageId::Path).unwrap().to_string();
    std::fs::remove_file(dir.path().join(&path_file)).unwrap();

    let (restored, report) = load_from_folder(dir.path(), &engine, &config).unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.loaded, 2);
    assert_eq!(restored.frontier(), 2);
    assert!(restored.prefix_intact());
}

#[test]
fn gap_in_recorded_filenames_is_a_corruption_signal() {
    let dir = TempDir::new().unwrap();
    let mut engine = StubComputeEngine::new().block(StageId::WallSegmentation);
    let mut target = advanced_target(&mut engine, dir.path());
    let config = PersistenceConfig::with_user("tester");
    save(&mut target, dir.path(), &engine, &config).unwrap();

    // target fresco con hueco artificial en los nombres registrados
    let mut fresh = Target::empty(target.id(), "demo", BodySite::Carotid, dir.path());
    fresh.record_filename(StageId::Initialization, target.recorded_filename(StageId::Initialization).unwrap().to_string());
    // (sin nombre para lumen_segmentation)
    fresh.record_filename(StageId::Path, target.recorded_filename(StageId::Path).unwrap().to_string());

    let report = load(&mut fresh, dir.path(), &engine);

    assert_eq!(report.loaded, 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("no recorded file"));
    assert_eq!(fresh.frontier(), 1);
}

#[test]
fn save_is_noop_on_clean_target() {
    let dir = TempDir::new().unwrap();
    let mut engine = StubComputeEngine::new().block(StageId::WallSegmentation);
    let mut target = advanced_target(&mut engine, dir.path());
    let config = PersistenceConfig::with_user("tester");
    save(&mut target, dir.path(), &engine, &config).unwrap();

    let report = save(&mut target, dir.path(), &engine, &config).unwrap();
    assert!(report.skipped_clean);
    assert!(report.files_written.is_empty());
}

#[test]
fn save_failure_aborts_and_leaves_dirty() {
    let dir = TempDir::new().unwrap();
    let mut engine = StubComputeEngine::new().block(StageId::WallSegmentation).fail_save_at(StageId::Path);
    let mut target = advanced_target(&mut engine, dir.path());
    let config = PersistenceConfig::with_user("tester");

    let result = save(&mut target, dir.path(), &engine, &config);

    assert!(result.is_err());
    assert!(target.dirty(), "aborted save must leave the target dirty");
    // los archivos anteriores a la falla no se revierten
    assert!(target.recorded_filename(StageId::Initialization).is_some());
    assert!(target.recorded_filename(StageId::Path).is_none());
}

#[test]
fn full_chain_roundtrip_restores_all_seventeen_stages() {
    let dir = TempDir::new().unwrap();
    let mut engine = StubComputeEngine::new();
    let mut target = advanced_target(&mut engine, dir.path());
    assert!(target.is_complete());
    let config = PersistenceConfig::with_user("tester");
    save(&mut target, dir.path(), &engine, &config).unwrap();

    let (restored, report) = load_from_folder(dir.path(), &engine, &config).unwrap();
    assert!(report.warnings.is_empty());
    assert_eq!(report.loaded, registry().len());
    assert!(restored.is_complete());
}

#[test]
fn empty_prefix_roundtrip_writes_only_manifest() {
    let dir = TempDir::new().unwrap();
    let engine = StubComputeEngine::new();
    let mut target = Target::new("demo", BodySite::Carotid, dir.path(), &[[0.0, 0.0, 0.0]]);
    cascade::clear_all(&mut target);
    let config = PersistenceConfig::with_user("tester");

    let report = save(&mut target, dir.path(), &engine, &config).unwrap();
    assert_eq!(report.files_written.len(), 1); // sólo el manifiesto

    let manifest = read_manifest(dir.path()).unwrap();
    assert!(manifest.stages.is_empty());
}

#[test]
fn version_mismatch_policy_leaves_stale_stage_absent() {
    let dir = TempDir::new().unwrap();
    let mut engine = StubComputeEngine::new().block(StageId::WallSegmentation);
    let mut target = advanced_target(&mut engine, dir.path());
    let config = PersistenceConfig::with_user("tester");
    save(&mut target, dir.path(), &engine, &config).unwrap();

    // adultera la versión registrada del stage 2 en el manifiesto
    let mut manifest = read_manifest(dir.path()).unwrap();
    let marker = manifest.stages.iter_mut().find(|s| s.stage == StageId::Path).unwrap();
    marker.stage_version = "0.0".to_string();
    let manifest_name = std::fs::read_dir(dir.path()).unwrap()
                                                     .filter_map(|e| e.ok())
                                                     .map(|e| e.file_name().into_string().unwrap())
                                                     .find(|n| n.ends_with("_target.json"))
                                                     .unwrap();
    std::fs::write(dir.path().join(manifest_name), serde_json::to_vec_pretty(&manifest).unwrap()).unwrap();

    // política apagada (default): se confía lo de disco y cargan los 5
    let (restored, _) = load_from_folder(dir.path(), &engine, &config).unwrap();
    assert_eq!(restored.frontier(), 5);

    // política activa: el stage desactualizado y sus sucesores quedan ausentes
    let mut strict = config.clone();
    strict.reload_on_version_mismatch = true;
    let (restored, report) = load_from_folder(dir.path(), &engine, &strict).unwrap();
    assert_eq!(restored.frontier(), 2);
    assert!(report.warnings.is_empty(), "recompute-on-mismatch is not a corruption warning");
}

#[test]
fn delete_target_clears_slots_and_removes_folder() {
    let dir = TempDir::new().unwrap();
    let folder = dir.path().join("t1");
    let mut engine = StubComputeEngine::new();
    let mut target = advanced_target(&mut engine, &folder);
    let config = PersistenceConfig::with_user("tester");
    save(&mut target, &folder, &engine, &config).unwrap();
    assert!(folder.is_dir());

    delete_target(&mut target, &folder).unwrap();
    assert_eq!(target.frontier(), 0);
    assert!(!folder.exists());
}
