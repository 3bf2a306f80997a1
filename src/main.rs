//! Binario de validación: ejercita los escenarios de referencia del
//! pipeline contra el motor stub (corrida completa, falla inyectada,
//! round-trip de persistencia y carga corrupta).

use std::fs;
use std::path::PathBuf;

use vessel_adapters::{RecordingProgress, StubComputeEngine};
use vessel_core::{PipelineRunner, RunOutcome, StageId, Target};
use vessel_domain::BodySite;
use vessel_persistence::{load_from_folder, save, PersistenceConfig};

fn scratch_folder(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vesselflow_{tag}_{}", uuid::Uuid::new_v4()))
}

fn seeded_target(folder: &PathBuf) -> Target {
    Target::new("left carotid", BodySite::Carotid, folder, &[[12.0, 34.0, 56.0]])
}

/// Validación: corrida completa con progreso ponderado.
fn run_full_chain_validation() {
    let folder = scratch_folder("full");
    let mut target = seeded_target(&folder);
    let mut engine = StubComputeEngine::new();
    let mut progress = RecordingProgress::new();

    let outcome = PipelineRunner::new(&mut engine)
        .compute_remaining_stages_with_progress(&mut target, &mut progress);

    assert_eq!(outcome, RunOutcome::Complete);
    assert!(target.is_complete() && target.viable() && target.prefix_intact());
    println!("[full-chain] complete; {} stages computed, {} yields to host",
             engine.computed.len(),
             progress.yields());
}

/// Validación: falla del motor en lumen ⇒ sólo el inicializador sobrevive.
fn run_failure_validation() {
    let folder = scratch_folder("fail");
    let mut target = seeded_target(&folder);
    let was_dirty = target.dirty();
    let mut engine = StubComputeEngine::new().fail_at(StageId::LumenSegmentation);

    let outcome = PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target);

    assert!(matches!(outcome, RunOutcome::Failed { at: StageId::LumenSegmentation, .. }));
    assert_eq!(target.frontier(), 1);
    assert_eq!(target.dirty(), was_dirty);
    println!("[fail-stop] failed at lumen_segmentation; initializer retained");
}

/// Validación: save de un prefijo y resume desde carpeta en "otra sesión".
fn run_roundtrip_validation() {
    let folder = scratch_folder("roundtrip");
    let mut target = seeded_target(&folder);
    let mut engine = StubComputeEngine::new().block(StageId::Registration);
    let config = PersistenceConfig::with_user("validator");

    // avanza hasta suspenderse antes de registration (prefijo 0..=3)
    let outcome = PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target);
    assert_eq!(outcome, RunOutcome::Suspended { at: StageId::Registration });

    let report = save(&mut target, &folder, &engine, &config).expect("save should succeed");
    assert!(!target.dirty());
    println!("[roundtrip] saved {} files", report.files_written.len());

    let (restored, load_report) = load_from_folder(&folder, &engine, &config).expect("manifest should load");
    assert!(load_report.warnings.is_empty());
    assert_eq!(restored.frontier(), target.frontier());
    for ordinal in 0..restored.frontier() {
        let a = target.artifact_at(ordinal).expect("saved artifact");
        let b = restored.artifact_at(ordinal).expect("restored artifact");
        assert_eq!(a.hash, b.hash);
    }
    println!("[roundtrip] restored {} stages with matching hashes", load_report.loaded);

    let _ = fs::remove_dir_all(&folder);
}

/// Validación: archivo intermedio ausente ⇒ la carga se detiene con warning.
fn run_corruption_validation() {
    let folder = scratch_folder("corrupt");
    let mut target = seeded_target(&folder);
    let mut engine = StubComputeEngine::new().block(StageId::Registration);
    let config = PersistenceConfig::with_user("validator");

    let _ = PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target);
    save(&mut target, &folder, &engine, &config).expect("save should succeed");

    // borra el archivo del stage 2 dejando el del 3 presente
    let path_file = target.recorded_filename(StageId::Path).expect("recorded path file").to_string();
    fs::remove_file(folder.join(&path_file)).expect("remove stage file");

    let (restored, load_report) = load_from_folder(&folder, &engine, &config).expect("manifest should load");
    assert_eq!(load_report.warnings.len(), 1);
    assert_eq!(restored.frontier(), 2);
    assert!(restored.prefix_intact());
    println!("[corruption] load stopped after stage 1 with warning: {}",
             load_report.warnings[0]);

    let _ = fs::remove_dir_all(&folder);
}

fn main() {
    vessel_persistence::init_dotenv();
    run_full_chain_validation();
    run_failure_validation();
    run_roundtrip_validation();
    run_corruption_validation();
    println!("all validations passed");
}
