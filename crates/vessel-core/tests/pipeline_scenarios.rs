//! Escenarios de referencia del runner y la cascada contra el motor stub.

use vessel_adapters::{ProgressEvent, RecordingProgress, RecordingViewer, StubComputeEngine};
use vessel_core::{cascade, clear_beyond_stage_notifying, CompositionDisposition, CompositionPolicy, PipelineRunner,
                  RunOutcome, StageId, Target};
use vessel_domain::BodySite;
use std::path::Path;

fn seeded_target() -> Target {
    Target::new("demo", BodySite::Carotid, Path::new("/tmp/vesselflow-test"), &[[1.0, 2.0, 3.0]])
}

struct DeferPolicy;
impl CompositionPolicy for DeferPolicy {
    fn disposition(&self, _target: &Target) -> CompositionDisposition {
        CompositionDisposition::DeferToRemote
    }
}

#[test]
fn scenario_a_engine_failure_at_lumen_keeps_only_initializer() {
    let mut target = seeded_target();
    let was_dirty = target.dirty();
    let mut engine = StubComputeEngine::new().fail_at(StageId::LumenSegmentation);

    let outcome = PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target);

    match outcome {
        RunOutcome::Failed { at, .. } => assert_eq!(at, StageId::LumenSegmentation),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(target.frontier(), 1);
    assert!(target.prefix_intact());
    assert_eq!(target.dirty(), was_dirty);
    assert!(engine.computed.is_empty());
}

#[test]
fn fail_stop_midway_commits_exactly_the_prefix() {
    let mut target = seeded_target();
    let mut engine = StubComputeEngine::new().fail_at(StageId::WallThickness);

    let outcome = PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target);

    assert!(matches!(outcome, RunOutcome::Failed { at: StageId::WallThickness, .. }));
    // comprometidos 0..=6, ausentes 7..=16
    assert_eq!(target.frontier(), StageId::WallThickness.ordinal());
    assert!(target.prefix_intact());
    assert!(target.dirty(), "stages committed in this run leave the target dirty");
    // un registro de auditoría por stage comprometido en esta corrida
    assert_eq!(target.audit().len(), StageId::WallThickness.ordinal() - 1);
}

#[test]
fn deferred_composition_suspends_then_resumes_with_local_policy() {
    let mut target = seeded_target();
    let mut engine = StubComputeEngine::new();

    let outcome = PipelineRunner::with_policy(&mut engine, &DeferPolicy).compute_remaining_stages(&mut target);
    assert_eq!(outcome, RunOutcome::Suspended { at: StageId::Composition });
    assert!(target.viable());

    // la disposición cambia a local: la corrida reanuda desde composition
    let outcome = PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target);
    assert_eq!(outcome, RunOutcome::Complete);
    assert!(target.is_complete());
}

#[test]
fn engine_precondition_blocks_like_a_gate() {
    let mut target = seeded_target();
    let mut engine = StubComputeEngine::new().block(StageId::Registration);

    let outcome = PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target);
    assert_eq!(outcome, RunOutcome::Suspended { at: StageId::Registration });

    engine.unblock(StageId::Registration);
    let outcome = PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target);
    assert_eq!(outcome, RunOutcome::Complete);
}

#[test]
fn rerun_on_complete_target_recomputes_nothing() {
    let mut target = seeded_target();
    let mut engine = StubComputeEngine::new();
    assert_eq!(PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target), RunOutcome::Complete);
    let computed_before = engine.computed.len();
    target.mark_clean();

    assert_eq!(PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target), RunOutcome::Complete);
    assert_eq!(engine.computed.len(), computed_before);
    assert!(!target.dirty());
}

#[test]
fn progress_receives_weights_stage_events_and_yields() {
    let mut target = seeded_target();
    let mut engine = StubComputeEngine::new();
    let mut progress = RecordingProgress::new();

    let outcome = PipelineRunner::new(&mut engine).compute_remaining_stages_with_progress(&mut target, &mut progress);
    assert_eq!(outcome, RunOutcome::Complete);

    // los pesos se registran antes de cualquier stage
    assert!(matches!(progress.events[0], ProgressEvent::WeightsRegistered(ref w) if w.len() == 16));
    // un yield por stage computado, siempre después de su Finished
    assert_eq!(progress.yields(), 16);
    assert_eq!(progress.finished_stages().len(), 16);
    assert_eq!(progress.finished_stages()[0], StageId::LumenSegmentation);
}

#[test]
fn cascade_notifies_viewer_with_nearest_ancestor_and_closes_engine_stages() {
    let mut target = seeded_target();
    let mut engine = StubComputeEngine::new();
    assert_eq!(PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target), RunOutcome::Complete);

    let mut viewer = RecordingViewer::new();
    let removed = clear_beyond_stage_notifying(&mut target, StageId::WallSegmentation.ordinal(), &mut engine, &mut viewer);

    assert!(removed);
    assert_eq!(target.frontier(), StageId::WallSegmentation.ordinal());
    assert_eq!(viewer.notifications, 1);
    assert_eq!(viewer.last, Some((target.id(), Some(StageId::Registration))));
    assert_eq!(viewer.last_hash.as_deref(),
               target.artifact(StageId::Registration).map(|a| a.hash.as_str()));
    // un close por stage removido (5..=16)
    assert_eq!(engine.closed.len(), 12);

    // segunda pasada: idempotente, sin nueva notificación
    let removed = clear_beyond_stage_notifying(&mut target, StageId::WallSegmentation.ordinal(), &mut engine, &mut viewer);
    assert!(!removed);
    assert_eq!(viewer.notifications, 1);
}

#[test]
fn source_imagery_change_regresses_to_initializer() {
    let mut target = seeded_target();
    let mut engine = StubComputeEngine::new();
    assert_eq!(PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target), RunOutcome::Complete);

    assert!(cascade::reset_to_initializer(&mut target));
    assert_eq!(target.frontier(), 1);
    assert!(!target.viable());
    assert_eq!(target.seed_point_count(), 1);
    assert!(target.prefix_intact());

    // el pipeline puede recomputarse desde el inicializador conservado
    assert_eq!(PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target), RunOutcome::Complete);
}

#[test]
fn prefix_invariant_holds_after_every_public_operation() {
    let mut target = seeded_target();
    let mut engine = StubComputeEngine::new().fail_at(StageId::Composition);

    let _ = PipelineRunner::new(&mut engine).compute_remaining_stages(&mut target);
    assert!(target.prefix_intact());

    cascade::clear_beyond_stage(&mut target, 4);
    assert!(target.prefix_intact());

    cascade::clear_all(&mut target);
    assert!(target.prefix_intact());
    assert_eq!(target.frontier(), 0);
}
