//! vessel-core: Maquinaria de stages del pipeline por target
pub mod cascade;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod hashing;
pub mod model;
pub mod progress;
pub mod runner;
pub mod stage;
pub mod target;


pub use cascade::{clear_all, clear_beyond_stage, clear_beyond_stage_notifying, reset_to_initializer, RepresentativeViewer};
pub use engine::{CompositionDisposition, CompositionPolicy, ComputeEngine, EngineError, LocalComposition};
pub use errors::PipelineError;
pub use model::{Artifact, ArtifactKind, FileFormat};
pub use progress::{NullProgress, ProgressReporter};
pub use runner::{PipelineRunner, RunOutcome};
pub use stage::{registry, StageDescriptor, StageGate, StageId, StageRegistry};
pub use target::{StageAuditRecord, Target};
