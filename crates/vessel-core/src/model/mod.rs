//! Modelos neutrales (Artifact, formatos de archivo)

pub mod artifact;
pub mod format;

pub use artifact::{Artifact, ArtifactKind};
pub use format::FileFormat;
