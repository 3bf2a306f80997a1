//! vessel-adapters: dobles deterministas de los colaboradores externos.
//!
//! El motor de cómputo real (ITK/VTK) vive fuera de este workspace; aquí se
//! provee un stub determinista por stage más reporters/viewers que graban lo
//! observado, para tests y para el binario de validación.

pub mod progress;
pub mod stub_engine;
pub mod viewer;

pub use progress::{ProgressEvent, RecordingProgress};
pub use stub_engine::StubComputeEngine;
pub use viewer::RecordingViewer;
