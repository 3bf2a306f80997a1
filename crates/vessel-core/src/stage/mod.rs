//! Definiciones relacionadas a Stages.
//!
//! Un stage es un paso nombrado dentro de la cadena fija y ordenada que se
//! aplica a cada target. Este módulo define:
//! - `StageId`: identidad y orden total de los 17 stages.
//! - `StageDescriptor` / `StageRegistry`: definición estática de la cadena
//!   (sufijo de archivo, formato, gate de precondición, peso de progreso).

pub mod id;
pub mod registry;

pub use id::StageId;
pub use registry::{registry, StageDescriptor, StageGate, StageRegistry};
