//! Errores específicos del core (simples por ahora).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum PipelineError {
    #[error("invalid stage ordinal {0}")] InvalidStageOrdinal(usize),
    #[error("target run already in flight")] RunInFlight,
    #[error("internal: {0}")] Internal(String),
}
