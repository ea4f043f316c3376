//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from repositories and request validation so clients can
//! bubble them up with consistent context.
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("draw count {count} must be between 1 and {max}")]
    InvalidCount { count: usize, max: usize },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("service requires oracles to be configured before building")]
    MissingOracles,

    #[error("service requires a state repository to be configured before building")]
    MissingRepository,
}

impl gacha_core::GachaError for RuntimeError {
    fn severity(&self) -> gacha_core::ErrorSeverity {
        match self {
            Self::InvalidCount { .. } => gacha_core::ErrorSeverity::Validation,
            _ => gacha_core::ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCount { .. } => "RUNTIME_INVALID_COUNT",
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::MissingOracles => "RUNTIME_MISSING_ORACLES",
            Self::MissingRepository => "RUNTIME_MISSING_REPOSITORY",
        }
    }
}
