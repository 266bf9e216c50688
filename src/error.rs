//! Calculator error types

use thiserror::Error;

/// Errors surfaced by registry lookups and input validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Drug not found: '{0}'")]
    DrugNotFound(String),

    #[error("Unknown species: '{0}' (expected mouse, rat, hamster or guinea_pig)")]
    UnknownSpecies(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;
