use thiserror::Error;

/// Errors reported by the rsmhg statistics routines.
#[derive(Debug, Error)]
pub enum MhgError {
    /// Arguments outside the documented domain of a routine.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The DP table implied by the arguments exceeds the memory ceiling.
    #[error("DP table of {cells} cells exceeds the {limit}-cell ceiling")]
    TableTooLarge { cells: usize, limit: usize },

    /// The caller's cancellation token was raised mid-computation.
    #[error("computation cancelled")]
    Cancelled,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MhgError>;
