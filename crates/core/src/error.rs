//! Error types for the simulation core.
//!
//! Invalid coordinates are ordinary results that callers may ignore; they never
//! abort a tick. Invariant violations are programming errors and go through
//! [`fault`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("slot out of range: row {row}, col {col}")]
    OutOfRange { row: usize, col: usize },
    #[error("swap rejected at row {row}, col {col}")]
    SwapRejected { row: usize, col: usize },
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("internal consistency fault: {0}")]
    Invariant(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Report an internal-consistency fault.
///
/// Fatal in debug builds. In release builds the fault is logged and the caller
/// is expected to normalise the offending state.
pub fn fault(err: &CoreError) {
    if cfg!(debug_assertions) {
        panic!("{err}");
    }
    tracing::warn!(error = %err, "normalising after internal fault");
}
