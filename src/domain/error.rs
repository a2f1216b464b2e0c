//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the frame tree's preconditions.
/// All of them are raised synchronously by the call that broke the rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame already exists: {0}")]
    DuplicateName(String),

    #[error("unknown frame: {0}")]
    UnknownFrame(String),

    #[error("transform from {0} to the root frame is not invertible")]
    SingularTransform(String),
}

/// Result type for frame tree operations.
pub type FrameResult<T> = Result<T, FrameError>;
