//! Error types for detpost.

use thiserror::Error;

/// Result alias for detpost operations.
pub type DetPostResult<T> = std::result::Result<T, DetPostError>;

/// Errors that can occur while post-processing detector output.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DetPostError {
    /// The tensor buffer is shorter than its shape requires.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall {
        /// Elements required by the declared shape.
        needed: usize,
        /// Elements actually provided.
        got: usize,
    },
    /// Two tensors disagree on a dimension that must match.
    #[error("shape mismatch for {context}: expected {expected}, got {got}")]
    ShapeMismatch {
        /// Dimension size required by the contract.
        expected: usize,
        /// Dimension size observed.
        got: usize,
        /// Which dimension failed the check.
        context: &'static str,
    },
    /// A decoded class index does not resolve to a label.
    #[error("label index {index} out of range for {len} labels")]
    LabelIndexOutOfRange {
        /// The offending class index.
        index: usize,
        /// Number of labels available.
        len: usize,
    },
}
