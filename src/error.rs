//! Error types shared across the matrix, tensor, and network modules.
//!
//! Every failure is surfaced synchronously at the point of detection; nothing
//! is retried or suppressed. Mutating operations validate their arguments
//! completely before touching any state, so a returned error always leaves
//! the receiver unchanged.

use thiserror::Error;

/// Errors produced by matrix, tensor, and network operations.
#[derive(Debug, Error)]
pub enum TensorNetError {
    /// Elementwise operands differ in dimensions.
    #[error("dimension mismatch: left is {left_rows}x{left_cols}, right is {right_rows}x{right_cols}")]
    DimensionMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    /// Inner dimensions of a matrix product disagree.
    #[error("matrices are not dot compatible: left has {left_cols} columns, right has {right_rows} rows")]
    DotDimensionMismatch { left_cols: usize, right_rows: usize },

    /// A nested-array row's length differs from its siblings.
    #[error("ragged input at depth {depth}: expected length {expected}, got {actual}")]
    RaggedInput {
        depth: usize,
        expected: usize,
        actual: usize,
    },

    /// A pushed or inserted item's shape disagrees with the tensor's sub-shape.
    #[error("item shape {actual:?} does not match expected sub-shape {expected:?}")]
    ItemShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A resolved index falls outside the underlying buffer.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Fewer indices were supplied than the tensor has dimensions.
    #[error("expected {expected} indices, got {actual}")]
    MissingIndices { expected: usize, actual: usize },

    /// Malformed external input (wrong kind of value, impossible argument).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// File access failed while persisting or restoring network state.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A state document could not be encoded or decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
