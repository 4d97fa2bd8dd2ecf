use thiserror::Error;

/// Custom error type for the scalargrad engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum ScalarGradError {
    #[error("Unknown node: index {index} does not name a live node of this {len}-node graph")]
    UnknownNode { index: usize, len: usize },

    #[error("Invalid exponent: pow expects a numeric constant, got a graph node")]
    InvalidExponent,

    #[error("Length mismatch during {operation}: expected {expected}, got {actual}")]
    LengthMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Node {index} is not a leaf; its value is determined by its operator")]
    NotALeaf { index: usize },

    #[error("Invalid architecture: {0}")]
    InvalidArchitecture(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}
