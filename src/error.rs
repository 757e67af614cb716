use thiserror::Error;

/// The result type used throughout the crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Precondition violations raised by layers, networks and their collaborators.
///
/// None of these are transient: the requested operation is aborted and the
/// caller decides how to recover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// A vector's length disagrees with the receiving layer's declared size.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Forward or backward pass requested on a network with no layers.
    #[error("network has no layers")]
    EmptyNetwork,

    /// A cached vector was needed before any pass populated it.
    #[error("uninitialized state: {what} has not been computed yet")]
    UninitializedState { what: &'static str },

    /// Introspection coordinate outside the valid bounds.
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Every candidate output was rejected by the caller's selection rule.
    #[error("no valid selection among the network outputs")]
    NoValidSelection,

    /// A layer was declared with zero inputs or zero neurons.
    #[error("layer {position} has a zero-sized dimension")]
    ZeroSizedLayer { position: usize },

    /// Malformed or invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        NetworkError::Config(err.to_string())
    }
}
