//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent boundary violations of the data structures.
///
/// Every variant is returned synchronously by the failing operation and the
/// structure is left exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A visitor that must be invocable was not.
    #[error("invalid argument: visit parameter must be callable, got {0}")]
    InvalidArgument(String),

    /// Removal attempted on an empty structure.
    #[error("{structure} underflow: attempted to remove from an empty {structure}")]
    Underflow { structure: &'static str },

    /// Insertion attempted on a full fixed-capacity structure.
    #[error("stack overflow: attempted to insert on a full stack (capacity {capacity})")]
    Overflow { capacity: usize },

    /// An arena handle that does not (or no longer) refer to a live node.
    #[error("invalid node handle: {0}")]
    InvalidHandle(String),

    /// The requested child slot of an arena node is already taken.
    #[error("{side} child of node {parent} is already occupied")]
    ChildOccupied { parent: String, side: Side },
}

impl DomainError {
    /// Overflow and underflow both belong to the indexing/bounds error class.
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::Overflow { .. } | Self::Underflow { .. })
    }
}

/// Child slot of a binary tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
