//! Engine error types

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Faults the engine cannot recover from.
///
/// Stale ids, wrong node kinds and undersized panes are not errors: mutators
/// report them as `Ok(false)` and leave the tree untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Recursion went deeper than any well-formed tree can. Signals a
    /// corrupted tree, never a stale id.
    #[error("layout tree deeper than {limit} levels")]
    DepthExceeded { limit: usize },
}

/// A broken structural rule, reported by [`crate::Scene::validate`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Violation {
    #[error("container {id} has no members")]
    EmptyContainer { id: uuid::Uuid },

    #[error("group {id} wraps a single group")]
    RedundantGroup { id: uuid::Uuid },

    #[error("tab view {id} points at missing active tab {active}")]
    DanglingActiveTab { id: uuid::Uuid, active: uuid::Uuid },

    #[error("tab view {id} has tabs but no active tab")]
    MissingActiveTab { id: uuid::Uuid },

    #[error("window {id} is both minimized and maximized")]
    MinimizedAndMaximized { id: uuid::Uuid },

    #[error("stacked z-indices are not 1..={expected}: {found:?}")]
    SparseZIndex { expected: usize, found: Vec<u32> },

    #[error("id {id} appears more than once")]
    DuplicateId { id: uuid::Uuid },
}
