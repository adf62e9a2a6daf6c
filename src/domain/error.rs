//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the content graph invariants.
///
/// Traversal and rendering never fail; these only occur while a site
/// graph is being assembled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown parent '{parent}' referenced by node '{node}'")]
    UnknownParent { node: String, parent: String },

    #[error("duplicate node name: {0}")]
    DuplicateNode(String),

    #[error("cycle detected in hierarchy: {0}")]
    CycleDetected(String),

    #[error("site has no root node")]
    NoRoot,

    #[error("site has more than one root node: {}", .0.join(", "))]
    MultipleRoots(Vec<String>),

    #[error("start page not found: {0}")]
    UnknownStartPage(String),
}
