//! Error types for document edits

use crate::NodeId;
use thiserror::Error;

/// Reasons a structural edit was refused. The tree is unchanged whenever one
/// of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Block template not found: {0}")]
    BlockNotFound(String),

    #[error("The document root cannot be moved or deleted")]
    RootImmutable,

    #[error("Cannot move {moved} into its own subtree (target {target})")]
    WouldCreateCycle { moved: NodeId, target: NodeId },

    #[error("Duplicate node id: {0}")]
    DuplicateId(NodeId),
}

impl EditError {
    /// Lookup misses are expected noise from the interaction layer
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, EditError::NodeNotFound(_) | EditError::BlockNotFound(_))
    }
}
