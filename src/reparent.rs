//! Drop-target resolution and subtree relocation
//!
//! A drag can end over a node, over a container, or over empty canvas. The
//! resolver turns that reference into a concrete parent:
//!
//! 1. the document root never moves;
//! 2. a node is never moved into itself or one of its container
//!    descendants;
//! 3. a drop over a container-capable node appends to that node;
//! 4. anything else (non-container, unknown id, canvas) appends to the root.
//!
//! All checks run before the subtree is detached, so a refused move leaves
//! the tree exactly as it was.

use crate::error::EditError;
use crate::node::{Node, NodeId};
use serde::{Deserialize, Serialize};

/// What a drag was released over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropTarget {
    /// A rendered node
    Node(NodeId),
    /// Empty canvas background
    Canvas,
}

impl From<NodeId> for DropTarget {
    fn from(id: NodeId) -> Self {
        DropTarget::Node(id)
    }
}

/// Where a relocated subtree landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Appended to the node the drag ended over
    Target(NodeId),
    /// No usable target; appended to the document root
    RootFallback,
}

impl Placement {
    pub fn parent(&self) -> NodeId {
        match self {
            Placement::Target(id) => *id,
            Placement::RootFallback => NodeId::ROOT,
        }
    }
}

/// Outcome of a successful relocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub moved: NodeId,
    pub from: NodeId,
    pub placement: Placement,
}

/// Pick the parent for a drop over `target` in `tree`
pub fn resolve_drop(tree: &Node, target: DropTarget) -> Placement {
    match target {
        DropTarget::Node(id) => match tree.find(id) {
            Some(node) if node.kind.is_drop_container() => Placement::Target(id),
            _ => Placement::RootFallback,
        },
        DropTarget::Canvas => Placement::RootFallback,
    }
}

/// Refuse moves that would detach the root or nest a node inside its own
/// subtree
pub fn check_move(tree: &Node, active: NodeId, target: DropTarget) -> Result<(), EditError> {
    if active.is_root() {
        return Err(EditError::RootImmutable);
    }

    let moved = tree.find(active).ok_or(EditError::NodeNotFound(active))?;

    // A non-container inside the moved subtree resolves to the root anyway
    if let DropTarget::Node(target_id) = target {
        let nests_into_itself = moved
            .find(target_id)
            .is_some_and(|node| node.kind.is_drop_container());
        if nests_into_itself {
            return Err(EditError::WouldCreateCycle {
                moved: active,
                target: target_id,
            });
        }
    }

    Ok(())
}

/// Detach the subtree at `active` and append it under the resolved parent.
/// `tree` must be the document root.
pub fn relocate(tree: &mut Node, active: NodeId, target: DropTarget) -> Result<Relocation, EditError> {
    check_move(tree, active, target)?;

    let from = tree.parent_of(active).ok_or(EditError::NodeNotFound(active))?;
    let detached = tree
        .remove_descendant(active)
        .ok_or(EditError::NodeNotFound(active))?;

    let placement = resolve_drop(tree, target);
    match tree.find_mut(placement.parent()) {
        Some(parent) => {
            parent.children.push(detached);
            Ok(Relocation {
                moved: active,
                from,
                placement,
            })
        }
        None => {
            // The root is always present; the fallback keeps the subtree alive
            tree.children.push(detached);
            Ok(Relocation {
                moved: active,
                from,
                placement: Placement::RootFallback,
            })
        }
    }
}
