use std::fmt;

use super::NodeId;

/// Rejected scene graph operation.
///
/// Returned before any link is modified; the graph is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// An ancestor in the target chain has zero scale, so no local transform
    /// can reproduce the node's global pose.
    DegenerateScale { ancestor: NodeId },
    /// The new parent is the node itself or one of its descendants.
    Cycle { node: NodeId, parent: NodeId },
    /// The root has no parent and cannot be moved.
    RootReparent,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::DegenerateScale { ancestor } => {
                write!(f, "cannot reparent: ancestor {ancestor} has a non-invertible scale")
            }
            SceneError::Cycle { node, parent } => {
                write!(f, "cannot reparent {node} under {parent}: {parent} is in its own subtree")
            }
            SceneError::RootReparent => write!(f, "the root node cannot be reparented"),
        }
    }
}

impl std::error::Error for SceneError {}
