//! Scene graph: a tree of transformable, drawable nodes.
//!
//! Nodes live in a [`SceneGraph`] arena and are addressed by generational
//! [`NodeId`] handles. Each node carries a local [`Transform2D`] relative to
//! its parent; world-space pose is the composition from the root down.
//!
//! What a node draws and how it animates is supplied by a [`Behavior`]
//! object (see `crate::shapes` for the built-in shapes).
//!
//! [`Transform2D`]: crate::coords::Transform2D

mod behavior;
mod error;
#[allow(clippy::module_inception)]
mod graph;
mod id;
mod node;
mod pose;

pub use behavior::Behavior;
pub use error::SceneError;
pub use graph::SceneGraph;
pub use id::NodeId;
pub use node::SceneNode;
pub use pose::Ancestors;
