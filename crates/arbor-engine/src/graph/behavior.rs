use crate::coords::AffineFrame;
use crate::scene::Canvas;

use super::{NodeId, SceneGraph};

/// Per-node capability: what a node draws and how it animates.
///
/// Both hooks default to doing nothing, so a behavior only overrides what it
/// needs. Shapes implement [`draw_self`](Behavior::draw_self); animated nodes
/// implement [`update_self`](Behavior::update_self).
///
/// ```rust,ignore
/// struct Spin { degrees_per_sec: f32 }
///
/// impl Behavior for Spin {
///     fn update_self(&mut self, graph: &mut SceneGraph, id: NodeId, dt: f32) {
///         graph.node_mut(id).rotate(self.degrees_per_sec * dt);
///     }
/// }
/// ```
pub trait Behavior: 'static {
    /// Draws the node itself (not its children). `frame` maps the node's
    /// local coordinates to world space.
    fn draw_self(&self, canvas: &mut dyn Canvas, frame: &AffineFrame) {
        let _ = (canvas, frame);
    }

    /// Advances the node by `dt` seconds.
    ///
    /// The behavior is detached from node `id` for the duration of the call,
    /// so the graph may be mutated freely, including destroying `id`.
    fn update_self(&mut self, graph: &mut SceneGraph, id: NodeId, dt: f32) {
        let _ = (graph, id, dt);
    }
}
