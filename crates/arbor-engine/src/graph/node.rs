use crate::coords::{Point2D, Transform2D};

use super::{Behavior, NodeId};

/// A node in the scene tree.
///
/// Holds the local transform (relative to the parent), the visibility flag
/// and an optional [`Behavior`]. Tree links are read-only here; structural
/// changes go through [`SceneGraph`](super::SceneGraph) so the parent and
/// child lists can never disagree.
pub struct SceneNode {
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) behavior: Option<Box<dyn Behavior>>,
    transform: Transform2D,
    showing: bool,
}

impl SceneNode {
    pub(super) fn new(parent: Option<NodeId>, behavior: Option<Box<dyn Behavior>>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            behavior,
            transform: Transform2D::IDENTITY,
            showing: true,
        }
    }

    // ── links ─────────────────────────────────────────────────────────────

    /// `None` only for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in draw order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    // ── local transform ───────────────────────────────────────────────────

    #[inline]
    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    #[inline]
    pub(super) fn set_transform(&mut self, transform: Transform2D) {
        self.transform = transform;
    }

    #[inline]
    pub fn position(&self) -> Point2D {
        self.transform.translation()
    }

    #[inline]
    pub fn set_position(&mut self, position: Point2D) -> &mut Self {
        self.transform.set_translation(position);
        self
    }

    /// Moves the node by `(dx, dy)` in its parent's coordinates.
    #[inline]
    pub fn translate(&mut self, dx: f32, dy: f32) -> &mut Self {
        let p = self.transform.translation().translate(dx, dy);
        self.transform.set_translation(p);
        self
    }

    /// Local rotation in degrees, within `[-180, 180)`.
    #[inline]
    pub fn rotation(&self) -> f32 {
        self.transform.rotation()
    }

    #[inline]
    pub fn set_rotation(&mut self, degrees: f32) -> &mut Self {
        self.transform.set_rotation(degrees);
        self
    }

    #[inline]
    pub fn rotate(&mut self, degrees: f32) -> &mut Self {
        let r = self.transform.rotation() + degrees;
        self.transform.set_rotation(r);
        self
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.transform.scale()
    }

    #[inline]
    pub fn set_scale(&mut self, scale: f32) -> &mut Self {
        self.transform.set_scale(scale);
        self
    }

    /// Multiplies the local scale by `factor`.
    #[inline]
    pub fn scale_by(&mut self, factor: f32) -> &mut Self {
        let s = self.transform.scale() * factor;
        self.transform.set_scale(s);
        self
    }

    // ── visibility ────────────────────────────────────────────────────────

    /// Whether this node is drawn. A hidden node hides its whole subtree;
    /// descendants keep their own flags.
    #[inline]
    pub fn is_showing(&self) -> bool {
        self.showing
    }

    #[inline]
    pub fn show(&mut self, showing: bool) -> &mut Self {
        self.showing = showing;
        self
    }

    // ── behavior ──────────────────────────────────────────────────────────

    /// `None` for plain grouping nodes, and while the behavior is running its
    /// own update.
    #[inline]
    pub fn behavior(&self) -> Option<&dyn Behavior> {
        self.behavior.as_deref()
    }

    /// Replaces the node's behavior, returning the previous one.
    pub fn set_behavior(&mut self, behavior: impl Behavior) -> Option<Box<dyn Behavior>> {
        self.behavior.replace(Box::new(behavior))
    }

    pub fn clear_behavior(&mut self) -> Option<Box<dyn Behavior>> {
        self.behavior.take()
    }
}

impl std::fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneNode")
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("transform", &self.transform)
            .field("showing", &self.showing)
            .field("has_behavior", &self.behavior.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_identity_and_showing() {
        let n = SceneNode::new(None, None);
        assert_eq!(n.position(), Point2D::zero());
        assert_eq!(n.rotation(), 0.0);
        assert_eq!(n.scale(), 1.0);
        assert!(n.is_showing());
        assert!(n.behavior().is_none());
    }

    #[test]
    fn set_rotation_normalizes() {
        let mut n = SceneNode::new(None, None);
        n.set_rotation(370.0);
        assert_eq!(n.rotation(), 10.0);
    }

    #[test]
    fn rotating_full_circle_in_steps_returns_to_zero() {
        let mut n = SceneNode::new(None, None);
        for _ in 0..36 {
            n.rotate(10.0);
        }
        assert_eq!(n.rotation(), 0.0);
    }

    #[test]
    fn scale_by_is_multiplicative() {
        let mut n = SceneNode::new(None, None);
        n.set_scale(2.0).scale_by(1.5).scale_by(0.5);
        assert_eq!(n.scale(), 1.5);
    }

    #[test]
    fn translate_accumulates() {
        let mut n = SceneNode::new(None, None);
        n.translate(1.0, 2.0).translate(-3.0, 0.5);
        assert_eq!(n.position(), Point2D::new(-2.0, 2.5));
    }
}
