//! World-space queries and pose-preserving reparenting.

use crate::coords::{normalize_degrees, AffineFrame, Point2D, Transform2D};

use super::{NodeId, SceneError, SceneGraph};

/// Iterator over a node's ancestors, nearest first, ending at the root.
pub struct Ancestors<'a> {
    graph: &'a SceneGraph,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.graph.get(id).and_then(|n| n.parent());
        Some(id)
    }
}

impl SceneGraph {
    /// Ancestors of `id`, from its parent up to the root.
    #[track_caller]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors { graph: self, next: self.node(id).parent() }
    }

    /// `id` followed by its ancestors, reversed: root first, `id` last.
    fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = std::iter::once(id).chain(self.ancestors(id)).collect();
        path.reverse();
        path
    }

    fn compose_path(&self, path: &[NodeId]) -> AffineFrame {
        path.iter().fold(AffineFrame::identity(), |frame, &n| {
            self.node(n).transform().frame_within(&frame)
        })
    }

    /// Frame mapping `id`'s local coordinates to world space.
    #[track_caller]
    pub fn global_frame(&self, id: NodeId) -> AffineFrame {
        self.compose_path(&self.path_from_root(id))
    }

    /// Frame of `id`'s parent in world space (identity for the root).
    #[track_caller]
    pub fn parent_frame(&self, id: NodeId) -> AffineFrame {
        let path = self.path_from_root(id);
        self.compose_path(&path[..path.len() - 1])
    }

    /// World-space position of the node's origin.
    #[track_caller]
    pub fn global_position(&self, id: NodeId) -> Point2D {
        self.parent_frame(id).apply(self.node(id).position())
    }

    /// Sum of local rotations from the root down to `id`, normalized.
    #[track_caller]
    pub fn global_rotation(&self, id: NodeId) -> f32 {
        let total: f32 = self
            .path_from_root(id)
            .iter()
            .map(|&n| self.node(n).rotation())
            .sum();
        normalize_degrees(total)
    }

    /// Product of local scales from the root down to `id`.
    #[track_caller]
    pub fn global_scale(&self, id: NodeId) -> f32 {
        self.path_from_root(id)
            .iter()
            .map(|&n| self.node(n).scale())
            .product()
    }

    /// Moves `id` under `parent` without changing its world pose.
    ///
    /// The node is appended to `parent`'s child list. Its new local transform
    /// is derived from the captured global position, rotation and scale:
    /// position through the inverse of the parent's world frame, rotation
    /// minus the chain's rotations, scale divided by the chain's scales.
    ///
    /// # Errors
    /// - [`SceneError::RootReparent`] if `id` is the root
    /// - [`SceneError::Cycle`] if `parent` is `id` or one of its descendants
    /// - [`SceneError::DegenerateScale`] if any node from `parent` up to the
    ///   root has a scale that cannot be inverted
    ///
    /// On error the graph is left untouched.
    ///
    /// # Panics
    /// Panics if either handle is stale.
    #[track_caller]
    pub fn set_parent(&mut self, id: NodeId, parent: NodeId) -> Result<(), SceneError> {
        assert!(self.contains(id), "cannot reparent stale node {id}");
        assert!(self.contains(parent), "cannot reparent under stale node {parent}");

        if id == self.root() {
            return Err(SceneError::RootReparent);
        }
        if parent == id || self.is_ancestor(id, parent) {
            log::warn!("rejected reparent of {id} under its descendant {parent}");
            return Err(SceneError::Cycle { node: id, parent });
        }

        let position = self.global_position(id);
        let rotation = self.global_rotation(id);
        let scale = self.global_scale(id);

        // Inverse of root..=parent, accumulated leaf to root.
        let mut to_local = AffineFrame::identity();
        let mut chain_rotation = 0.0f32;
        let mut chain_scale = 1.0f32;
        for ancestor in std::iter::once(parent).chain(self.ancestors(parent)) {
            let t = self.node(ancestor).transform();
            let Some(inverse) = t.inverse_frame() else {
                log::warn!("rejected reparent of {id}: ancestor {ancestor} has scale {}", t.scale());
                return Err(SceneError::DegenerateScale { ancestor });
            };
            to_local = to_local.compose(&inverse);
            chain_rotation += t.rotation();
            chain_scale *= t.scale();
        }
        if chain_scale == 0.0 || !chain_scale.is_finite() {
            return Err(SceneError::DegenerateScale { ancestor: parent });
        }

        let old_parent = self.parent(id);
        self.unlink(id);
        self.link(id, parent);

        let local = Transform2D::new(
            to_local.apply(position),
            rotation - chain_rotation,
            scale / chain_scale,
        );
        self.node_mut(id).set_transform(local);

        log::debug!(
            "reparented {id}: {old_parent:?} -> {parent}, local pos ({:.3}, {:.3}) rot {:.2} scale {:.3}",
            local.translation().x,
            local.translation().y,
            local.rotation(),
            local.scale(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn angle_close(a: f32, b: f32) -> bool {
        normalize_degrees(a - b).abs() <= EPS
    }

    fn pose(g: &SceneGraph, id: NodeId) -> (Point2D, f32, f32) {
        (g.global_position(id), g.global_rotation(id), g.global_scale(id))
    }

    fn assert_pose_eq(before: (Point2D, f32, f32), after: (Point2D, f32, f32)) {
        assert!(before.0.approx_eq(after.0, EPS), "position {:?} -> {:?}", before.0, after.0);
        assert!(angle_close(before.1, after.1), "rotation {} -> {}", before.1, after.1);
        assert!((before.2 - after.2).abs() <= EPS, "scale {} -> {}", before.2, after.2);
    }

    #[test]
    fn nested_translation_scenario() {
        let mut g = SceneGraph::new();
        let r = g.root();
        let a = g.create(r);
        g.node_mut(a).translate(10.0, 0.0);
        let b = g.create(a);
        g.node_mut(b).translate(5.0, 0.0);

        assert_eq!(g.global_position(b), Point2D::new(15.0, 0.0));

        g.set_parent(b, r).unwrap();

        assert_eq!(g.global_position(b), Point2D::new(15.0, 0.0));
        assert_eq!(g.node(b).position(), Point2D::new(15.0, 0.0));
        assert_eq!(g.parent(b), Some(r));
        assert_eq!(g.children(r), &[a, b]);
        assert!(g.children(a).is_empty());
    }

    #[test]
    fn global_rotation_sums_and_normalizes() {
        let mut g = SceneGraph::new();
        let a = g.create(g.root());
        g.node_mut(a).set_rotation(170.0);
        let b = g.create(a);
        g.node_mut(b).set_rotation(20.0);

        assert!(angle_close(g.global_rotation(b), -170.0));
        assert!((-180.0..180.0).contains(&g.global_rotation(b)));
    }

    #[test]
    fn global_scale_is_product() {
        let mut g = SceneGraph::new();
        g.node_mut(g.root()).set_scale(2.0);
        let a = g.create(g.root());
        g.node_mut(a).set_scale(0.5);
        let b = g.create(a);
        g.node_mut(b).set_scale(3.0);

        assert_eq!(g.global_scale(b), 3.0);
    }

    #[test]
    fn global_position_accounts_for_rotation_and_scale() {
        let mut g = SceneGraph::new();
        let a = g.create(g.root());
        g.node_mut(a).translate(1.0, 1.0).set_rotation(90.0).set_scale(2.0);
        let b = g.create(a);
        g.node_mut(b).translate(1.0, 0.0);

        // (1,0) scaled to (2,0), rotated to (0,2), moved to (1,3).
        assert!(g.global_position(b).approx_eq(Point2D::new(1.0, 3.0), 1e-5));
        assert!(g.global_frame(b).origin().approx_eq(g.global_position(b), 1e-5));
    }

    #[test]
    fn reparent_preserves_pose_across_rotated_scaled_branches() {
        let mut g = SceneGraph::new();
        let root = g.root();
        g.node_mut(root).translate(-0.5, 0.25).set_rotation(12.0);

        let a = g.create(root);
        g.node_mut(a).translate(3.0, -1.0).set_rotation(75.0).set_scale(1.5);
        let b = g.create(a);
        g.node_mut(b).translate(-2.0, 4.0).set_rotation(-140.0).set_scale(0.4);
        let moving = g.create(b);
        g.node_mut(moving).translate(1.0, 2.0).set_rotation(33.0).set_scale(2.5);

        let c = g.create(root);
        g.node_mut(c).translate(6.0, 6.0).set_rotation(-100.0).set_scale(3.0);
        let d = g.create(c);
        g.node_mut(d).translate(0.5, -0.5).set_rotation(170.0).set_scale(0.8);

        let before = pose(&g, moving);
        g.set_parent(moving, d).unwrap();
        assert_pose_eq(before, pose(&g, moving));
        assert_eq!(g.parent(moving), Some(d));

        g.set_parent(moving, root).unwrap();
        assert_pose_eq(before, pose(&g, moving));
    }

    #[test]
    fn reparent_carries_subtree_along() {
        let mut g = SceneGraph::new();
        let a = g.create(g.root());
        g.node_mut(a).translate(2.0, 0.0).set_rotation(45.0);
        let b = g.create(a);
        g.node_mut(b).translate(1.0, 0.0).set_scale(2.0);
        let leaf = g.create(b);
        g.node_mut(leaf).translate(0.0, 1.0);

        let target = g.create(g.root());
        g.node_mut(target).translate(-5.0, 3.0).set_rotation(-30.0).set_scale(0.5);

        let leaf_before = pose(&g, leaf);
        g.set_parent(b, target).unwrap();
        assert_pose_eq(leaf_before, pose(&g, leaf));
        assert_eq!(g.parent(leaf), Some(b));
    }

    #[test]
    fn reparent_to_same_parent_moves_to_back() {
        let mut g = SceneGraph::new();
        let r = g.root();
        let a = g.create(r);
        let b = g.create(r);
        g.node_mut(a).translate(1.0, 2.0);

        g.set_parent(a, r).unwrap();

        assert_eq!(g.children(r), &[b, a]);
        assert_eq!(g.node(a).position(), Point2D::new(1.0, 2.0));
    }

    #[test]
    fn reparent_under_zero_scale_is_rejected_without_change() {
        let mut g = SceneGraph::new();
        let r = g.root();
        let flat = g.create(r);
        g.node_mut(flat).set_scale(0.0);
        let under_flat = g.create(flat);
        let a = g.create(r);
        g.node_mut(a).translate(1.0, 1.0);

        assert_eq!(g.set_parent(a, under_flat), Err(SceneError::DegenerateScale { ancestor: flat }));
        assert_eq!(g.parent(a), Some(r));
        assert_eq!(g.node(a).position(), Point2D::new(1.0, 1.0));
        assert!(g.children(under_flat).is_empty());
    }

    #[test]
    fn reparent_under_descendant_is_rejected() {
        let mut g = SceneGraph::new();
        let a = g.create(g.root());
        let b = g.create(a);
        let c = g.create(b);

        assert_eq!(g.set_parent(a, c), Err(SceneError::Cycle { node: a, parent: c }));
        assert_eq!(g.set_parent(a, a), Err(SceneError::Cycle { node: a, parent: a }));
        assert_eq!(g.parent(a), Some(g.root()));
    }

    #[test]
    fn root_cannot_be_reparented() {
        let mut g = SceneGraph::new();
        let a = g.create(g.root());
        assert_eq!(g.set_parent(g.root(), a), Err(SceneError::RootReparent));
    }

    #[test]
    fn ancestors_walk_to_root() {
        let mut g = SceneGraph::new();
        let a = g.create(g.root());
        let b = g.create(a);
        let c = g.create(b);

        let chain: Vec<NodeId> = g.ancestors(c).collect();
        assert_eq!(chain, vec![b, a, g.root()]);
        assert_eq!(g.ancestors(g.root()).count(), 0);
        assert!(g.is_ancestor(a, c));
        assert!(!g.is_ancestor(c, a));
    }
}
