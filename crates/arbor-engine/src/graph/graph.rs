use std::collections::VecDeque;

use crate::coords::AffineFrame;
use crate::scene::Canvas;

use super::{Behavior, NodeId, SceneNode};

struct Slot {
    generation: u32,
    node: Option<SceneNode>,
}

/// Arena-backed scene tree.
///
/// Every node lives in the arena and is addressed by a [`NodeId`]. Parents
/// hold ordered child handles; children hold a non-owning parent handle. The
/// root is created with the graph and is never freed.
///
/// Passing a stale handle to an accessor that returns a node (rather than an
/// `Option`) is a contract violation and panics.
pub struct SceneGraph {
    slots: Vec<Slot>,
    /// Freed slot indices, recycled FIFO so generations spread across slots.
    free: VecDeque<u32>,
    root: NodeId,
    len: usize,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot { generation: 0, node: Some(SceneNode::new(None, None)) }],
            free: VecDeque::new(),
            root: NodeId::new(0, 0),
            len: 1,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: the root is never freed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        let slot = self.slots.get(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        let slot = self.slots.get_mut(id.index() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.node.as_mut()
    }

    /// # Panics
    /// Panics if `id` is stale.
    #[track_caller]
    pub fn node(&self, id: NodeId) -> &SceneNode {
        match self.get(id) {
            Some(node) => node,
            None => panic!("stale scene node handle {id}"),
        }
    }

    /// # Panics
    /// Panics if `id` is stale.
    #[track_caller]
    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("stale scene node handle {id}"),
        }
    }

    #[inline]
    #[track_caller]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    #[inline]
    #[track_caller]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Handles of all live nodes, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.node.as_ref().map(|_| NodeId::new(i as u32, slot.generation))
        })
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Creates an empty node at the end of `parent`'s child list.
    ///
    /// The node starts at the parent's origin with identity rotation and
    /// scale, and is showing.
    #[track_caller]
    pub fn create(&mut self, parent: NodeId) -> NodeId {
        self.attach(parent, None)
    }

    /// Like [`create`](Self::create), with a behavior installed.
    #[track_caller]
    pub fn create_with(&mut self, parent: NodeId, behavior: impl Behavior) -> NodeId {
        self.attach(parent, Some(Box::new(behavior)))
    }

    #[track_caller]
    fn attach(&mut self, parent: NodeId, behavior: Option<Box<dyn Behavior>>) -> NodeId {
        assert!(self.contains(parent), "cannot create a child of stale node {parent}");

        let id = self.allocate(SceneNode::new(Some(parent), behavior));
        self.node_mut(parent).children.push(id);
        log::trace!("created node {id} under {parent}");
        id
    }

    /// Removes `id` and its whole subtree.
    ///
    /// Children are destroyed first (depth-first, over a snapshot of each
    /// child list), then the node unlinks itself from its parent and its slot
    /// is freed. Stale handles are ignored, so destroying twice is harmless.
    /// Destroying the root clears the tree but keeps the root itself.
    pub fn destroy(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };

        let children = node.children.clone();
        for child in children {
            self.destroy(child);
        }

        if id == self.root {
            return;
        }

        self.unlink(id);
        self.release(id);
        log::trace!("destroyed node {id}");
    }

    /// Returns `true` if `ancestor` lies strictly above `id`.
    #[track_caller]
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    // ── traversal ─────────────────────────────────────────────────────────

    /// Draws the whole tree starting at the root with the identity frame.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.draw_subtree(self.root, canvas, &AffineFrame::identity());
    }

    /// Draws `id` and its descendants inside `frame`.
    ///
    /// A hidden node returns immediately; its subtree is skipped entirely.
    #[track_caller]
    pub fn draw_subtree(&self, id: NodeId, canvas: &mut dyn Canvas, frame: &AffineFrame) {
        let node = self.node(id);
        if !node.is_showing() {
            return;
        }

        let frame = node.transform().frame_within(frame);
        if let Some(behavior) = node.behavior() {
            behavior.draw_self(canvas, &frame);
        }

        for &child in &node.children {
            self.draw_subtree(child, canvas, &frame);
        }
    }

    /// Advances every node by `dt` seconds, parents before children.
    pub fn update(&mut self, dt: f32) {
        self.update_subtree(self.root, dt);
    }

    /// Updates `id` then a snapshot of its children.
    ///
    /// Each child list is snapshotted right after its owner's own update, so
    /// children a node spawns for itself run in the same pass while nodes
    /// attached to an already-snapshotted list wait for the next one. Nodes
    /// destroyed mid-pass are skipped. Stale handles are ignored.
    pub fn update_subtree(&mut self, id: NodeId, dt: f32) {
        let Some(node) = self.get_mut(id) else { return };

        if let Some(mut behavior) = node.behavior.take() {
            behavior.update_self(self, id, dt);

            // Reattach unless the node died or got a new behavior meanwhile.
            if let Some(node) = self.get_mut(id) {
                if node.behavior.is_none() {
                    node.behavior = Some(behavior);
                }
            }
        }

        let Some(node) = self.get(id) else { return };
        let children = node.children.clone();
        for child in children {
            self.update_subtree(child, dt);
        }
    }

    // ── links + arena ─────────────────────────────────────────────────────

    pub(super) fn unlink(&mut self, id: NodeId) {
        let Some(parent) = self.get_mut(id).and_then(|n| n.parent.take()) else { return };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|&c| c != id);
        }
    }

    pub(super) fn link(&mut self, id: NodeId, parent: NodeId) {
        debug_assert!(self.node(id).parent.is_none(), "link called on attached node {id}");
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn allocate(&mut self, node: SceneNode) -> NodeId {
        self.len += 1;
        if let Some(index) = self.free.pop_front() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot { generation: 0, node: Some(node) });
            NodeId::new(index, 0)
        }
    }

    fn release(&mut self, id: NodeId) {
        let Some(slot) = self.slots.get_mut(id.index() as usize) else { return };
        if slot.generation != id.generation() || slot.node.take().is_none() {
            return;
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push_back(id.index());
        self.len -= 1;
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneGraph")
            .field("root", &self.root)
            .field("len", &self.len)
            .finish()
    }
}
