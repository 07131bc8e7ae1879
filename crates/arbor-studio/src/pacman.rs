use std::f32::consts::TAU;

use arbor_engine::coords::{AffineFrame, Point2D};
use arbor_engine::graph::{Behavior, NodeId, SceneGraph};
use arbor_engine::paint::Color;
use arbor_engine::scene::Canvas;
use arbor_engine::shapes::{CircleShape, Polygon2D, PolygonShape};

use crate::shared::Shared;

const PACMAN_SCALE: f32 = 0.05;
const DRIFT_SPEED: f32 = 0.12;
const CHOMPS_PER_SECOND: f32 = 3.0;

/// Moves the node along +x, wrapping at the world edges.
struct Drift {
    shared: Shared,
    speed: f32,
}

impl Behavior for Drift {
    fn update_self(&mut self, graph: &mut SceneGraph, id: NodeId, dt: f32) {
        let node = graph.node_mut(id);
        let next = self.shared.wrap(node.position().translate(self.speed * dt, 0.0));
        node.set_position(next);
    }
}

/// Black wedge whose scale pulses, opening and closing the mouth.
struct Chomp {
    shape: PolygonShape,
    phase: f32,
}

impl Behavior for Chomp {
    fn draw_self(&self, canvas: &mut dyn Canvas, frame: &AffineFrame) {
        self.shape.draw_self(canvas, frame);
    }

    fn update_self(&mut self, graph: &mut SceneGraph, id: NodeId, dt: f32) {
        self.phase = (self.phase + dt * CHOMPS_PER_SECOND * TAU) % TAU;
        graph.node_mut(id).set_scale(0.55 + 0.45 * self.phase.sin());
    }
}

/// Builds the pacman composite under `parent`: a yellow body, a chomping
/// mouth and three dots ahead of it, all in a local frame scaled to 0.05.
pub fn spawn(graph: &mut SceneGraph, parent: NodeId, shared: &Shared, at: Point2D) -> NodeId {
    let pacman = graph.create_with(parent, Drift { shared: shared.clone(), speed: DRIFT_SPEED });
    graph.node_mut(pacman).set_position(at).set_scale(PACMAN_SCALE);

    graph.create_with(pacman, CircleShape::new(2.0, Some(Color::YELLOW), None));

    let mouth = Polygon2D::from_coords(&[0.0, 0.0, 2.0, 1.5, 2.0, -1.5]);
    graph.create_with(
        pacman,
        Chomp { shape: PolygonShape::new(mouth, Some(Color::BLACK), None), phase: 0.0 },
    );

    for x in [4.0, 8.0, 12.0] {
        let dot = graph.create_with(pacman, CircleShape::new(0.4, Some(Color::WHITE), None));
        graph.node_mut(dot).set_position(Point2D::new(x, 0.0));
    }

    log::debug!("spawned pacman {pacman}");
    pacman
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_engine::scene::DrawList;

    #[test]
    fn dots_sit_ahead_of_the_body_in_world_space() {
        let mut graph = SceneGraph::new();
        let shared = Shared::new();
        let root = graph.root();
        let pacman = spawn(&mut graph, root, &shared, Point2D::new(0.5, 0.0));

        let children = graph.children(pacman).to_vec();
        assert_eq!(children.len(), 5);

        let last_dot = graph.global_position(children[4]);
        assert!(last_dot.approx_eq(Point2D::new(0.5 + 12.0 * 0.05, 0.0), 1e-5), "{last_dot:?}");
        assert!((graph.global_scale(children[0]) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn draws_body_mouth_then_dots() {
        let mut graph = SceneGraph::new();
        let shared = Shared::new();
        let root = graph.root();
        spawn(&mut graph, root, &shared, Point2D::zero());

        let mut list = DrawList::new();
        graph.draw(&mut list);

        let colors: Vec<Color> = list.items().iter().map(|c| c.color()).collect();
        assert_eq!(
            colors,
            [Color::YELLOW, Color::BLACK, Color::WHITE, Color::WHITE, Color::WHITE]
        );
    }

    #[test]
    fn mouth_scale_stays_positive_while_chomping() {
        let mut graph = SceneGraph::new();
        let shared = Shared::new();
        let root = graph.root();
        let pacman = spawn(&mut graph, root, &shared, Point2D::zero());
        let mouth = graph.children(pacman)[1];

        for _ in 0..50 {
            graph.update(1.0 / 60.0);
            let s = graph.node(mouth).scale();
            assert!((0.1 - 1e-4..=1.0 + 1e-4).contains(&s), "{s}");
        }
        assert!(graph.node(pacman).position().x > 0.0);
    }
}
