use std::f32::consts::TAU;

use arbor_engine::coords::{AffineFrame, Point2D};
use arbor_engine::graph::{Behavior, NodeId, SceneGraph};
use arbor_engine::paint::Color;
use arbor_engine::scene::Canvas;
use arbor_engine::shapes::{Polygon2D, PolygonShape};
use rand::Rng;

use crate::shared::Shared;

/// Drifting, spinning rock. Drift only applies while it floats free under
/// the root; once grabbed it keeps spinning in its new parent's frame.
pub struct Asteroid {
    body: PolygonShape,
    shared: Shared,
    velocity: Point2D,
    /// Degrees per second.
    spin: f32,
}

impl Behavior for Asteroid {
    fn draw_self(&self, canvas: &mut dyn Canvas, frame: &AffineFrame) {
        self.body.draw_self(canvas, frame);
    }

    fn update_self(&mut self, graph: &mut SceneGraph, id: NodeId, dt: f32) {
        let free = graph.parent(id) == Some(graph.root());

        let node = graph.node_mut(id);
        node.rotate(self.spin * dt);
        if free {
            let next = self.shared.wrap(node.position() + self.velocity * dt);
            node.set_position(next);
        }
    }
}

/// Convex outline with unevenly spaced vertices on the unit circle.
fn outline(rng: &mut impl Rng) -> Polygon2D {
    let sides = rng.gen_range(7..12);
    let mut angles: Vec<f32> = (0..sides)
        .map(|i| (i as f32 + rng.gen_range(-0.35..0.35)) / sides as f32 * TAU)
        .collect();
    angles.sort_by(f32::total_cmp);

    Polygon2D::new(angles.into_iter().map(|a| Point2D::new(a.cos(), a.sin())).collect())
}

/// Spawns one asteroid under `parent` somewhere inside `half_extent`.
pub fn spawn(
    graph: &mut SceneGraph,
    parent: NodeId,
    shared: &Shared,
    half_extent: [f32; 2],
    rng: &mut impl Rng,
) -> NodeId {
    let body = PolygonShape::new(
        outline(rng),
        Some(Color::GRAY),
        Some(Color::from_rgb_u8(200, 200, 210)),
    );
    let velocity = Point2D::new(rng.gen_range(-0.15..0.15), rng.gen_range(-0.15..0.15));
    let spin = rng.gen_range(-60.0..60.0);

    let asteroid = graph.create_with(parent, Asteroid { body, shared: shared.clone(), velocity, spin });
    let [bx, by] = half_extent;
    graph
        .node_mut(asteroid)
        .set_position(Point2D::new(rng.gen_range(-bx..bx), rng.gen_range(-by..by)))
        .set_rotation(rng.gen_range(-180.0..180.0))
        .set_scale(rng.gen_range(0.06..0.14));

    log::trace!("spawned asteroid {asteroid}");
    asteroid
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn outline_is_counterclockwise_and_convex() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let poly = outline(&mut rng);
            let pts = poly.points();
            assert!(pts.len() >= 7);
            for i in 0..pts.len() {
                let a = pts[i];
                let b = pts[(i + 1) % pts.len()];
                let c = pts[(i + 2) % pts.len()];
                let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
                assert!(cross > 0.0, "reflex vertex at {i}: {pts:?}");
            }
        }
    }

    #[test]
    fn grabbed_asteroid_stops_drifting_but_keeps_spinning() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut graph = SceneGraph::new();
        let shared = Shared::new();
        let root = graph.root();

        let holder = graph.create(root);
        graph.node_mut(holder).set_position(Point2D::new(0.2, 0.0));
        let rock = spawn(&mut graph, root, &shared, [1.0, 1.0], &mut rng);
        graph.set_parent(rock, holder).unwrap();

        let local = graph.node(rock).position();
        let rotation = graph.node(rock).rotation();
        graph.update(0.5);

        assert_eq!(graph.node(rock).position(), local);
        assert_ne!(graph.node(rock).rotation(), rotation);
    }
}
