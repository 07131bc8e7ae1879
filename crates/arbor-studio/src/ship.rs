use arbor_engine::coords::{AffineFrame, Point2D};
use arbor_engine::graph::{Behavior, NodeId, SceneGraph};
use arbor_engine::paint::Color;
use arbor_engine::scene::Canvas;
use arbor_engine::shapes::{CircleShape, LineShape};

use crate::shared::Shared;

const SHIP_SCALE: f32 = 0.06;
/// Degrees per second.
const TURN_RATE: f32 = 200.0;
const THRUST: f32 = 0.9;
/// Fraction of velocity kept after one second without thrust.
const DRAG: f32 = 0.35;

const BULLET_SPEED: f32 = 1.4;
const BULLET_LIFETIME: f32 = 1.2;
const BULLET_SCALE: f32 = 0.008;

/// Hull outline in ship space, nose on +x.
const HULL: [(Point2D, Point2D); 4] = [
    (Point2D::new(1.0, 0.0), Point2D::new(-0.7, 0.6)),
    (Point2D::new(1.0, 0.0), Point2D::new(-0.7, -0.6)),
    (Point2D::new(-0.7, 0.6), Point2D::new(-0.4, 0.0)),
    (Point2D::new(-0.7, -0.6), Point2D::new(-0.4, 0.0)),
];

/// Steers the ship from the shared controls and fires queued shots.
pub struct Pilot {
    shared: Shared,
    velocity: Point2D,
}

impl Pilot {
    fn fire(&self, graph: &mut SceneGraph, id: NodeId) {
        let frame = graph.global_frame(id);
        let nose = frame.apply(Point2D::new(1.0, 0.0));
        let heading = heading(graph.global_rotation(id));

        let root = graph.root();
        let bullet = graph.create_with(
            root,
            Bullet {
                body: CircleShape::unit(Some(Color::WHITE), None),
                shared: self.shared.clone(),
                velocity: heading * BULLET_SPEED + self.velocity,
                life: BULLET_LIFETIME,
            },
        );
        graph.node_mut(bullet).set_position(nose).set_scale(BULLET_SCALE);
        log::trace!("ship {id} fired bullet {bullet}");
    }
}

impl Behavior for Pilot {
    fn update_self(&mut self, graph: &mut SceneGraph, id: NodeId, dt: f32) {
        let controls = self.shared.controls();
        let turn = (controls.left as i32 - controls.right as i32) as f32;

        let node = graph.node_mut(id);
        node.rotate(turn * TURN_RATE * dt);

        if controls.thrust {
            self.velocity = self.velocity + heading(node.rotation()) * (THRUST * dt);
        }
        self.velocity = self.velocity * DRAG.powf(dt);

        let next = self.shared.wrap(node.position() + self.velocity * dt);
        node.set_position(next);

        for _ in 0..self.shared.take_shots() {
            self.fire(graph, id);
        }
    }
}

/// Small circle that flies straight and removes itself when its time is up.
pub struct Bullet {
    body: CircleShape,
    shared: Shared,
    velocity: Point2D,
    life: f32,
}

impl Behavior for Bullet {
    fn draw_self(&self, canvas: &mut dyn Canvas, frame: &AffineFrame) {
        self.body.draw_self(canvas, frame);
    }

    fn update_self(&mut self, graph: &mut SceneGraph, id: NodeId, dt: f32) {
        self.life -= dt;
        if self.life <= 0.0 {
            graph.destroy(id);
            return;
        }

        let node = graph.node_mut(id);
        let next = self.shared.wrap(node.position() + self.velocity * dt);
        node.set_position(next);
    }
}

/// Unit vector for a heading in degrees.
fn heading(degrees: f32) -> Point2D {
    let (s, c) = degrees.to_radians().sin_cos();
    Point2D::new(c, s)
}

/// Builds the ship under `parent`: a [`Pilot`] node with one line child per
/// hull edge.
pub fn spawn(graph: &mut SceneGraph, parent: NodeId, shared: &Shared) -> NodeId {
    let ship = graph.create_with(parent, Pilot { shared: shared.clone(), velocity: Point2D::zero() });
    graph.node_mut(ship).set_rotation(90.0).set_scale(SHIP_SCALE);

    for (from, to) in HULL {
        graph.create_with(ship, LineShape::new(from, to, Color::WHITE));
    }

    log::debug!("spawned ship {ship}");
    ship
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_engine::scene::{DrawCmd, DrawList};

    fn setup() -> (SceneGraph, Shared, NodeId) {
        let mut graph = SceneGraph::new();
        let shared = Shared::new();
        let root = graph.root();
        let ship = spawn(&mut graph, root, &shared);
        (graph, shared, ship)
    }

    #[test]
    fn hull_draws_four_open_strokes() {
        let (graph, _, _) = setup();
        let mut list = DrawList::new();
        graph.draw(&mut list);

        assert_eq!(list.len(), 4);
        assert!(list.items().iter().all(|c| matches!(c, DrawCmd::Stroke(s) if !s.closed)));
    }

    #[test]
    fn turning_left_rotates_counterclockwise() {
        let (mut graph, shared, ship) = setup();
        shared.update_controls(|c| c.left = true);

        graph.update(0.1);
        assert!((graph.global_rotation(ship) - 110.0).abs() < 1e-3);
    }

    #[test]
    fn thrust_moves_along_heading() {
        let (mut graph, shared, ship) = setup();
        shared.update_controls(|c| c.thrust = true);

        for _ in 0..10 {
            graph.update(0.05);
        }
        let p = graph.global_position(ship);
        assert!(p.y > 0.0, "{p:?}");
        assert!(p.x.abs() < 1e-4, "{p:?}");
    }

    #[test]
    fn bullets_spawn_at_the_nose_and_expire() {
        let (mut graph, shared, ship) = setup();
        shared.update_controls(|c| c.shots = 1);

        graph.update(0.01);
        let bullets: Vec<NodeId> = graph
            .children(graph.root())
            .iter()
            .copied()
            .filter(|&n| n != ship)
            .collect();
        assert_eq!(bullets.len(), 1);

        let b = bullets[0];
        assert!(graph.global_position(b).approx_eq(Point2D::new(0.0, SHIP_SCALE), 1e-4));

        let steps = (BULLET_LIFETIME / 0.1).ceil() as usize + 1;
        for _ in 0..steps {
            graph.update(0.1);
        }
        assert!(!graph.contains(b));
        assert_eq!(graph.children(graph.root()), &[ship]);
    }
}
