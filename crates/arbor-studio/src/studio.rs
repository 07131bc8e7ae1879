use arbor_engine::coords::Point2D;
use arbor_engine::core::{App, AppControl, FrameCtx};
use arbor_engine::graph::{NodeId, SceneGraph};
use arbor_engine::render::PathRenderer;
use arbor_engine::scene::DrawList;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::shared::Shared;
use crate::{asteroid, pacman, ship};

const ASTEROIDS: usize = 7;

/// The demo scene: a pacman, a ship and a field of asteroids under one root.
pub struct Studio {
    graph: SceneGraph,
    list: DrawList,
    renderer: PathRenderer,
    shared: Shared,

    ship: NodeId,
    asteroids: Vec<NodeId>,
    grabbed: Option<NodeId>,
}

impl Studio {
    pub fn new() -> Self {
        let mut graph = SceneGraph::new();
        let shared = Shared::new();
        let root = graph.root();
        let mut rng = rand::thread_rng();

        let asteroids = (0..ASTEROIDS)
            .map(|_| asteroid::spawn(&mut graph, root, &shared, [1.0, 1.0], &mut rng))
            .collect();
        pacman::spawn(&mut graph, root, &shared, Point2D::new(-0.8, 0.6));
        let ship = ship::spawn(&mut graph, root, &shared);

        log::info!("scene ready with {} nodes", graph.len());

        Self {
            graph,
            list: DrawList::new(),
            renderer: PathRenderer::new(),
            shared,
            ship,
            asteroids,
            grabbed: None,
        }
    }

    fn on_key(&mut self, key: KeyCode, pressed: bool, repeat: bool) -> AppControl {
        match key {
            KeyCode::ArrowLeft => self.shared.update_controls(|c| c.left = pressed),
            KeyCode::ArrowRight => self.shared.update_controls(|c| c.right = pressed),
            KeyCode::ArrowUp => self.shared.update_controls(|c| c.thrust = pressed),
            _ if !pressed || repeat => {}
            KeyCode::Space => self.shared.update_controls(|c| c.shots += 1),
            KeyCode::KeyG => self.grab_nearest(),
            KeyCode::KeyR => self.release(),
            KeyCode::KeyH => self.toggle_ship(),
            KeyCode::Escape => return AppControl::Exit,
            _ => {}
        }
        AppControl::Continue
    }

    /// Reparents the asteroid closest to the ship under the ship.
    fn grab_nearest(&mut self) {
        if self.grabbed.is_some() {
            return;
        }

        let graph = &self.graph;
        let from = graph.global_position(self.ship);
        let nearest = self
            .asteroids
            .iter()
            .copied()
            .filter(|&a| graph.contains(a))
            .min_by(|&a, &b| {
                let da = graph.global_position(a).distance(from);
                let db = graph.global_position(b).distance(from);
                da.total_cmp(&db)
            });

        let Some(target) = nearest else { return };
        match self.graph.set_parent(target, self.ship) {
            Ok(()) => {
                log::info!("ship grabbed asteroid {target}");
                self.grabbed = Some(target);
            }
            Err(err) => log::warn!("grab failed: {err}"),
        }
    }

    /// Hands a grabbed asteroid back to the root, where it drifts again.
    fn release(&mut self) {
        let Some(target) = self.grabbed.take() else { return };
        if !self.graph.contains(target) {
            return;
        }

        let root = self.graph.root();
        match self.graph.set_parent(target, root) {
            Ok(()) => log::info!("ship released asteroid {target}"),
            Err(err) => log::warn!("release failed: {err}"),
        }
    }

    fn toggle_ship(&mut self) {
        let node = self.graph.node_mut(self.ship);
        let showing = !node.is_showing();
        node.show(showing);
        log::info!("ship {}", if showing { "shown" } else { "hidden" });
    }
}

impl App for Studio {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if let PhysicalKey::Code(code) = event.physical_key {
                return self.on_key(code, event.state == ElementState::Pressed, event.repeat);
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.shared.set_bounds(ctx.viewport().world_half_extent());
        self.graph.update(ctx.time.dt);

        let graph = &self.graph;
        self.asteroids.retain(|&a| graph.contains(a));

        self.list.clear();
        self.graph.draw(&mut self.list);

        let renderer = &mut self.renderer;
        let list = &self.list;
        ctx.render(ctx.clear_color, |rctx, target| renderer.render(rctx, target, list))
    }
}
