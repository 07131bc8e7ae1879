use std::cell::Cell;
use std::rc::Rc;

use arbor_engine::coords::Point2D;

/// Keys currently held, plus shots queued since the ship last fired.
#[derive(Debug, Default, Clone, Copy)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub shots: u32,
}

/// State the app shares with node behaviors.
///
/// Behaviors only see the graph during update, so input and the visible
/// world bounds reach them through these cells.
#[derive(Debug, Clone)]
pub struct Shared {
    controls: Rc<Cell<Controls>>,
    bounds: Rc<Cell<[f32; 2]>>,
}

/// Distance past the visible edge before an object wraps around.
const WRAP_MARGIN: f32 = 0.1;

impl Shared {
    pub fn new() -> Self {
        Self {
            controls: Rc::new(Cell::new(Controls::default())),
            bounds: Rc::new(Cell::new([1.0, 1.0])),
        }
    }

    pub fn controls(&self) -> Controls {
        self.controls.get()
    }

    pub fn update_controls(&self, f: impl FnOnce(&mut Controls)) {
        let mut controls = self.controls.get();
        f(&mut controls);
        self.controls.set(controls);
    }

    /// Returns and clears the queued shot count.
    pub fn take_shots(&self) -> u32 {
        let mut controls = self.controls.get();
        let shots = std::mem::take(&mut controls.shots);
        self.controls.set(controls);
        shots
    }

    pub fn set_bounds(&self, half_extent: [f32; 2]) {
        self.bounds.set(half_extent);
    }

    /// Wraps a world position that left the visible area to the opposite side.
    pub fn wrap(&self, p: Point2D) -> Point2D {
        let [bx, by] = self.bounds.get();
        Point2D::new(wrap_axis(p.x, bx + WRAP_MARGIN), wrap_axis(p.y, by + WRAP_MARGIN))
    }
}

fn wrap_axis(v: f32, half: f32) -> f32 {
    if v > half {
        v - 2.0 * half
    } else if v < -half {
        v + 2.0 * half
    } else {
        v
    }
}
