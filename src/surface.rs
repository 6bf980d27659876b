use std::collections::HashMap;

/// Stable handle to one dot on a drawing surface. Each live particle
/// owns exactly one; the simulator creates it on spawn and destroys it
/// on cull.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct DotId(pub(crate) u64);

/// The drawing primitives the simulation needs. Keeping this as a trait
/// lets the tests run against a recording implementation while the app
/// feeds a ratatui canvas.
pub trait Surface {
    fn create_dot(&mut self) -> DotId;
    fn set_dot_position(&mut self, dot: DotId, x: f64, y: f64);
    fn destroy_dot(&mut self, dot: DotId);
    fn set_path_circle(&mut self, cx: f64, cy: f64, r: f64);
}

/// Retained-mode surface backing the terminal canvas: it remembers
/// where every dot was last placed and what the path circle looks like,
/// and the UI paints from that each frame.
pub struct CanvasSurface {
    next_id: u64,
    dots: HashMap<DotId, (f64, f64)>,
    path_circle: (f64, f64, f64),
}

impl CanvasSurface {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            dots: HashMap::new(),
            path_circle: (0.0, 0.0, 0.0),
        }
    }

    pub fn dot_positions(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.dots.values().copied()
    }

    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }

    /// Center and radius of the orbit path indicator, in view coordinates.
    pub fn path_circle(&self) -> (f64, f64, f64) {
        self.path_circle
    }
}

impl Surface for CanvasSurface {
    fn create_dot(&mut self) -> DotId {
        let id = DotId(self.next_id);
        self.next_id += 1;
        self.dots.insert(id, (0.0, 0.0));
        id
    }

    fn set_dot_position(&mut self, dot: DotId, x: f64, y: f64) {
        if let Some(pos) = self.dots.get_mut(&dot) {
            *pos = (x, y);
        }
    }

    fn destroy_dot(&mut self, dot: DotId) {
        self.dots.remove(&dot);
    }

    fn set_path_circle(&mut self, cx: f64, cy: f64, r: f64) {
        self.path_circle = (cx, cy, r);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dots_are_created_moved_and_destroyed() {
        let mut surface = CanvasSurface::new();
        let a = surface.create_dot();
        let b = surface.create_dot();
        assert_ne!(a, b);
        assert_eq!(surface.dot_count(), 2);

        surface.set_dot_position(a, 10.0, 20.0);
        assert!(surface.dot_positions().any(|p| p == (10.0, 20.0)));

        surface.destroy_dot(a);
        assert_eq!(surface.dot_count(), 1);
        assert!(!surface.dot_positions().any(|p| p == (10.0, 20.0)));
    }

    #[test]
    fn moving_a_destroyed_dot_is_a_no_op() {
        let mut surface = CanvasSurface::new();
        let a = surface.create_dot();
        surface.destroy_dot(a);
        surface.set_dot_position(a, 5.0, 5.0);
        assert_eq!(surface.dot_count(), 0);
    }

    #[test]
    fn path_circle_is_retained() {
        let mut surface = CanvasSurface::new();
        surface.set_path_circle(480.0, 250.0, 120.0);
        assert_eq!(surface.path_circle(), (480.0, 250.0, 120.0));
    }
}
