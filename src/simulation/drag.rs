//! Mouse drag control over a single loose body.
//!
//! The viewer translates pointer events into a pick ray and a target point
//! on the plane through the origin facing the camera; everything else lives
//! here. The held body is damped and pulled toward the target once per
//! physics tick.

use super::bounds::Ray;
use super::geometry::GeometryStore;
use super::params::Parameters;
use super::states::{BodyId, NVec3, TransientPool};

/// Nearest unbaked pool body hit by `ray`, if any. Baked bodies are planet
/// decoration and cannot be picked.
pub fn pick_body(ray: &Ray, pool: &TransientPool, geoms: &GeometryStore) -> Option<BodyId> {
    pool.bodies
        .iter()
        .filter(|body| !body.baked)
        .filter_map(|body| {
            geoms
                .world_bounds(body.geometry, body.position, body.rotation)
                .ray_hit(ray)
                .map(|t| (body.id, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

#[derive(Debug, Clone)]
pub struct DragState {
    pub mouse_down: bool,
    selected: Option<BodyId>,
    pub target_point: NVec3,
    /// Camera tether distance, kept at three planet radii as the planet
    /// grows.
    pub max_drag_distance: f64,
}

impl DragState {
    pub fn new(max_drag_distance: f64) -> DragState {
        DragState {
            mouse_down: false,
            selected: None,
            target_point: NVec3::zeros(),
            max_drag_distance,
        }
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    /// Mouse-down: remember the button state and try to grab a body.
    pub fn begin(&mut self, ray: &Ray, pool: &TransientPool, geoms: &GeometryStore) {
        self.mouse_down = true;
        self.selected = pick_body(ray, pool, geoms);
    }

    /// Pointer-move while dragging: new cursor projection on the drag plane.
    pub fn set_target(&mut self, point: NVec3) {
        self.target_point = point;
    }

    /// Mouse-up: release everything.
    pub fn end(&mut self) {
        self.mouse_down = false;
        self.selected = None;
    }

    /// Drop the selection if it refers to `id`. Called when a body merges
    /// or despawns out from under the cursor.
    pub fn invalidate(&mut self, id: BodyId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Per-tick impulse on the held body: exponential velocity damping,
    /// then a spring pull toward the target point scaled by `delta` and the
    /// juice factor. The selection is re-validated first; a body that baked
    /// or left the pool while held is released instead of moved.
    pub fn apply(&mut self, pool: &mut TransientPool, params: &Parameters, delta: f64) {
        if !self.mouse_down {
            return;
        }
        let Some(id) = self.selected else { return };
        let Some(body) = pool.get_mut(id) else {
            self.selected = None;
            return;
        };
        if body.baked {
            self.selected = None;
            return;
        }
        body.velocity *= params.drag_damping;
        body.velocity += (self.target_point - body.position) * (delta * params.drag_juice);
    }
}
