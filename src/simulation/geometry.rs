//! Geometry arena standing in for the rendering engine's scene objects.
//!
//! Every spawned body gets a cloned geometry entry here, addressed by a
//! `GeometryHandle`. The simulation only ever talks to the scene through
//! these handles: it registers them, releases them, and reads their bounds.
//! The viewer keeps its own handle-to-entity index on the other side.

use super::bounds::Aabb;
use super::registry::{BodyTemplate, Tier};
use super::states::NVec3;

/// Index into the [`GeometryStore`] arena.
///
/// Handles are only minted by the store and stay valid while their body is
/// loose or accreted. A despawned body's slot is released and handed to a
/// later clone, so the arena stays bounded by the live geometry count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(pub u32);

#[derive(Debug, Clone)]
struct GeometryEntry {
    template_id: String,
    tier: Tier,
    local_bounds: Aabb,
    in_scene: bool,
}

/// Arena of cloned geometries plus their scene-registration state.
#[derive(Debug, Clone, Default)]
pub struct GeometryStore {
    entries: Vec<GeometryEntry>,
    free: Vec<u32>,
}

impl GeometryStore {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Cheap duplication of a loaded template.
    ///
    /// The clone's local box is the template's model box with the visual
    /// scale applied, recentered on its own centroid. The physics pivot is
    /// the geometric center regardless of where the source asset put its
    /// origin.
    pub fn clone_geometry(&mut self, template: &BodyTemplate) -> GeometryHandle {
        let scaled_half = template
            .bounds
            .half_extents()
            .component_mul(&template.scale);
        let entry = GeometryEntry {
            template_id: template.id.clone(),
            tier: template.tier,
            local_bounds: Aabb::from_center_half_extents(NVec3::zeros(), scaled_half),
            in_scene: false,
        };
        match self.free.pop() {
            Some(slot) => {
                self.entries[slot as usize] = entry;
                GeometryHandle(slot)
            }
            None => {
                let handle = GeometryHandle(self.entries.len() as u32);
                self.entries.push(entry);
                handle
            }
        }
    }

    pub fn add_to_scene(&mut self, handle: GeometryHandle) {
        self.entries[handle.0 as usize].in_scene = true;
    }

    /// Take the clone out of the scene and put its slot up for reuse.
    ///
    /// The handle must not be touched afterwards; the next `clone_geometry`
    /// may hand the same slot to a different body.
    pub fn release(&mut self, handle: GeometryHandle) {
        self.entries[handle.0 as usize].in_scene = false;
        self.free.push(handle.0);
    }

    pub fn in_scene(&self, handle: GeometryHandle) -> bool {
        self.entries[handle.0 as usize].in_scene
    }

    /// Model-space box of the clone, centered on the origin.
    pub fn local_bounds(&self, handle: GeometryHandle) -> Aabb {
        self.entries[handle.0 as usize].local_bounds
    }

    /// World-space enclosing box under the body's current transform.
    pub fn world_bounds(&self, handle: GeometryHandle, position: NVec3, rotation: NVec3) -> Aabb {
        self.local_bounds(handle).transformed(position, rotation)
    }

    pub fn template_id(&self, handle: GeometryHandle) -> &str {
        &self.entries[handle.0 as usize].template_id
    }

    pub fn tier(&self, handle: GeometryHandle) -> Tier {
        self.entries[handle.0 as usize].tier
    }

    /// Number of clones currently backing a body or planet member.
    pub fn len(&self) -> usize {
        self.entries.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
