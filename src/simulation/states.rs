//! Core state types for the accretion sandbox.
//!
//! Defines the loose-body side of the world:
//! - `BodyId`        stable identity for a transient body
//! - `TransientBody` one loose object with its physical metadata
//! - `TransientPool` the set of currently loose bodies
//!
//! The absorbed side lives in [`crate::simulation::planet`].

use nalgebra::Vector3;

use super::geometry::GeometryHandle;

pub type NVec3 = Vector3<f64>;

/// Stable identity of a transient body, never reused within a run.
///
/// Everything that needs to point at a pool member across frames (the drag
/// selection, the viewer's entities) holds one of these instead of an index,
/// so batch removals cannot silently redirect a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

/// One loose object falling toward the planet.
#[derive(Debug, Clone)]
pub struct TransientBody {
    pub id: BodyId,
    pub geometry: GeometryHandle, // cloned geometry in the arena
    pub mass: f64, // template mass, arbitrary units
    pub velocity: NVec3, // linear velocity
    pub angular_velocity: NVec3, // per-axis Euler rate
    pub baked: bool, // true once merged into the planet
    pub position: NVec3, // world position
    pub rotation: NVec3, // Euler angles
}

/// The set of currently loose bodies.
///
/// Owns its members exclusively: a body leaves the pool the moment it is
/// merged into the planet or despawned, and never comes back.
#[derive(Debug, Clone)]
pub struct TransientPool {
    pub bodies: Vec<TransientBody>,
    next_id: u64,
}

impl TransientPool {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 0,
        }
    }

    /// Hand out the next id. Monotonic for the lifetime of the pool.
    pub fn allocate_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn get(&self, id: BodyId) -> Option<&TransientBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut TransientBody> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for TransientPool {
    fn default() -> Self {
        Self::new()
    }
}
