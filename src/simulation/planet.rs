//! The central planet: an aggregate of every body that has been accreted.
//!
//! Members keep the world transform they had at the moment of contact, so
//! the planet grows as an irregular clump rather than a sphere. Its radius
//! is the bounding sphere of the union of all member boxes and only ever
//! grows, as does its mass.

use super::bounds::Aabb;
use super::geometry::{GeometryHandle, GeometryStore};
use super::states::{NVec3, TransientBody};

/// One accreted body, frozen at its merge transform.
#[derive(Debug, Clone)]
pub struct PlanetMember {
    pub geometry: GeometryHandle,
    pub position: NVec3,
    pub rotation: NVec3, // euler angles, radians
}

#[derive(Debug, Clone)]
pub struct PlanetAggregate {
    mass: f64,
    radius: f64,
    members: Vec<PlanetMember>,
}

impl PlanetAggregate {
    /// Start the planet from a single seed geometry sitting at the origin.
    pub fn new(geometry: GeometryHandle, mass: f64, geoms: &GeometryStore) -> PlanetAggregate {
        let mut planet = PlanetAggregate {
            mass,
            radius: 0.0,
            members: vec![PlanetMember {
                geometry,
                position: NVec3::zeros(),
                rotation: NVec3::zeros(),
            }],
        };
        planet.recompute_radius(geoms);
        planet
    }

    /// Absorb a body: freeze its transform as a new member, add its mass and
    /// grow the bounding radius to cover it.
    pub fn merge(&mut self, body: &TransientBody, geoms: &GeometryStore) {
        self.members.push(PlanetMember {
            geometry: body.geometry,
            position: body.position,
            rotation: body.rotation,
        });
        self.mass += body.mass;
        self.recompute_radius(geoms);
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Radius of the sphere bounding every member box. Spawn and despawn
    /// distances are expressed in multiples of this.
    pub fn bounding_radius(&self) -> f64 {
        self.radius
    }

    pub fn members(&self) -> &[PlanetMember] {
        &self.members
    }

    /// Member count, never below one: the seed is a member from the start.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Union of all member boxes in world space.
    pub fn union_bounds(&self, geoms: &GeometryStore) -> Option<Aabb> {
        let mut boxes = self
            .members
            .iter()
            .map(|m| geoms.world_bounds(m.geometry, m.position, m.rotation));
        let first = boxes.next()?;
        Some(boxes.fold(first, |acc, b| acc.union(&b)))
    }

    fn recompute_radius(&mut self, geoms: &GeometryStore) {
        self.radius = match self.union_bounds(geoms) {
            Some(bounds) => bounds.bounding_sphere().radius,
            None => 0.0,
        };
    }
}
