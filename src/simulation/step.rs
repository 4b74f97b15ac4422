//! The per-frame physics pass: collision, gravity, integration, despawn.
//!
//! One call advances every loose body once. Bodies that make eroded-box
//! contact with a planet member are merged into the planet mid-pass, so
//! later bodies in the same pass already see the grown planet. Removals are
//! deferred to a single sweep at the end of the pass.

use super::geometry::{GeometryHandle, GeometryStore};
use super::params::Parameters;
use super::planet::PlanetAggregate;
use super::states::{BodyId, NVec3, TransientPool};

/// Pool changes made by one step, for the caller to mirror into the scene
/// and the drag state.
#[derive(Debug, Clone, Default)]
pub struct StepReport {
    pub merged: Vec<(BodyId, GeometryHandle)>,
    pub despawned: Vec<(BodyId, GeometryHandle)>,
}

impl StepReport {
    pub fn is_empty(&self) -> bool {
        self.merged.is_empty() && self.despawned.is_empty()
    }
}

/// Advance the whole pool by `delta` seconds.
///
/// Per body, in pool order: eroded-AABB contact test against every planet
/// member (contact bakes the body and merges it), then gravity toward the
/// origin, then rotation and position integration, then the despawn check
/// against `clip_radius_multiplier` planet radii.
///
/// The gravitational pull is added to velocity once per call without a
/// `delta` factor, so its strength is tied to the frame rate. The tuning
/// of `g` and the drag constants assumes this per-frame accumulation; do
/// not scale it by `delta`.
pub fn accretion_step(
    pool: &mut TransientPool,
    planet: &mut PlanetAggregate,
    geoms: &mut GeometryStore,
    params: &Parameters,
    delta: f64,
) -> StepReport {
    let mut report = StepReport::default();

    for index in 0..pool.bodies.len() {
        if pool.bodies[index].baked {
            continue;
        }

        let eroded = {
            let body = &pool.bodies[index];
            geoms
                .world_bounds(body.geometry, body.position, body.rotation)
                .shrunk(params.collision_erosion)
        };
        let contact = planet.members().iter().any(|member| {
            geoms
                .world_bounds(member.geometry, member.position, member.rotation)
                .shrunk(params.collision_erosion)
                .overlaps(&eroded)
        });

        if contact {
            {
                let body = &mut pool.bodies[index];
                body.velocity = NVec3::zeros();
                body.angular_velocity = NVec3::zeros();
                body.baked = true;
            }
            let body = &pool.bodies[index];
            planet.merge(body, geoms);
            report.merged.push((body.id, body.geometry));
            continue;
        }

        let planet_mass = planet.mass();
        let planet_radius = planet.bounding_radius();
        let body = &mut pool.bodies[index];

        // Pull toward the origin. The magnitude uses the full two-body
        // product over the squared distance.
        let dist_sq = body.position.norm_squared();
        if dist_sq > 0.0 {
            let magnitude = params.g * body.mass * planet_mass / dist_sq;
            let direction = -body.position / dist_sq.sqrt();
            body.velocity += direction * magnitude;
        }

        body.rotation += body.angular_velocity * delta;
        body.position += body.velocity * delta;

        if body.position.norm() > params.clip_radius_multiplier * planet_radius {
            report.despawned.push((body.id, body.geometry));
        }
    }

    // One sweep removes everything the pass marked. Merged bodies keep
    // their scene registration (they are planet decoration now), despawned
    // ones give their arena slot back.
    for &(_, geometry) in &report.despawned {
        geoms.release(geometry);
    }
    pool.bodies.retain(|body| {
        !body.baked && !report.despawned.iter().any(|&(id, _)| id == body.id)
    });

    report
}
