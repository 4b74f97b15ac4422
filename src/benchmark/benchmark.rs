use std::time::Instant;

use crate::simulation::bounds::Aabb;
use crate::simulation::geometry::GeometryStore;
use crate::simulation::params::Parameters;
use crate::simulation::planet::PlanetAggregate;
use crate::simulation::registry::{BodyTemplate, Tier};
use crate::simulation::states::{NVec3, TransientBody, TransientPool};
use crate::simulation::step::accretion_step;

/// Helper: parameters tuned so the timed passes stay merge- and
/// despawn-free
fn make_params() -> Parameters {
    Parameters {
        g: 6.67428e-6,
        clip_radius_multiplier: 100.0,
        spawn_radius_minimum: 2.0,
        collision_erosion: 0.25,
        drag_damping: 0.9,
        drag_juice: 100.0,
        seed: 42,
    }
}

fn make_template() -> BodyTemplate {
    BodyTemplate {
        id: "unit-box".to_string(),
        path: "bench://unit-box".to_string(),
        mass: 1.0,
        scale: NVec3::new(1.0, 1.0, 1.0),
        bounds: Aabb::new(NVec3::new(-0.5, -0.5, -0.5), NVec3::new(0.5, 0.5, 0.5)),
        tier: Tier::Small,
    }
}

/// Helper to build a planet with `members` accreted boxes and a pool of
/// `loose` bodies far enough out that no contact or despawn fires
fn make_accretion(
    members: usize,
    loose: usize,
) -> (TransientPool, PlanetAggregate, GeometryStore) {
    let template = make_template();
    let mut geoms = GeometryStore::new();
    let mut pool = TransientPool::new();

    let seed = geoms.clone_geometry(&template);
    geoms.add_to_scene(seed);
    let mut planet = PlanetAggregate::new(seed, 1.0, &geoms);

    for i in 0..members {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let position = NVec3::new(
            (i_f * 0.37).sin() * 2.0,
            (i_f * 0.13).cos() * 2.0,
            (i_f * 0.07).sin() * 2.0,
        );
        let geometry = geoms.clone_geometry(&template);
        geoms.add_to_scene(geometry);
        let id = pool.allocate_id();
        planet.merge(
            &TransientBody {
                id,
                geometry,
                mass: 1.0,
                velocity: NVec3::zeros(),
                angular_velocity: NVec3::zeros(),
                baked: true,
                position,
                rotation: NVec3::zeros(),
            },
            &geoms,
        );
    }

    for i in 0..loose {
        let i_f = i as f64;
        // shell well outside the planet, well inside the clip radius
        let position = NVec3::new(
            (i_f * 0.61).sin() * 40.0,
            (i_f * 0.29).cos() * 40.0,
            (i_f * 0.17).sin() * 40.0 + 60.0,
        );
        let geometry = geoms.clone_geometry(&template);
        geoms.add_to_scene(geometry);
        let id = pool.allocate_id();
        pool.bodies.push(TransientBody {
            id,
            geometry,
            mass: 1.0,
            velocity: NVec3::zeros(),
            angular_velocity: NVec3::new(0.1, 0.2, 0.3),
            baked: false,
            position,
            rotation: NVec3::zeros(),
        });
    }

    (pool, planet, geoms)
}

/// Time one physics pass for growing planet sizes. The pass is dominated
/// by the pool x members box test.
pub fn bench_collision_pass() {
    let members_ns = [4, 8, 16, 32, 64, 128, 256];
    let loose = 512;

    for members in members_ns {
        let (mut pool, mut planet, mut geoms) = make_accretion(members, loose);
        let params = make_params();

        // Warm up
        accretion_step(&mut pool, &mut planet, &mut geoms, &params, 0.001);

        let t0 = Instant::now();
        accretion_step(&mut pool, &mut planet, &mut geoms, &params, 0.001);
        let dt = t0.elapsed().as_secs_f64();

        println!("members = {members:4}, loose = {loose:4}, step = {dt:8.6} s");
    }
}

/// Benchmark the full step over a range of pool sizes
/// Paste output directly into excel to graph
pub fn bench_step_curve() {
    println!("N,step_ms");

    for n in (64..=4096).step_by(64) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 512 { 5 } else { 1 };

        let (mut pool, mut planet, mut geoms) = make_accretion(32, n);
        let params = make_params();

        // Warm up
        accretion_step(&mut pool, &mut planet, &mut geoms, &params, 0.001);

        let t0 = Instant::now();
        for _ in 0..steps {
            accretion_step(&mut pool, &mut planet, &mut geoms, &params, 0.001);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}
