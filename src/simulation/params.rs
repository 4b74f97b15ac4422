//! Numerical and physical parameters for the sandbox
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant (`g`, scaled units rather than SI),
//! - spawn/despawn radii relative to the planet radius,
//! - collision box erosion fraction,
//! - drag damping and spring strength,
//! - random seed

/// Inner spawn band edge used when the scenario does not set one.
pub const DEFAULT_SPAWN_RADIUS_MINIMUM: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub g: f64, // gravitational constant (scaled, not SI)
    pub clip_radius_multiplier: f64, // despawn past this many planet radii; also the spawn band width
    pub spawn_radius_minimum: f64, // inner edge of the spawn band, in planet radii
    pub collision_erosion: f64, // per-axis AABB shrink fraction before contact tests
    pub drag_damping: f64, // velocity fraction kept per frame while a body is held
    pub drag_juice: f64, // spring strength pulling a held body toward the cursor
    pub seed: u64, // deterministic seed to make runs reproducable
}
