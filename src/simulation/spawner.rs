//! Time-throttled factory for loose bodies.
//!
//! The spawner owns its own timer state and RNG. Every frame it accumulates
//! elapsed time; once the accumulator passes a randomized wait threshold it
//! emits the parameters for one new body on a shell around the planet and
//! re-rolls the threshold.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::params::Parameters;
use super::planet::PlanetAggregate;
use super::registry::{spawn_tier_for_mass, BodyRegistry, BodyTemplate};
use super::states::NVec3;

/// Variety draws index into the lower tier with a fixed range, regardless of
/// how many templates that tier actually holds.
const BLEND_INDEX_RANGE: usize = 5;

/// Everything needed to materialize one new body.
#[derive(Debug, Clone)]
pub struct SpawnParams {
    pub template: BodyTemplate,
    pub position: NVec3,
    pub velocity: NVec3,
    pub angular_velocity: NVec3,
    pub rotation: NVec3, // euler angles, radians
}

#[derive(Debug)]
pub struct Spawner {
    time_since_last_spawn: f64,
    wait_threshold: f64, // seconds, re-rolled in [0,1) after every spawn
    rng: StdRng,
}

impl Spawner {
    pub fn new(seed: u64) -> Spawner {
        let mut rng = StdRng::seed_from_u64(seed);
        let wait_threshold = rng.gen_range(0.0..1.0);
        Spawner {
            time_since_last_spawn: 0.0,
            wait_threshold,
            rng,
        }
    }

    pub fn wait_threshold(&self) -> f64 {
        self.wait_threshold
    }

    pub fn accumulated(&self) -> f64 {
        self.time_since_last_spawn
    }

    /// Advance the spawn timer by `delta` seconds and maybe produce a body.
    ///
    /// Fires only once the accumulator strictly exceeds the wait threshold.
    /// The template is drawn from the tier selected by the planet's current
    /// mass, with two variety draws mixing in entries from the next tier
    /// down. Placement is a uniform shell between `spawn_radius_minimum` and
    /// `spawn_radius_minimum + clip_radius_multiplier` planet radii, sampled
    /// uniformly in angle rather than area.
    pub fn try_spawn(
        &mut self,
        delta: f64,
        registry: &BodyRegistry,
        planet: &PlanetAggregate,
        params: &Parameters,
    ) -> Option<SpawnParams> {
        self.time_since_last_spawn += delta;
        if self.time_since_last_spawn <= self.wait_threshold {
            return None;
        }
        self.time_since_last_spawn = 0.0;
        self.wait_threshold = self.rng.gen_range(0.0..1.0);

        let template = self.choose_template(registry, planet.mass())?.clone();

        let radius = planet.bounding_radius();
        let near = params.spawn_radius_minimum * radius;
        let r = self.rng.gen_range(near..near + params.clip_radius_multiplier * radius);
        let theta = self.rng.gen_range(0.0..std::f64::consts::TAU);
        let phi = self.rng.gen_range(-std::f64::consts::FRAC_PI_2..std::f64::consts::FRAC_PI_2);
        let position = NVec3::new(
            r * phi.cos() * theta.cos(),
            r * phi.sin(),
            r * phi.cos() * theta.sin(),
        );

        Some(SpawnParams {
            template,
            position,
            velocity: self.random_vec3(-10.0, 10.0),
            angular_velocity: self.random_vec3(0.0, 2.0),
            rotation: NVec3::new(
                self.rng.gen_range(0.0..std::f64::consts::TAU),
                self.rng.gen_range(0.0..std::f64::consts::TAU),
                self.rng.gen_range(0.0..std::f64::consts::TAU),
            ),
        })
    }

    fn choose_template<'r>(
        &mut self,
        registry: &'r BodyRegistry,
        planet_mass: f64,
    ) -> Option<&'r BodyTemplate> {
        let (mut tier, blend) = spawn_tier_for_mass(planet_mass);
        // Fall through to the nearest lower non-empty tier; a fully empty
        // registry skips this tick.
        while registry.tier(tier).is_empty() {
            tier = tier.lower()?;
        }
        let mut candidates: Vec<&BodyTemplate> = registry.tier(tier).iter().collect();
        if let Some(blend) = blend {
            let lower = registry.tier(blend);
            for _ in 0..2 {
                // An index past the end of the lower tier adds nothing.
                let idx = self.rng.gen_range(0..BLEND_INDEX_RANGE);
                if idx < lower.len() {
                    candidates.push(&lower[idx]);
                }
            }
        }
        Some(candidates[self.rng.gen_range(0..candidates.len())])
    }

    fn random_vec3(&mut self, low: f64, high: f64) -> NVec3 {
        NVec3::new(
            self.rng.gen_range(low..=high),
            self.rng.gen_range(low..=high),
            self.rng.gen_range(low..=high),
        )
    }
}
