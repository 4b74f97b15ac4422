//! Build fully-initialized sandboxes from configuration and drive them.
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Sandbox`) containing:
//! - numerical parameters (`Parameters`)
//! - the usable template catalog (`BodyRegistry`)
//! - the geometry arena, transient pool and planet aggregate
//! - spawner and drag state
//!
//! The sandbox is inserted into Bevy as a `Resource` and consumed by the
//! input, stepping and transform-sync systems of the viewer. `update` is
//! the whole per-frame pipeline: spawn check, physics pass, drag impulse.

use bevy::prelude::Resource;
use log::{debug, info};
use thiserror::Error;

use crate::configuration::config::{ParametersConfig, ScenarioConfig};
use crate::simulation::drag::DragState;
use crate::simulation::geometry::{GeometryHandle, GeometryStore};
use crate::simulation::params::{Parameters, DEFAULT_SPAWN_RADIUS_MINIMUM};
use crate::simulation::planet::PlanetAggregate;
use crate::simulation::registry::{BodyRegistry, BodyTemplate};
use crate::simulation::spawner::Spawner;
use crate::simulation::states::{BodyId, NVec3, TransientBody, TransientPool};
use crate::simulation::step::accretion_step;

/// Why a scenario could not be turned into a runnable sandbox.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("parameter '{0}' is out of range")]
    BadParameter(&'static str),
    #[error("no usable templates survived registry loading")]
    EmptyRegistry,
    #[error("unknown template id '{0}'")]
    UnknownTemplate(String),
    #[error("spawn position for '{0}' must have exactly 3 components")]
    BadSpawnPosition(String),
}

/// Everything one frame did to the pool, for the viewer to mirror into
/// scene entities.
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub spawned: Vec<(BodyId, GeometryHandle)>,
    pub merged: Vec<(BodyId, GeometryHandle)>,
    pub despawned: Vec<(BodyId, GeometryHandle)>,
}

/// Bevy resource representing a fully-initialized accretion sandbox
///
/// This is the main "runtime bundle" constructed from a [`ScenarioConfig`]:
/// parameters, template catalog, geometry arena, the transient pool, the
/// planet aggregate, and the spawner and drag state that mutate them.
#[derive(Resource)]
pub struct Sandbox {
    pub parameters: Parameters,
    pub registry: BodyRegistry,
    pub geometry: GeometryStore,
    pub pool: TransientPool,
    pub planet: PlanetAggregate,
    pub spawner: Spawner,
    pub drag: DragState,
}

impl Sandbox {
    /// Validate parameters, load the registry, seed the planet at the
    /// origin and execute the scenario's fixed placements.
    ///
    /// Individual template failures are logged and skipped during registry
    /// loading; only a registry with nothing left in it is fatal.
    pub fn build_sandbox(cfg: ScenarioConfig) -> Result<Self, BuildError> {
        let parameters = build_parameters(&cfg.parameters)?;
        let registry = BodyRegistry::from_config(&cfg.registry);
        if registry.is_empty() {
            return Err(BuildError::EmptyRegistry);
        }

        let mut geometry = GeometryStore::new();
        let seed_template = registry
            .find(&cfg.planet.seed_template)
            .ok_or_else(|| BuildError::UnknownTemplate(cfg.planet.seed_template.clone()))?;
        let seed_mass = seed_template.mass;
        let seed_geometry = geometry.clone_geometry(seed_template);
        geometry.add_to_scene(seed_geometry);
        let planet = PlanetAggregate::new(seed_geometry, seed_mass, &geometry);

        let spawner = Spawner::new(parameters.seed);
        let drag = DragState::new(3.0 * planet.bounding_radius());

        let mut sandbox = Sandbox {
            parameters,
            registry,
            geometry,
            pool: TransientPool::new(),
            planet,
            spawner,
            drag,
        };
        for spawn in &cfg.spawns {
            let position = match spawn.position[..] {
                [x, y, z] => NVec3::new(x, y, z),
                _ => return Err(BuildError::BadSpawnPosition(spawn.id.clone())),
            };
            sandbox.spawn_by_id(&spawn.id, position)?;
        }
        info!(
            "sandbox ready: {} templates, planet seeded from '{}' (mass {}), {} initial bodies",
            sandbox.registry.len(),
            cfg.planet.seed_template,
            seed_mass,
            sandbox.pool.len()
        );
        Ok(sandbox)
    }

    /// Spawn a specific template at a fixed position with everything at
    /// rest. Used by scenario setup; unknown ids are an error.
    pub fn spawn_by_id(&mut self, id: &str, position: NVec3) -> Result<BodyId, BuildError> {
        let template = self
            .registry
            .find(id)
            .ok_or_else(|| BuildError::UnknownTemplate(id.to_string()))?
            .clone();
        let (id, _) = self.insert_body(
            &template,
            position,
            NVec3::zeros(),
            NVec3::zeros(),
            NVec3::zeros(),
        );
        Ok(id)
    }

    /// One frame: spawn check, physics pass, drag impulse, in that order.
    ///
    /// Merges grow the camera tether to three planet radii, and a held
    /// body that merged or despawned is released before the drag impulse.
    pub fn update(&mut self, delta: f64) -> FrameReport {
        let mut report = FrameReport::default();

        if let Some(spawn) =
            self.spawner
                .try_spawn(delta, &self.registry, &self.planet, &self.parameters)
        {
            let spawned = self.insert_body(
                &spawn.template,
                spawn.position,
                spawn.velocity,
                spawn.angular_velocity,
                spawn.rotation,
            );
            debug!(
                "spawned '{}' at distance {:.1}",
                spawn.template.id,
                spawn.position.norm()
            );
            report.spawned.push(spawned);
        }

        let step = accretion_step(
            &mut self.pool,
            &mut self.planet,
            &mut self.geometry,
            &self.parameters,
            delta,
        );
        if !step.merged.is_empty() {
            self.drag.max_drag_distance = 3.0 * self.planet.bounding_radius();
            info!(
                "{} accreted, planet mass {:.3}, radius {:.3}",
                step.merged.len(),
                self.planet.mass(),
                self.planet.bounding_radius()
            );
        }
        for &(id, _) in &step.despawned {
            debug!("body {} drifted past the clip radius, despawned", id.0);
        }
        for &(id, _) in step.merged.iter().chain(step.despawned.iter()) {
            self.drag.invalidate(id);
        }
        report.merged = step.merged;
        report.despawned = step.despawned;

        self.drag.apply(&mut self.pool, &self.parameters, delta);

        report
    }

    fn insert_body(
        &mut self,
        template: &BodyTemplate,
        position: NVec3,
        velocity: NVec3,
        angular_velocity: NVec3,
        rotation: NVec3,
    ) -> (BodyId, GeometryHandle) {
        let geometry = self.geometry.clone_geometry(template);
        self.geometry.add_to_scene(geometry);
        let id = self.pool.allocate_id();
        self.pool.bodies.push(TransientBody {
            id,
            geometry,
            mass: template.mass,
            velocity,
            angular_velocity,
            baked: false,
            position,
            rotation,
        });
        (id, geometry)
    }
}

fn build_parameters(cfg: &ParametersConfig) -> Result<Parameters, BuildError> {
    let spawn_radius_minimum = match cfg.spawn_radius_minimum {
        Some(v) => v,
        None => {
            debug!("spawn_radius_minimum not set, defaulting to {DEFAULT_SPAWN_RADIUS_MINIMUM}");
            DEFAULT_SPAWN_RADIUS_MINIMUM
        }
    };
    if !cfg.g.is_finite() || cfg.g < 0.0 {
        return Err(BuildError::BadParameter("g"));
    }
    if !cfg.clip_radius_multiplier.is_finite() || cfg.clip_radius_multiplier <= 0.0 {
        return Err(BuildError::BadParameter("clip_radius_multiplier"));
    }
    if !spawn_radius_minimum.is_finite() || spawn_radius_minimum < 0.0 {
        return Err(BuildError::BadParameter("spawn_radius_minimum"));
    }
    if !cfg.collision_erosion.is_finite() || !(0.0..1.0).contains(&cfg.collision_erosion) {
        return Err(BuildError::BadParameter("collision_erosion"));
    }
    if !cfg.drag_damping.is_finite() || !(0.0..=1.0).contains(&cfg.drag_damping) {
        return Err(BuildError::BadParameter("drag_damping"));
    }
    if !cfg.drag_juice.is_finite() || cfg.drag_juice < 0.0 {
        return Err(BuildError::BadParameter("drag_juice"));
    }
    Ok(Parameters {
        g: cfg.g,
        clip_radius_multiplier: cfg.clip_radius_multiplier,
        spawn_radius_minimum,
        collision_erosion: cfg.collision_erosion,
        drag_damping: cfg.drag_damping,
        drag_juice: cfg.drag_juice,
        seed: cfg.seed,
    })
}
