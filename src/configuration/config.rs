//! Configuration types for loading sandbox scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! sandbox scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – physical constants and control tuning
//! - [`PlanetConfig`]     – which template seeds the planet
//! - [`RegistryConfig`]   – the four tier lists of spawnable templates
//! - [`SpawnConfig`]      – fixed placements executed once at startup
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! parameters:
//!   g: 6.67428e-6              # gravitational constant (scaled, not SI)
//!   clip_radius_multiplier: 100.0
//!   spawn_radius_minimum: 2.0
//!   collision_erosion: 0.25
//!   drag_damping: 0.9
//!   drag_juice: 100.0
//!   seed: 42
//!
//! planet:
//!   seed_template: "teapot"
//!
//! registry:
//!   small:
//!     - id: "teapot"
//!       path: "assets/teapot/scene.gltf"
//!       mass: 1.0
//!       scale: [1.0, 1.0, 1.0]
//!       bounds: { min: [-0.5, -0.4, -0.3], max: [0.5, 0.4, 0.3] }
//!   medium: []
//!   large: []
//!   extra_large: []
//!
//! spawns:
//!   - id: "teapot"
//!     position: [1.0, 0.0, 0.0]
//! ```
//!
//! The sandbox then maps this configuration into its internal runtime
//! representation; vector fields are validated to exactly 3 components at
//! build time.

use serde::Deserialize;

/// Global physical constants and control tuning for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub g: f64,                       // gravitational constant (scaled)
    pub clip_radius_multiplier: f64,  // despawn distance in planet radii; also the spawn band width
    pub spawn_radius_minimum: Option<f64>, // inner edge of the spawn band in planet radii
    pub collision_erosion: f64,       // per-axis AABB shrink fraction before contact tests
    pub drag_damping: f64,            // velocity fraction kept per frame while a body is held
    pub drag_juice: f64,              // spring strength pulling a held body toward the cursor
    pub seed: u64,                    // deterministic seed to make runs reproducable
}

/// Which template the planet starts from
#[derive(Deserialize, Debug, Clone)]
pub struct PlanetConfig {
    pub seed_template: String, // template id, must exist in the registry
}

/// Model-space box of a template's source asset
#[derive(Deserialize, Debug, Clone)]
pub struct BoundsConfig {
    pub min: Vec<f64>, // box minimum corner
    pub max: Vec<f64>, // box maximum corner
}

/// One spawnable template entry
#[derive(Deserialize, Debug, Clone)]
pub struct TemplateConfig {
    pub id: String,           // unique template id
    pub path: String,         // source asset path, kept for diagnostics
    pub mass: f64,            // arbitrary mass unit
    pub scale: Vec<f64>,      // normalized visual scale applied on clone
    pub bounds: BoundsConfig, // model-space bounding box
}

/// The template catalog, partitioned into the four size tiers
#[derive(Deserialize, Debug, Clone)]
pub struct RegistryConfig {
    pub small: Vec<TemplateConfig>,
    pub medium: Vec<TemplateConfig>,
    pub large: Vec<TemplateConfig>,
    pub extra_large: Vec<TemplateConfig>,
}

/// One fixed placement executed at startup
#[derive(Deserialize, Debug, Clone)]
pub struct SpawnConfig {
    pub id: String,        // template id, must exist in the registry
    pub position: Vec<f64>, // world position of the new body
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig, // physical constants and control tuning
    pub planet: PlanetConfig,         // planet seeding
    pub registry: RegistryConfig,     // spawnable template catalog
    #[serde(default)]
    pub spawns: Vec<SpawnConfig>,     // fixed startup placements
}
