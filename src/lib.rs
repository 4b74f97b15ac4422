pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{BodyId, NVec3, TransientBody, TransientPool};
pub use simulation::bounds::{Aabb, BoundingSphere, Ray};
pub use simulation::geometry::{GeometryHandle, GeometryStore};
pub use simulation::registry::{spawn_tier_for_mass, BodyRegistry, BodyTemplate, Tier};
pub use simulation::planet::{PlanetAggregate, PlanetMember};
pub use simulation::spawner::{SpawnParams, Spawner};
pub use simulation::step::{accretion_step, StepReport};
pub use simulation::drag::{pick_body, DragState};
pub use simulation::params::Parameters;
pub use simulation::sandbox::{BuildError, FrameReport, Sandbox};

pub use configuration::config::{
    BoundsConfig, ParametersConfig, PlanetConfig, RegistryConfig, ScenarioConfig, SpawnConfig,
    TemplateConfig,
};

pub use visualization::accresim_vis3d::run_3d;

pub use benchmark::benchmark::{bench_collision_pass, bench_step_curve};
