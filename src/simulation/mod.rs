pub mod states;
pub mod params;
pub mod bounds;
pub mod geometry;
pub mod registry;
pub mod planet;
pub mod spawner;
pub mod step;
pub mod drag;
pub mod sandbox;
