// Game modules: touch controller and the bounce scene

pub mod controller;
pub mod scene;

pub use scene::BounceScene;
