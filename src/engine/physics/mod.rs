// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{ColliderHandle, PhysicsBody, RigidBodyHandle};
pub use collision::CollisionEvent;
pub use world::PhysicsWorld;

// Re-export commonly used rapier types for convenience
#[allow(unused_imports)]
pub use rapier2d::prelude::{Real, RigidBody, RigidBodyType, Vector};

// Re-export for internal use and future expansion
#[allow(unused_imports)]
pub use body::{BodyBuilder, ColliderBuilder2D};
#[allow(unused_imports)]
pub use collision::CollisionGroups;
