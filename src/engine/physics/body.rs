use super::collision::CollisionGroups;
use glam::Vec2;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Mutable view of a single dynamic body, as game logic sees it.
///
/// The touch controller talks to the simulation exclusively through this
/// trait, so its decision logic can be exercised against a plain recording
/// stand-in. The live implementation below forwards to a rapier rigid body.
pub trait PhysicsBody {
    /// Current position of the body's center of mass, in scene units.
    fn position(&self) -> Vec2;

    /// Current linear velocity, in scene units per second.
    fn velocity(&self) -> Vec2;

    /// Overwrite the linear velocity on both axes.
    fn set_velocity(&mut self, velocity: Vec2);

    /// Apply a force that acts over the next simulation step.
    fn apply_force(&mut self, force: Vec2);

    /// Apply an instantaneous momentum change.
    fn apply_impulse(&mut self, impulse: Vec2);

    /// Whether world gravity currently accelerates this body.
    fn gravity_enabled(&self) -> bool;

    /// Enable or disable gravity for this body.
    fn set_gravity_enabled(&mut self, enabled: bool);
}

impl PhysicsBody for RigidBody {
    fn position(&self) -> Vec2 {
        let t = self.translation();
        Vec2::new(t.x, t.y)
    }

    fn velocity(&self) -> Vec2 {
        let v = self.linvel();
        Vec2::new(v.x, v.y)
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.set_linvel(vector![velocity.x, velocity.y], true);
    }

    fn apply_force(&mut self, force: Vec2) {
        self.add_force(vector![force.x, force.y], true);
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        RigidBody::apply_impulse(self, vector![impulse.x, impulse.y], true);
    }

    fn gravity_enabled(&self) -> bool {
        self.gravity_scale() != 0.0
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        let scale = if enabled { 1.0 } else { 0.0 };
        self.set_gravity_scale(scale, true);
    }
}

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    gravity_scale: Real,
    linear_damping: Real,
    can_sleep: bool,
    ccd_enabled: bool,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            gravity_scale: 1.0,
            linear_damping: 0.0,
            can_sleep: true,
            ccd_enabled: false,
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            gravity_scale: 0.0,
            linear_damping: 0.0,
            can_sleep: false,
            ccd_enabled: false,
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set the gravity scale (1.0 = normal gravity, 0.0 = no gravity)
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set the linear damping (0.0 = no air resistance)
    pub fn linear_damping(mut self, damping: Real) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Enable continuous collision detection for fast-moving bodies
    pub fn ccd(mut self, enabled: bool) -> Self {
        self.ccd_enabled = enabled;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .gravity_scale(self.gravity_scale)
            .linear_damping(self.linear_damping)
            .can_sleep(self.can_sleep)
            .ccd_enabled(self.ccd_enabled)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    friction: Real,
    restitution: Real,
    mass: Option<Real>,
    active_events: ActiveEvents,
}

impl ColliderBuilder2D {
    /// Create a circle-shaped collider
    pub fn circle(radius: Real) -> Self {
        Self::from_shape(SharedShape::ball(radius))
    }

    /// Create a closed edge-loop collider around a `width` x `height`
    /// rectangle centered on the origin. The loop collides from the inside
    /// and the outside but has no interior volume.
    pub fn edge_loop(width: Real, height: Real) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let corners = vec![
            point![-hw, -hh],
            point![hw, -hh],
            point![hw, hh],
            point![-hw, hh],
        ];
        let segments = vec![[0, 1], [1, 2], [2, 3], [3, 0]];
        Self::from_shape(SharedShape::polyline(corners, Some(segments)))
    }

    fn from_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            collision_groups: CollisionGroups::Default,
            friction: 0.5,
            restitution: 0.0,
            mass: None,
            active_events: ActiveEvents::COLLISION_EVENTS,
        }
    }

    /// Set the collision groups for filtering
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set mass directly (overrides the density rapier derives from the shape)
    pub fn mass(mut self, mass: Real) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        let mut builder = rapier2d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .friction(self.friction)
            .restitution(self.restitution)
            .active_events(self.active_events);

        // Without an explicit mass, rapier derives one from the shape's density
        if let Some(mass) = self.mass {
            builder = builder.mass(mass);
        }

        builder.build()
    }
}

/// Body and collider configurations for the arena's two objects
pub mod presets {
    use super::*;

    /// Create the ball's body: dynamic, undamped, gravity off until toggled
    pub fn ball_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .gravity_scale(0.0) // Gravity starts disabled, a double tap enables it
            .linear_damping(0.0) // Bounces must not decay
            .can_sleep(false) // The one interactive body never sleeps
            .ccd(true) // Hard flicks must not tunnel through the edge loop
            .build()
    }

    /// Create the ball's collider (perfectly elastic circle)
    pub fn ball_collider(radius: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .collision_groups(CollisionGroups::Ball)
            .friction(0.0)
            .restitution(1.0) // Perfect bounce
            .mass(1.0) // Unit mass, forces map directly onto acceleration
            .build()
    }

    /// Create the arena boundary body (fixed at the scene origin)
    pub fn boundary_body() -> RigidBody {
        BodyBuilder::new_fixed().build()
    }

    /// Create the arena boundary collider: a closed edge loop enclosing a
    /// `width` x `height` interior
    pub fn boundary_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::edge_loop(width, height)
            .collision_groups(CollisionGroups::Boundary)
            .friction(0.0)
            .restitution(1.0) // The wall must not absorb energy either
            .build()
    }
}
