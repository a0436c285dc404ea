// Bounce scene - an elastic ball sealed inside a rectangular arena

use glam::Vec2;
use thiserror::Error;

use crate::engine::input::{Gesture, TouchEvent};
use crate::engine::physics::body::presets;
use crate::engine::physics::{ColliderHandle, PhysicsBody, PhysicsWorld, RigidBodyHandle};
use crate::game::controller::TouchForceController;

/// Ball radius in scene units
pub const BALL_RADIUS: f32 = 30.0;

/// Gap between the window edge and the arena walls
pub const ARENA_INSET: f32 = 10.0;

/// Impulse that sets the ball moving when the scene starts
const BALL_START_IMPULSE: Vec2 = Vec2::new(20.0, -20.0);

/// Errors from building a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Frame {width}x{height} is too small to hold the arena and ball")]
    FrameTooSmall { width: f32, height: f32 },
}

/// The playable scene: one ball bouncing inside a closed arena
///
/// The arena walls sit [`ARENA_INSET`] units inside the window frame. With
/// full restitution and no friction or damping anywhere, the ball keeps its
/// speed across bounces until a touch intervenes. Scene coordinates have
/// their origin at the center of the frame with y pointing up.
pub struct BounceScene {
    physics: PhysicsWorld,
    ball: RigidBodyHandle,
    ball_collider: ColliderHandle,
    controller: TouchForceController,

    /// Wall hits since the scene started
    bounces: u64,
}

impl BounceScene {
    /// Build the arena and ball for a window frame of the given logical size
    pub fn new(width: f32, height: f32) -> Result<Self, SceneError> {
        let interior = Vec2::new(width - 2.0 * ARENA_INSET, height - 2.0 * ARENA_INSET);
        if interior.x <= 2.0 * BALL_RADIUS || interior.y <= 2.0 * BALL_RADIUS {
            return Err(SceneError::FrameTooSmall { width, height });
        }

        let mut physics = PhysicsWorld::new();

        let boundary = physics.add_rigid_body(presets::boundary_body());
        physics.add_collider(presets::boundary_collider(interior.x, interior.y), boundary);

        let ball = physics.add_rigid_body(presets::ball_body(0.0, 0.0));
        let ball_collider = physics.add_collider(presets::ball_collider(BALL_RADIUS), ball);

        let mut scene = Self {
            physics,
            ball,
            ball_collider,
            controller: TouchForceController::new(),
            bounces: 0,
        };

        // Set the ball moving so the arena is alive before the first touch
        if let Some(body) = scene.physics.get_rigid_body_mut(scene.ball) {
            PhysicsBody::apply_impulse(body, BALL_START_IMPULSE);
        }

        log::info!(
            "Scene ready: {}x{} frame, ball radius {}",
            width,
            height,
            BALL_RADIUS
        );
        Ok(scene)
    }

    /// Route a touch event to the controller
    pub fn handle_touch(&mut self, event: TouchEvent) {
        let body = self
            .physics
            .get_rigid_body_mut(self.ball)
            .map(|body| body as &mut dyn PhysicsBody);

        match event {
            TouchEvent::Down(pos) => self.controller.touch_down(pos, body),
            TouchEvent::Moved(pos) => self.controller.touch_moved(pos, body),
            TouchEvent::Up(pos) => self.controller.touch_up(pos, body),
            // The system taking the touch away ends the interaction like a lift
            TouchEvent::Cancelled(pos) => self.controller.touch_up(pos, body),
        }
    }

    /// Route a recognized gesture to the controller
    pub fn handle_gesture(&mut self, gesture: Gesture) {
        let body = self
            .physics
            .get_rigid_body_mut(self.ball)
            .map(|body| body as &mut dyn PhysicsBody);

        match gesture {
            Gesture::DoubleTap(_) => self.controller.double_tap(body),
        }
    }

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.physics.step(dt);

        for event in self.physics.get_collision_events() {
            if event.is_started() && event.involves(self.ball_collider) {
                self.bounces += 1;
                log::debug!("Bounce #{}", self.bounces);
            }
        }
    }

    /// Current ball position in scene coordinates
    pub fn ball_position(&self) -> Option<Vec2> {
        self.physics
            .get_rigid_body(self.ball)
            .map(PhysicsBody::position)
    }

    /// Current ball velocity
    pub fn ball_velocity(&self) -> Option<Vec2> {
        self.physics
            .get_rigid_body(self.ball)
            .map(PhysicsBody::velocity)
    }

    /// Whether gravity currently acts on the ball
    pub fn gravity_enabled(&self) -> Option<bool> {
        self.physics
            .get_rigid_body(self.ball)
            .map(PhysicsBody::gravity_enabled)
    }

    /// Wall hits since the scene started
    pub fn bounce_count(&self) -> u64 {
        self.bounces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::game_loop::FIXED_TIMESTEP;
    use approx::assert_relative_eq;

    fn scene() -> BounceScene {
        BounceScene::new(800.0, 600.0).expect("an 800x600 frame fits the arena")
    }

    #[test]
    fn test_scene_starts_with_moving_ball() {
        let scene = scene();

        assert_eq!(scene.ball_position(), Some(Vec2::ZERO));
        assert_eq!(scene.bounce_count(), 0);
        assert_eq!(scene.gravity_enabled(), Some(false));

        // The start impulse against unit mass reads back as velocity
        let velocity = scene.ball_velocity().expect("ball exists");
        assert_relative_eq!(velocity.x, 20.0, epsilon = 1e-3);
        assert_relative_eq!(velocity.y, -20.0, epsilon = 1e-3);
    }

    #[test]
    fn test_undersized_frame_is_rejected() {
        // 70 - 2 * 10 leaves a 50 unit interior, less than the ball diameter
        assert!(matches!(
            BounceScene::new(70.0, 600.0),
            Err(SceneError::FrameTooSmall { .. })
        ));
        assert!(BounceScene::new(800.0, 70.0).is_err());
        assert!(BounceScene::new(0.0, 0.0).is_err());
    }

    #[test]
    fn test_press_on_ball_stops_it() {
        let mut scene = scene();

        scene.handle_touch(TouchEvent::Down(Vec2::new(30.0, 0.0)));
        assert_eq!(scene.ball_velocity(), Some(Vec2::ZERO));
    }

    #[test]
    fn test_flick_queues_scaled_force() {
        let mut scene = scene();

        scene.handle_touch(TouchEvent::Down(Vec2::new(100.0, 100.0)));
        scene.handle_touch(TouchEvent::Up(Vec2::new(80.0, 90.0)));

        let body = scene.physics.get_rigid_body(scene.ball).expect("ball exists");
        let force = body.user_force();
        assert_relative_eq!(force.x, 200.0);
        assert_relative_eq!(force.y, 100.0);
    }

    #[test]
    fn test_cancelled_touch_still_slings() {
        let mut scene = scene();

        scene.handle_touch(TouchEvent::Down(Vec2::new(100.0, 100.0)));
        scene.handle_touch(TouchEvent::Cancelled(Vec2::new(80.0, 90.0)));

        let body = scene.physics.get_rigid_body(scene.ball).expect("ball exists");
        assert_relative_eq!(body.user_force().x, 200.0);
        assert_relative_eq!(body.user_force().y, 100.0);
    }

    #[test]
    fn test_flick_force_lasts_one_step() {
        let mut scene = scene();

        // Catch the ball dead, then sling it straight right
        scene.handle_touch(TouchEvent::Down(Vec2::ZERO));
        scene.handle_touch(TouchEvent::Up(Vec2::new(-10.0, 0.0)));

        scene.update(FIXED_TIMESTEP);
        let after_one = scene.ball_velocity().expect("ball exists");
        assert_relative_eq!(after_one.x, 100.0 * FIXED_TIMESTEP, epsilon = 1e-3);
        assert_relative_eq!(after_one.y, 0.0, epsilon = 1e-3);

        // The force must not keep accelerating the ball on later steps
        scene.update(FIXED_TIMESTEP);
        let after_two = scene.ball_velocity().expect("ball exists");
        assert_relative_eq!(after_two.x, after_one.x, epsilon = 1e-3);
    }

    #[test]
    fn test_double_tap_toggles_gravity() {
        let mut scene = scene();
        assert_eq!(scene.gravity_enabled(), Some(false));

        scene.handle_gesture(Gesture::DoubleTap(Vec2::ZERO));
        assert_eq!(scene.gravity_enabled(), Some(true));

        scene.handle_gesture(Gesture::DoubleTap(Vec2::ZERO));
        assert_eq!(scene.gravity_enabled(), Some(false));
    }

    #[test]
    fn test_gravity_pulls_ball_once_enabled() {
        let mut scene = scene();

        // Catch the ball so only gravity acts on it afterwards
        scene.handle_touch(TouchEvent::Down(Vec2::ZERO));
        scene.handle_touch(TouchEvent::Up(Vec2::ZERO));
        scene.handle_gesture(Gesture::DoubleTap(Vec2::ZERO));

        for _ in 0..30 {
            scene.update(FIXED_TIMESTEP);
        }

        assert!(scene.ball_velocity().expect("ball exists").y < -1.0);
        assert!(scene.ball_position().expect("ball exists").y < 0.0);
    }

    #[test]
    fn test_ball_coasts_without_gravity() {
        let mut scene = scene();
        let before = scene.ball_velocity().expect("ball exists");

        for _ in 0..10 {
            scene.update(FIXED_TIMESTEP);
        }

        let after = scene.ball_velocity().expect("ball exists");
        assert_relative_eq!(before.x, after.x, epsilon = 1e-3);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-3);
        assert!(scene.ball_position().expect("ball exists").x > 1.0);
    }

    #[test]
    fn test_wall_bounce_reflects_and_counts() {
        let mut scene = scene();
        if let Some(body) = scene.physics.get_rigid_body_mut(scene.ball) {
            body.set_velocity(Vec2::new(300.0, 0.0));
        }

        // Two simulated seconds, enough to reach the right wall and come back
        for _ in 0..120 {
            scene.update(FIXED_TIMESTEP);
        }

        assert!(scene.bounce_count() >= 1);
        assert!(scene.ball_velocity().expect("ball exists").x < 0.0);
        // The ball stayed inside the arena walls
        assert!(scene.ball_position().expect("ball exists").x.abs() < 390.0);
    }
}
