// Touch force controller - turns touch interaction into ball physics

use glam::Vec2;

use crate::engine::physics::PhysicsBody;

/// How close a press must land to the body to catch it (scene units)
pub const GRAB_RADIUS: f32 = 50.0;

/// Multiplier from drag displacement to applied force
pub const FLICK_SCALE: f32 = 10.0;

/// State carried from a touch landing to the matching release
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSession {
    /// Scene position where the press started
    pub anchor: Vec2,
}

/// Drives a physics body from touch input
///
/// A press within [`GRAB_RADIUS`] of the body catches it, zeroing its
/// velocity. The release slings it: the applied force points from the release
/// position back toward where the press started, scaled by [`FLICK_SCALE`].
/// The slinging force is applied on every release regardless of where the
/// press landed. A double tap toggles whether gravity acts on the body.
///
/// The body is injected per call rather than owned, so the controller works
/// against anything implementing [`PhysicsBody`]. When no body is supplied
/// every operation is a silent no-op.
#[derive(Default)]
pub struct TouchForceController {
    /// The in-flight touch, between press and release
    session: Option<TouchSession>,
}

impl TouchForceController {
    pub fn new() -> Self {
        Self::default()
    }

    /// A press landed at `pos`; catches the body if the press is close enough
    pub fn touch_down(&mut self, pos: Vec2, body: Option<&mut dyn PhysicsBody>) {
        let Some(body) = body else {
            return;
        };

        self.session = Some(TouchSession { anchor: pos });

        if body.position().distance(pos) <= GRAB_RADIUS {
            body.set_velocity(Vec2::ZERO);
            log::debug!("Ball caught at ({:.1}, {:.1})", pos.x, pos.y);
        }
    }

    /// The press moved; dragging does not steer the body, only the release matters
    pub fn touch_moved(&mut self, _pos: Vec2, _body: Option<&mut dyn PhysicsBody>) {}

    /// The press lifted at `pos`; slings the body back toward the press origin
    pub fn touch_up(&mut self, pos: Vec2, body: Option<&mut dyn PhysicsBody>) {
        let Some(body) = body else {
            return;
        };

        // A release with no recorded press slings relative to the scene origin
        let anchor = self.session.take().map(|s| s.anchor).unwrap_or(Vec2::ZERO);
        let force = (anchor - pos) * FLICK_SCALE;
        body.apply_force(force);
        log::debug!(
            "Ball slung with force ({:.1}, {:.1})",
            force.x,
            force.y
        );
    }

    /// A double tap fired; flips gravity on the body
    pub fn double_tap(&mut self, body: Option<&mut dyn PhysicsBody>) {
        let Some(body) = body else {
            return;
        };

        let enabled = !body.gravity_enabled();
        body.set_gravity_enabled(enabled);
        log::debug!("Gravity {}", if enabled { "on" } else { "off" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Minimal body that records what the controller does to it
    struct RecordingBody {
        position: Vec2,
        velocity: Vec2,
        gravity: bool,
        forces: Vec<Vec2>,
        impulses: Vec<Vec2>,
    }

    impl RecordingBody {
        fn at(position: Vec2) -> Self {
            Self {
                position,
                velocity: Vec2::new(50.0, 50.0),
                gravity: false,
                forces: Vec::new(),
                impulses: Vec::new(),
            }
        }
    }

    impl PhysicsBody for RecordingBody {
        fn position(&self) -> Vec2 {
            self.position
        }

        fn velocity(&self) -> Vec2 {
            self.velocity
        }

        fn set_velocity(&mut self, velocity: Vec2) {
            self.velocity = velocity;
        }

        fn apply_force(&mut self, force: Vec2) {
            self.forces.push(force);
        }

        fn apply_impulse(&mut self, impulse: Vec2) {
            self.impulses.push(impulse);
        }

        fn gravity_enabled(&self) -> bool {
            self.gravity
        }

        fn set_gravity_enabled(&mut self, enabled: bool) {
            self.gravity = enabled;
        }
    }

    #[test]
    fn test_press_near_body_zeroes_velocity() {
        let mut body = RecordingBody::at(Vec2::ZERO);
        let mut controller = TouchForceController::new();

        // (40, 30) is exactly 50 units from the origin
        controller.touch_down(Vec2::new(40.0, 30.0), Some(&mut body));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_catch_radius_is_inclusive() {
        let mut body = RecordingBody::at(Vec2::ZERO);
        let mut controller = TouchForceController::new();

        controller.touch_down(Vec2::new(50.0, 0.0), Some(&mut body));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_press_outside_radius_keeps_velocity() {
        let mut body = RecordingBody::at(Vec2::ZERO);
        let mut controller = TouchForceController::new();

        controller.touch_down(Vec2::new(40.0, 40.0), Some(&mut body));
        assert_eq!(body.velocity, Vec2::new(50.0, 50.0));
        // The press still opened a session even though the catch missed
        assert!(controller.session.is_some());
    }

    #[test]
    fn test_release_slings_toward_press_origin() {
        let mut body = RecordingBody::at(Vec2::ZERO);
        let mut controller = TouchForceController::new();

        controller.touch_down(Vec2::new(100.0, 100.0), Some(&mut body));
        controller.touch_up(Vec2::new(80.0, 90.0), Some(&mut body));

        assert_eq!(body.forces.len(), 1);
        assert_relative_eq!(body.forces[0].x, 200.0);
        assert_relative_eq!(body.forces[0].y, 100.0);
    }

    #[test]
    fn test_release_fires_at_any_distance() {
        let mut body = RecordingBody::at(Vec2::ZERO);
        let mut controller = TouchForceController::new();

        // Press lands far from the body, so it is not caught
        controller.touch_down(Vec2::new(500.0, 0.0), Some(&mut body));
        assert_eq!(body.velocity, Vec2::new(50.0, 50.0));

        // The sling still uses that press as its anchor
        controller.touch_up(Vec2::new(400.0, 0.0), Some(&mut body));
        assert_eq!(body.forces, vec![Vec2::new(1000.0, 0.0)]);
    }

    #[test]
    fn test_release_without_press_anchors_at_origin() {
        let mut body = RecordingBody::at(Vec2::ZERO);
        let mut controller = TouchForceController::new();

        controller.touch_up(Vec2::new(80.0, 90.0), Some(&mut body));
        assert_eq!(body.forces, vec![Vec2::new(-800.0, -900.0)]);
    }

    #[test]
    fn test_release_consumes_session() {
        let mut body = RecordingBody::at(Vec2::ZERO);
        let mut controller = TouchForceController::new();

        controller.touch_down(Vec2::new(100.0, 100.0), Some(&mut body));
        controller.touch_up(Vec2::new(80.0, 90.0), Some(&mut body));
        assert!(controller.session.is_none());

        // A second release falls back to the origin anchor
        controller.touch_up(Vec2::new(10.0, 0.0), Some(&mut body));
        assert_eq!(body.forces[1], Vec2::new(-100.0, 0.0));
    }

    #[test]
    fn test_double_tap_toggles_gravity() {
        let mut body = RecordingBody::at(Vec2::ZERO);
        let mut controller = TouchForceController::new();
        assert!(!body.gravity);

        controller.double_tap(Some(&mut body));
        assert!(body.gravity);

        controller.double_tap(Some(&mut body));
        assert!(!body.gravity);
    }

    #[test]
    fn test_drag_leaves_body_untouched() {
        let mut body = RecordingBody::at(Vec2::ZERO);
        let mut controller = TouchForceController::new();

        controller.touch_down(Vec2::new(0.0, 0.0), Some(&mut body));
        controller.touch_moved(Vec2::new(300.0, 300.0), Some(&mut body));

        assert_eq!(body.velocity, Vec2::ZERO);
        assert!(body.forces.is_empty());
        assert!(body.impulses.is_empty());
    }

    #[test]
    fn test_missing_body_is_silent() {
        let mut controller = TouchForceController::new();

        controller.touch_down(Vec2::new(10.0, 10.0), None);
        controller.touch_moved(Vec2::new(20.0, 20.0), None);
        controller.touch_up(Vec2::new(30.0, 30.0), None);
        controller.double_tap(None);

        // Without a body the press never opened a session
        assert!(controller.session.is_none());

        // So a later release against a real body anchors at the origin
        let mut body = RecordingBody::at(Vec2::ZERO);
        controller.touch_up(Vec2::new(10.0, 0.0), Some(&mut body));
        assert_eq!(body.forces, vec![Vec2::new(-100.0, 0.0)]);
    }
}
