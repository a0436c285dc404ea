// Gesture recognition built on top of the raw touch event stream

use std::time::Duration;

use glam::Vec2;

use crate::engine::input::pointer::TouchEvent;

/// Longest press that still counts as a tap
pub const MAX_TAP_PRESS: Duration = Duration::from_millis(250);

/// Longest pause between a tap lifting and the next tap landing
pub const DOUBLE_TAP_GAP: Duration = Duration::from_millis(300);

/// How far a press may wander and still count as a tap
pub const TAP_SLOP: f32 = 12.0;

/// How far apart two taps may land and still chain into a double tap
pub const DOUBLE_TAP_RADIUS: f32 = 60.0;

/// A recognized higher-level gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Two quick taps in roughly the same spot; carries the second tap's position
    DoubleTap(Vec2),
}

/// Recognizes double taps from [`TouchEvent`]s
///
/// A tap is a press that lifts within [`MAX_TAP_PRESS`] without wandering more
/// than [`TAP_SLOP`]. Two taps chain into a [`Gesture::DoubleTap`] when the
/// second lands within [`DOUBLE_TAP_GAP`] of the first lifting and within
/// [`DOUBLE_TAP_RADIUS`] of it. The gesture fires on the second tap's up
/// event. Timestamps are passed in by the caller so recognition is
/// deterministic under test.
#[derive(Default)]
pub struct TapRecognizer {
    /// Where and when the current press started, while it can still be a tap
    pending_down: Option<(Vec2, Duration)>,

    /// Where and when the previous tap lifted, while a double tap can still chain
    last_tap: Option<(Vec2, Duration)>,
}

impl TapRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one touch event; returns a gesture when one completes
    pub fn observe(&mut self, event: TouchEvent, now: Duration) -> Option<Gesture> {
        match event {
            TouchEvent::Down(pos) => {
                self.pending_down = Some((pos, now));
                None
            }
            TouchEvent::Moved(pos) => {
                if let Some((down_pos, _)) = self.pending_down {
                    if pos.distance(down_pos) > TAP_SLOP {
                        // Wandered too far; this press is a drag, not a tap
                        self.pending_down = None;
                        self.last_tap = None;
                    }
                }
                None
            }
            TouchEvent::Up(pos) => self.finish_press(pos, now),
            TouchEvent::Cancelled(_) => {
                self.pending_down = None;
                self.last_tap = None;
                None
            }
        }
    }

    fn finish_press(&mut self, pos: Vec2, now: Duration) -> Option<Gesture> {
        let (down_pos, down_time) = self.pending_down.take()?;

        let held = now.saturating_sub(down_time);
        if held > MAX_TAP_PRESS || pos.distance(down_pos) > TAP_SLOP {
            self.last_tap = None;
            return None;
        }

        if let Some((last_pos, last_up)) = self.last_tap.take() {
            let gap = down_time.saturating_sub(last_up);
            if gap <= DOUBLE_TAP_GAP && pos.distance(last_pos) <= DOUBLE_TAP_RADIUS {
                return Some(Gesture::DoubleTap(pos));
            }
        }

        self.last_tap = Some((pos, now));
        None
    }
}
