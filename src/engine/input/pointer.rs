// Pointer tracking - folds window mouse/touch input into scene-space touch events

use glam::Vec2;
use winit::event::{ElementState, MouseButton, TouchPhase};

/// A touch interaction event, in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    /// A press began
    Down(Vec2),
    /// The press moved while held
    Moved(Vec2),
    /// The press ended
    Up(Vec2),
    /// The press was cancelled by the system
    Cancelled(Vec2),
}

/// Translates raw winit pointer input into [`TouchEvent`]s
///
/// Scene coordinates put the origin at the window center with y growing
/// upward, in logical points. Mouse and touch input produce the same event
/// stream. Only one touch is tracked at a time: the first finger down claims
/// the gesture and additional fingers are ignored until it lifts.
///
/// The methods take decomposed winit values rather than whole `WindowEvent`s
/// so the tracker can be driven directly from tests.
pub struct PointerTracker {
    /// Logical viewport size used for coordinate conversion
    viewport: Vec2,

    /// Last known cursor position, already in scene coordinates
    cursor: Vec2,

    /// Whether the left mouse button is currently held
    mouse_down: bool,

    /// Id of the touch currently owning the gesture, if any
    active_touch: Option<u64>,
}

impl PointerTracker {
    /// Create a tracker for a viewport of the given logical size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Vec2::new(width, height),
            cursor: Vec2::ZERO,
            mouse_down: false,
            active_touch: None,
        }
    }

    /// Update the viewport size used for coordinate conversion
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    /// Convert a window position (origin top-left, y down) to scene coordinates
    fn to_scene(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(x - self.viewport.x / 2.0, self.viewport.y / 2.0 - y)
    }

    /// Track cursor movement; emits a move event while the button is held
    pub fn on_cursor_moved(&mut self, x: f32, y: f32) -> Option<TouchEvent> {
        self.cursor = self.to_scene(x, y);
        if self.mouse_down {
            Some(TouchEvent::Moved(self.cursor))
        } else {
            None
        }
    }

    /// Track a left-button change at the last known cursor position
    pub fn on_mouse_button(
        &mut self,
        state: ElementState,
        button: MouseButton,
    ) -> Option<TouchEvent> {
        if button != MouseButton::Left {
            return None;
        }

        match state {
            ElementState::Pressed if !self.mouse_down => {
                self.mouse_down = true;
                Some(TouchEvent::Down(self.cursor))
            }
            ElementState::Released if self.mouse_down => {
                self.mouse_down = false;
                Some(TouchEvent::Up(self.cursor))
            }
            _ => None,
        }
    }

    /// Track a raw touch; fingers other than the gesture owner are ignored
    pub fn on_touch(&mut self, id: u64, phase: TouchPhase, x: f32, y: f32) -> Option<TouchEvent> {
        let pos = self.to_scene(x, y);

        match phase {
            TouchPhase::Started => {
                if self.active_touch.is_some() {
                    return None;
                }
                self.active_touch = Some(id);
                Some(TouchEvent::Down(pos))
            }
            TouchPhase::Moved => {
                if self.active_touch != Some(id) {
                    return None;
                }
                Some(TouchEvent::Moved(pos))
            }
            TouchPhase::Ended => {
                if self.active_touch != Some(id) {
                    return None;
                }
                self.active_touch = None;
                Some(TouchEvent::Up(pos))
            }
            TouchPhase::Cancelled => {
                if self.active_touch != Some(id) {
                    return None;
                }
                self.active_touch = None;
                Some(TouchEvent::Cancelled(pos))
            }
        }
    }
}
