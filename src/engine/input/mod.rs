// Input system - window events in, touch events and gestures out

pub mod gesture;
pub mod pointer;

pub use gesture::{Gesture, TapRecognizer};
pub use pointer::{PointerTracker, TouchEvent};
