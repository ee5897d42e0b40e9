//! Debounced button input and gesture recognition.

mod button;
mod gestures;

pub use button::{ButtonChannel, Transition};
pub use gestures::{GestureConfig, GestureEvent, GestureEvents, GestureRecognizer};
