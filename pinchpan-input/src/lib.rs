//! pinchpan-input: normalize mouse and multi-touch input into contact snapshots
//!
//! Each frame the host hands an [`InputFrame`] to an [`InputSource`], which
//! turns it into a [`ContactSnapshot`]: zero, one or two (or more) contacts
//! with position and per-frame delta, regardless of the device behind them.

mod collector;
mod contact;
mod mouse;
mod touch;

use std::fmt;
use tracing::debug;

pub use collector::InputCollector;
pub use contact::{
    Contact, ContactSnapshot, InputFrame, PointerButtons, PointerState, TouchPhase, WheelPinch,
};
pub use mouse::{wheel_pinch_amount, MouseSource, MOUSE_CONTACT_ID};
pub use touch::TouchSource;

/// Which device drives gestures for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputMode {
    Mouse,
    Touch,
}

impl InputMode {
    /// Mouse when forced or when the platform lacks touch support, touch otherwise.
    pub fn select(force_use_mouse: bool, touch_supported: bool) -> Self {
        if force_use_mouse || !touch_supported {
            InputMode::Mouse
        } else {
            InputMode::Touch
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Mouse => write!(f, "mouse"),
            InputMode::Touch => write!(f, "touch"),
        }
    }
}

/// A device that can produce a normalized contact snapshot each frame.
pub trait InputSource: fmt::Debug {
    /// The device this source reads.
    fn mode(&self) -> InputMode;

    /// Normalize one frame of raw input.
    fn snapshot(&mut self, frame: &InputFrame) -> ContactSnapshot;

    /// Forget any per-device state carried between frames.
    fn reset(&mut self) {}
}

/// Build the source for `mode`.
pub fn source_for(mode: InputMode, scroll_speed: f32) -> Box<dyn InputSource> {
    debug!("Using {} input", mode);
    match mode {
        InputMode::Mouse => Box::new(MouseSource::new(scroll_speed)),
        InputMode::Touch => Box::new(TouchSource::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selection() {
        assert_eq!(InputMode::select(true, true), InputMode::Mouse);
        assert_eq!(InputMode::select(true, false), InputMode::Mouse);
        assert_eq!(InputMode::select(false, false), InputMode::Mouse);
        assert_eq!(InputMode::select(false, true), InputMode::Touch);
    }

    #[test]
    fn test_source_for_mode() {
        assert_eq!(source_for(InputMode::Mouse, 2.0).mode(), InputMode::Mouse);
        assert_eq!(source_for(InputMode::Touch, 2.0).mode(), InputMode::Touch);
    }
}
