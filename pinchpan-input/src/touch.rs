use crate::contact::{ContactSnapshot, InputFrame};
use crate::{InputMode, InputSource};

/// Input source reading the native touch list.
///
/// Touches are passed through as reported; interpreting counts above two is
/// left to the gesture layer.
#[derive(Debug, Clone, Default)]
pub struct TouchSource;

impl TouchSource {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for TouchSource {
    fn mode(&self) -> InputMode {
        InputMode::Touch
    }

    fn snapshot(&mut self, frame: &InputFrame) -> ContactSnapshot {
        ContactSnapshot {
            contacts: frame.touches.clone(),
            wheel_pinch: None,
        }
    }
}
