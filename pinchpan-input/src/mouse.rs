//! Mouse-as-touch emulation.
//!
//! The primary button acts as a single finger and the wheel is turned into a
//! pinch around the cursor.

use crate::contact::{Contact, ContactSnapshot, InputFrame, TouchPhase, WheelPinch};
use crate::{InputMode, InputSource};
use pinchpan_common::Vec2;
use tracing::trace;

/// Contact id reported for the emulated mouse finger.
pub const MOUSE_CONTACT_ID: u64 = u64::MAX;

/// Pinch ratio produced by one frame of wheel movement.
///
/// Scrolling down yields `1 / (speed + 1)`, scrolling up `speed + 1`.
pub fn wheel_pinch_amount(wheel_delta: f32, scroll_speed: f32) -> f32 {
    if wheel_delta < 0.0 {
        1.0 / (scroll_speed + 1.0)
    } else {
        scroll_speed + 1.0
    }
}

/// Input source reading the primary pointer.
#[derive(Debug, Clone)]
pub struct MouseSource {
    scroll_speed: f32,
    held: bool,
    last_position: Option<Vec2>,
}

impl MouseSource {
    /// Create a mouse source with the given wheel pinch speed.
    pub fn new(scroll_speed: f32) -> Self {
        Self {
            scroll_speed,
            held: false,
            last_position: None,
        }
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    /// Whether the emulated finger is currently down.
    pub fn is_held(&self) -> bool {
        self.held
    }
}

impl InputSource for MouseSource {
    fn mode(&self) -> InputMode {
        InputMode::Mouse
    }

    fn snapshot(&mut self, frame: &InputFrame) -> ContactSnapshot {
        let position = frame.pointer.position;
        let delta = self
            .last_position
            .map_or(Vec2::ZERO, |last| position - last);
        self.last_position = Some(position);

        if !frame.focused {
            if self.held {
                trace!("Focus lost with primary button held, dropping mouse contact");
            }
            self.held = false;
            return ContactSnapshot::default();
        }

        let down = frame.pointer.primary_down();
        let phase = match (self.held, down) {
            (false, true) => Some(TouchPhase::Began),
            (true, true) if delta == Vec2::ZERO => Some(TouchPhase::Stationary),
            (true, true) => Some(TouchPhase::Moved),
            (true, false) => Some(TouchPhase::Ended),
            (false, false) => None,
        };
        self.held = down;

        let contacts = phase
            .map(|phase| {
                let delta = if phase == TouchPhase::Began {
                    Vec2::ZERO
                } else {
                    delta
                };
                Contact::new(MOUSE_CONTACT_ID, position, phase).with_delta(delta)
            })
            .into_iter()
            .collect();

        let wheel = frame.pointer.wheel_delta;
        let wheel_pinch = (wheel != 0.0).then(|| {
            let amount = wheel_pinch_amount(wheel, self.scroll_speed);
            trace!("Wheel {:.2} -> pinch amount {:.3}", wheel, amount);
            WheelPinch {
                center: position,
                old_distance: 1.0,
                new_distance: amount,
            }
        });

        ContactSnapshot {
            contacts,
            wheel_pinch,
        }
    }

    fn reset(&mut self) {
        self.held = false;
        self.last_position = None;
    }
}
