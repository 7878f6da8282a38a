//! Polling layer for winit hosts.
//!
//! winit delivers input as a stream of window events; the gesture layer wants
//! one snapshot per rendered frame. [`InputCollector`] sits in between: feed it
//! every `WindowEvent`, then call [`InputCollector::frame`] once per frame.

use crate::contact::{Contact, InputFrame, PointerButtons, PointerState, TouchPhase};
use pinchpan_common::Vec2;
use tracing::{debug, trace};
use winit::event::{
    ElementState, MouseButton, MouseScrollDelta, TouchPhase as WinitTouchPhase, WindowEvent,
};

#[derive(Debug, Clone)]
struct TrackedTouch {
    id: u64,
    position: Vec2,
    // Position when the current frame started
    frame_start: Vec2,
    phase: TouchPhase,
    // End seen in the same frame as the start, reported one frame later
    pending_end: Option<TouchPhase>,
}

impl TrackedTouch {
    /// Record an end phase. A touch that began this frame keeps `Began` so
    /// the gesture layer sees the start before the end.
    fn finish(&mut self, position: Vec2, phase: TouchPhase) {
        self.position = position;
        if self.phase == TouchPhase::Began {
            self.pending_end = Some(phase);
        } else {
            self.phase = phase;
        }
    }
}

/// Accumulates window events into per-frame [`InputFrame`]s.
#[derive(Debug, Clone)]
pub struct InputCollector {
    pointer: Vec2,
    buttons: PointerButtons,
    // Buttons pressed since the last frame
    pressed: PointerButtons,
    // Buttons released in the same frame they were pressed
    pending_release: PointerButtons,
    wheel: f32,
    touches: Vec<TrackedTouch>,
    focused: bool,
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl InputCollector {
    pub fn new() -> Self {
        Self {
            pointer: Vec2::ZERO,
            buttons: PointerButtons::empty(),
            pressed: PointerButtons::empty(),
            pending_release: PointerButtons::empty(),
            wheel: 0.0,
            touches: Vec::new(),
            focused: true,
        }
    }

    /// Record a winit window event.
    pub fn handle_window_event(&mut self, event: &WindowEvent<'_>) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = Vec2::new(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let mask = match button {
                    MouseButton::Left => PointerButtons::PRIMARY,
                    MouseButton::Right => PointerButtons::SECONDARY,
                    MouseButton::Middle => PointerButtons::MIDDLE,
                    MouseButton::Other(_) => return,
                };
                match state {
                    ElementState::Pressed => {
                        self.buttons.insert(mask);
                        self.pressed.insert(mask);
                    }
                    ElementState::Released if self.pressed.contains(mask) => {
                        trace!("Press and release of {:?} within one frame", mask);
                        self.pending_release.insert(mask);
                    }
                    ElementState::Released => self.buttons.remove(mask),
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // Only the direction matters downstream
                self.wheel += match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
            }
            WindowEvent::Touch(touch) => {
                let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                self.handle_touch(touch.id, position, touch.phase);
            }
            WindowEvent::Focused(focused) => {
                debug!("Window focus changed: {}", focused);
                self.focused = *focused;
                if !focused {
                    self.buttons = PointerButtons::empty();
                    self.pressed = PointerButtons::empty();
                    self.pending_release = PointerButtons::empty();
                }
            }
            _ => {}
        }
    }

    fn handle_touch(&mut self, id: u64, position: Vec2, phase: WinitTouchPhase) {
        let existing = self.touches.iter_mut().find(|t| t.id == id);
        match (phase, existing) {
            (WinitTouchPhase::Started, Some(t)) => {
                // Id reuse before we saw the previous end
                t.position = position;
                t.frame_start = position;
                t.phase = TouchPhase::Began;
                t.pending_end = None;
            }
            (WinitTouchPhase::Started, None) => self.touches.push(TrackedTouch {
                id,
                position,
                frame_start: position,
                phase: TouchPhase::Began,
                pending_end: None,
            }),
            (WinitTouchPhase::Moved, Some(t)) => {
                t.position = position;
                if t.phase != TouchPhase::Began {
                    t.phase = TouchPhase::Moved;
                }
            }
            (WinitTouchPhase::Ended, Some(t)) => t.finish(position, TouchPhase::Ended),
            (WinitTouchPhase::Cancelled, Some(t)) => t.finish(position, TouchPhase::Canceled),
            (phase, None) => trace!("Ignoring {:?} for unknown touch {}", phase, id),
        }
    }

    /// Produce the snapshot for the frame that just finished and start a new one.
    pub fn frame(&mut self, time: f32, delta_time: f32) -> InputFrame {
        let touches = self
            .touches
            .iter()
            .map(|t| {
                let delta = t.position - t.frame_start;
                let phase = match t.phase {
                    TouchPhase::Moved if delta == Vec2::ZERO => TouchPhase::Stationary,
                    phase => phase,
                };
                Contact::new(t.id, t.position, phase).with_delta(delta)
            })
            .collect();

        let frame = InputFrame {
            time,
            delta_time,
            pointer: PointerState {
                position: self.pointer,
                buttons: self.buttons,
                wheel_delta: self.wheel,
            },
            touches,
            focused: self.focused,
        };

        self.wheel = 0.0;
        self.buttons.remove(self.pending_release);
        self.pressed = PointerButtons::empty();
        self.pending_release = PointerButtons::empty();

        self.touches.retain(|t| !t.phase.is_finished());
        for t in &mut self.touches {
            t.frame_start = t.position;
            t.phase = t.pending_end.take().unwrap_or(TouchPhase::Stationary);
        }

        frame
    }

    /// Number of touches currently tracked.
    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }
}
