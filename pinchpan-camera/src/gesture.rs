//! Gesture recognition state machine.
//!
//! Turns per-frame [`ContactSnapshot`]s into [`GestureEvent`]s. Camera policy
//! lives in the controller; this module only classifies.

use crate::config::ControllerConfig;
use crate::events::GestureEvent;
use crate::ui::UiHitTest;
use pinchpan_common::Vec2;
use pinchpan_input::{Contact, ContactSnapshot, TouchPhase};
use tracing::{debug, trace};

/// Tracks the gesture in progress across frames.
#[derive(Debug, Clone, Default)]
pub struct GestureRecognizer {
    start_position: Vec2,
    start_time: f32,
    last_position: Vec2,
    touching: bool,
    // Set once the gesture has had two contacts; such a gesture is never a tap
    multi_touch: bool,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a gesture is in progress.
    pub fn is_touching(&self) -> bool {
        self.touching
    }

    /// Last known contact position in screen space.
    pub fn touch_position(&self) -> Vec2 {
        self.last_position
    }

    pub fn start_position(&self) -> Vec2 {
        self.start_position
    }

    /// Classify one frame. `now` is the frame time in seconds.
    pub fn process(
        &mut self,
        snapshot: &ContactSnapshot,
        now: f32,
        config: &ControllerConfig,
        ui: Option<&dyn UiHitTest>,
    ) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        match snapshot.contacts.as_slice() {
            [] => self.release(&mut events),
            [contact] => self.single(contact, now, config, ui, &mut events),
            [first, second] => self.pair(first, second, now, &mut events),
            contacts => trace!("{} contacts, ignoring frame", contacts.len()),
        }

        if let Some(pinch) = snapshot.wheel_pinch {
            events.push(GestureEvent::Pinch {
                center: pinch.center,
                old_distance: pinch.old_distance,
                new_distance: pinch.new_distance,
            });
        }
        events
    }

    fn accepts(point: Vec2, config: &ControllerConfig, ui: Option<&dyn UiHitTest>) -> bool {
        config.ignore_ui || !ui.map_or(false, |ui| ui.is_over_ui(point))
    }

    fn start(&mut self, position: Vec2, now: f32, events: &mut Vec<GestureEvent>) {
        debug!("Gesture started at ({:.1}, {:.1})", position.x, position.y);
        self.start_position = position;
        self.last_position = position;
        self.start_time = now;
        self.touching = true;
        self.multi_touch = false;
        events.push(GestureEvent::StartTouch { position });
    }

    fn finish(&mut self, events: &mut Vec<GestureEvent>) {
        debug!(
            "Gesture ended at ({:.1}, {:.1})",
            self.last_position.x, self.last_position.y
        );
        events.push(GestureEvent::EndTouch {
            position: self.last_position,
        });
        self.touching = false;
        self.multi_touch = false;
    }

    /// No contacts: close a gesture whose end we never saw.
    fn release(&mut self, events: &mut Vec<GestureEvent>) {
        if self.touching {
            trace!("Contacts vanished without an end phase");
            self.finish(events);
        }
    }

    fn single(
        &mut self,
        contact: &Contact,
        now: f32,
        config: &ControllerConfig,
        ui: Option<&dyn UiHitTest>,
        events: &mut Vec<GestureEvent>,
    ) {
        let position = contact.position;
        match contact.phase {
            TouchPhase::Began => {
                if self.touching {
                    self.finish(events);
                }
                if Self::accepts(position, config, ui) {
                    self.start(position, now, events);
                } else {
                    debug!("Touch began over UI, ignoring gesture");
                }
            }
            TouchPhase::Moved | TouchPhase::Stationary => {
                self.last_position = position;
                if self.touching && contact.delta != Vec2::ZERO {
                    events.push(GestureEvent::Swipe {
                        position,
                        delta: contact.delta,
                    });
                }
            }
            TouchPhase::Ended => {
                if !self.touching {
                    return;
                }
                let duration = now - self.start_time;
                let distance = position.distance(self.start_position);
                if !self.multi_touch
                    && duration <= config.max_duration_for_tap
                    && distance <= config.max_distance_for_tap
                    && Self::accepts(position, config, ui)
                {
                    events.push(GestureEvent::Tap { position });
                } else {
                    trace!("Not a tap: {:.3}s, {:.1}px", duration, distance);
                }
                self.last_position = position;
                self.finish(events);
            }
            TouchPhase::Canceled => {
                if self.touching {
                    self.finish(events);
                }
            }
        }
    }

    fn pair(
        &mut self,
        first: &Contact,
        second: &Contact,
        now: f32,
        events: &mut Vec<GestureEvent>,
    ) {
        if first.phase.is_finished() || second.phase.is_finished() {
            // The pair is stale; wait for the remaining contact
            return;
        }

        let center = (first.position + second.position) / 2.0;
        if !self.touching {
            self.start(center, now, events);
        }
        self.multi_touch = true;
        self.last_position = center;

        let old_distance = first
            .previous_position()
            .distance(second.previous_position());
        let new_distance = first.position.distance(second.position);
        if old_distance != new_distance {
            events.push(GestureEvent::Pinch {
                center,
                old_distance,
                new_distance,
            });
        }
    }
}
