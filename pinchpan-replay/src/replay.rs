//! Drives a camera controller through a script.

use crate::script::{FrameBuilder, Script};
use pinchpan_camera::{CameraController, GestureEvent, GestureListeners, Viewport};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info};

/// Number of events of each kind seen during a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCounts {
    pub start_touch: usize,
    pub end_touch: usize,
    pub tap: usize,
    pub swipe: usize,
    pub pinch: usize,
}

impl EventCounts {
    fn record(&mut self, event: &GestureEvent) {
        match event {
            GestureEvent::StartTouch { .. } => self.start_touch += 1,
            GestureEvent::EndTouch { .. } => self.end_touch += 1,
            GestureEvent::Tap { .. } => self.tap += 1,
            GestureEvent::Swipe { .. } => self.swipe += 1,
            GestureEvent::Pinch { .. } => self.pinch += 1,
        }
    }
}

impl fmt::Display for EventCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} started, {} ended, {} taps, {} swipes, {} pinches",
            self.start_touch, self.end_touch, self.tap, self.swipe, self.pinch
        )
    }
}

/// Subscribe listeners that log every gesture.
pub fn attach_logging(listeners: &mut GestureListeners) {
    listeners.on_tap(|position| info!("Tapped at ({:.1}, {:.1})", position.x, position.y));
    listeners.on_start_touch(|position| {
        debug!("Touch started at ({:.1}, {:.1})", position.x, position.y)
    });
    listeners.on_end_touch(|position| {
        debug!("Touch ended at ({:.1}, {:.1})", position.x, position.y)
    });
    listeners.on_swipe(|_, delta| debug!("Swipe ({:.1}, {:.1})", delta.x, delta.y));
    listeners.on_pinch(|old, new| debug!("Pinch {:.2} -> {:.2}", old, new));
}

/// Feed every frame of `script` to `controller`. Returns the event counts.
pub fn run<V: Viewport>(controller: &mut CameraController<V>, script: &Script) -> EventCounts {
    let counts = Rc::new(RefCell::new(EventCounts::default()));
    let sink = counts.clone();
    let id = controller
        .listeners_mut()
        .on_any(move |event| sink.borrow_mut().record(event));

    let mut builder = FrameBuilder::new();
    for (index, spec) in script.frames.iter().enumerate() {
        if let Some(auto_move) = spec.auto_move {
            controller.auto_move_to_world_position(
                auto_move.target(),
                auto_move.zoom,
                auto_move.time,
            );
        }

        let frame = builder.build(spec);
        controller.frame(&frame);

        if spec.cancel_camera {
            debug!("Frame {}: cancelling camera for this gesture", index);
            controller.cancel_camera_for_this_gesture();
        }
    }

    controller.listeners_mut().remove(id);
    let totals = *counts.borrow();
    totals
}
