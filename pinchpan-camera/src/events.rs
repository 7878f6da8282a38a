//! Semantic gesture events and their listeners.

use pinchpan_common::Vec2;
use std::fmt;

/// A classified gesture, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// A finger (or the mouse button) went down outside any UI element.
    StartTouch { position: Vec2 },
    /// The gesture that started with `StartTouch` is over.
    EndTouch { position: Vec2 },
    /// A quick, short contact.
    Tap { position: Vec2 },
    /// Single contact moved by `delta` this frame.
    Swipe { position: Vec2, delta: Vec2 },
    /// Distance between two contacts changed. `center` is the screen midpoint.
    Pinch {
        center: Vec2,
        old_distance: f32,
        new_distance: f32,
    },
}

/// Discriminant of [`GestureEvent`], used to filter listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    StartTouch,
    EndTouch,
    Tap,
    Swipe,
    Pinch,
}

impl GestureEvent {
    pub fn kind(&self) -> GestureKind {
        match self {
            GestureEvent::StartTouch { .. } => GestureKind::StartTouch,
            GestureEvent::EndTouch { .. } => GestureKind::EndTouch,
            GestureEvent::Tap { .. } => GestureKind::Tap,
            GestureEvent::Swipe { .. } => GestureKind::Swipe,
            GestureEvent::Pinch { .. } => GestureKind::Pinch,
        }
    }
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureEvent::StartTouch { position } => {
                write!(f, "StartTouch({:.1}, {:.1})", position.x, position.y)
            }
            GestureEvent::EndTouch { position } => {
                write!(f, "EndTouch({:.1}, {:.1})", position.x, position.y)
            }
            GestureEvent::Tap { position } => write!(f, "Tap({:.1}, {:.1})", position.x, position.y),
            GestureEvent::Swipe { position, delta } => write!(
                f,
                "Swipe(at {:.1}, {:.1} by {:.1}, {:.1})",
                position.x, position.y, delta.x, delta.y
            ),
            GestureEvent::Pinch {
                old_distance,
                new_distance,
                ..
            } => write!(f, "Pinch({:.2} -> {:.2})", old_distance, new_distance),
        }
    }
}

/// Handle returned when registering a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&GestureEvent)>;

struct Entry {
    id: ListenerId,
    filter: Option<GestureKind>,
    callback: Listener,
}

/// Ordered collection of gesture callbacks.
///
/// Listeners run synchronously, in registration order, on the frame that
/// produced the event.
#[derive(Default)]
pub struct GestureListeners {
    next_id: u64,
    entries: Vec<Entry>,
}

impl GestureListeners {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, filter: Option<GestureKind>, callback: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            filter,
            callback,
        });
        id
    }

    /// Called with the screen position when a gesture starts.
    pub fn on_start_touch<F>(&mut self, mut f: F) -> ListenerId
    where
        F: FnMut(Vec2) + 'static,
    {
        self.register(
            Some(GestureKind::StartTouch),
            Box::new(move |event| {
                if let GestureEvent::StartTouch { position } = event {
                    f(*position);
                }
            }),
        )
    }

    /// Called with the screen position when a gesture ends.
    pub fn on_end_touch<F>(&mut self, mut f: F) -> ListenerId
    where
        F: FnMut(Vec2) + 'static,
    {
        self.register(
            Some(GestureKind::EndTouch),
            Box::new(move |event| {
                if let GestureEvent::EndTouch { position } = event {
                    f(*position);
                }
            }),
        )
    }

    /// Called with the screen position of a completed tap.
    pub fn on_tap<F>(&mut self, mut f: F) -> ListenerId
    where
        F: FnMut(Vec2) + 'static,
    {
        self.register(
            Some(GestureKind::Tap),
            Box::new(move |event| {
                if let GestureEvent::Tap { position } = event {
                    f(*position);
                }
            }),
        )
    }

    /// Called with `(position, delta)` for every frame a single contact moves.
    pub fn on_swipe<F>(&mut self, mut f: F) -> ListenerId
    where
        F: FnMut(Vec2, Vec2) + 'static,
    {
        self.register(
            Some(GestureKind::Swipe),
            Box::new(move |event| {
                if let GestureEvent::Swipe { position, delta } = event {
                    f(*position, *delta);
                }
            }),
        )
    }

    /// Called with `(old_distance, new_distance)` when two contacts pinch.
    pub fn on_pinch<F>(&mut self, mut f: F) -> ListenerId
    where
        F: FnMut(f32, f32) + 'static,
    {
        self.register(
            Some(GestureKind::Pinch),
            Box::new(move |event| {
                if let GestureEvent::Pinch {
                    old_distance,
                    new_distance,
                    ..
                } = event
                {
                    f(*old_distance, *new_distance);
                }
            }),
        )
    }

    /// Called for every event.
    pub fn on_any<F>(&mut self, f: F) -> ListenerId
    where
        F: FnMut(&GestureEvent) + 'static,
    {
        self.register(None, Box::new(f))
    }

    /// Unregister a listener. Returns false if it was already gone.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver `event` to every matching listener.
    pub fn dispatch(&mut self, event: &GestureEvent) {
        let kind = event.kind();
        for entry in &mut self.entries {
            if entry.filter.map_or(true, |k| k == kind) {
                (entry.callback)(event);
            }
        }
    }
}

impl fmt::Debug for GestureListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureListeners")
            .field("listeners", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_filtered_dispatch() {
        let taps = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = GestureListeners::new();
        let sink = taps.clone();
        listeners.on_tap(move |p| sink.borrow_mut().push(p));

        listeners.dispatch(&GestureEvent::StartTouch {
            position: Vec2::ZERO,
        });
        listeners.dispatch(&GestureEvent::Tap {
            position: Vec2::new(3.0, 4.0),
        });

        assert_eq!(*taps.borrow(), vec![Vec2::new(3.0, 4.0)]);
    }

    #[test]
    fn test_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = GestureListeners::new();
        let (a, b) = (order.clone(), order.clone());
        listeners.on_any(move |_| a.borrow_mut().push("any"));
        listeners.on_pinch(move |old, new| {
            assert_eq!((old, new), (100.0, 50.0));
            b.borrow_mut().push("pinch");
        });

        listeners.dispatch(&GestureEvent::Pinch {
            center: Vec2::ZERO,
            old_distance: 100.0,
            new_distance: 50.0,
        });
        assert_eq!(*order.borrow(), vec!["any", "pinch"]);
    }

    #[test]
    fn test_remove_listener() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners = GestureListeners::new();
        let c = count.clone();
        let id = listeners.on_swipe(move |_, _| *c.borrow_mut() += 1);

        let swipe = GestureEvent::Swipe {
            position: Vec2::ZERO,
            delta: Vec2::X,
        };
        listeners.dispatch(&swipe);
        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        listeners.dispatch(&swipe);

        assert_eq!(*count.borrow(), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn test_empty_dispatch_is_noop() {
        let mut listeners = GestureListeners::new();
        listeners.dispatch(&GestureEvent::EndTouch {
            position: Vec2::ZERO,
        });
        assert_eq!(listeners.len(), 0);
    }

    #[test]
    fn test_event_display() {
        let e = GestureEvent::Tap {
            position: Vec2::new(105.0, 102.0),
        };
        assert_eq!(e.to_string(), "Tap(105.0, 102.0)");
        assert_eq!(e.kind(), GestureKind::Tap);
    }
}
