use bitflags::bitflags;
use pinchpan_common::Vec2;

bitflags! {
    /// Pointer button mask (bits).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        const PRIMARY   = 1 << 0; // Left
        const SECONDARY = 1 << 1; // Right
        const MIDDLE    = 1 << 2;
    }
}

/// Lifecycle phase of a contact within one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// The contact appeared this frame.
    Began,
    /// The contact moved since the previous frame.
    Moved,
    /// The contact is held without movement.
    Stationary,
    /// The contact was lifted this frame.
    Ended,
    /// The platform cancelled the contact (e.g. system gesture took over).
    Canceled,
}

impl TouchPhase {
    /// True for phases after which the contact no longer exists.
    pub fn is_finished(self) -> bool {
        matches!(self, TouchPhase::Ended | TouchPhase::Canceled)
    }
}

/// A single touch or mouse-equivalent point, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Platform identifier, stable for the lifetime of the contact
    pub id: u64,
    /// Current position in screen coordinates
    pub position: Vec2,
    /// Movement since the previous frame
    pub delta: Vec2,
    pub phase: TouchPhase,
}

impl Contact {
    /// Create a contact with no movement.
    pub fn new(id: u64, position: Vec2, phase: TouchPhase) -> Self {
        Self {
            id,
            position,
            delta: Vec2::ZERO,
            phase,
        }
    }

    /// Set the per-frame movement.
    #[must_use]
    pub fn with_delta(mut self, delta: Vec2) -> Self {
        self.delta = delta;
        self
    }

    /// Position one frame ago.
    pub fn previous_position(&self) -> Vec2 {
        self.position - self.delta
    }
}

/// Per-frame state of the primary pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub position: Vec2,
    pub buttons: PointerButtons,
    /// Vertical wheel movement accumulated this frame. Positive scrolls up.
    pub wheel_delta: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            buttons: PointerButtons::empty(),
            wheel_delta: 0.0,
        }
    }
}

impl PointerState {
    pub fn primary_down(&self) -> bool {
        self.buttons.contains(PointerButtons::PRIMARY)
    }
}

/// Raw input snapshot for one rendered frame.
///
/// Produced by the host's polling layer (or [`crate::InputCollector`]) and
/// consumed by an [`crate::InputSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct InputFrame {
    /// Seconds since the session started
    pub time: f32,
    /// Seconds since the previous frame
    pub delta_time: f32,
    pub pointer: PointerState,
    /// Active touches in platform order
    pub touches: Vec<Contact>,
    /// Whether the window has input focus
    pub focused: bool,
}

impl Default for InputFrame {
    fn default() -> Self {
        Self {
            time: 0.0,
            delta_time: 0.0,
            pointer: PointerState::default(),
            touches: Vec::new(),
            focused: true,
        }
    }
}

/// Pinch synthesized from the mouse wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelPinch {
    /// Screen point the zoom is anchored on
    pub center: Vec2,
    pub old_distance: f32,
    pub new_distance: f32,
}

/// Device-independent view of one frame: the active contacts plus an
/// optional wheel pinch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactSnapshot {
    pub contacts: Vec<Contact>,
    pub wheel_pinch: Option<WheelPinch>,
}

impl ContactSnapshot {
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}
