use std::cell::Cell;
use std::rc::Rc;

/// Shared switch deciding whether gestures move the camera.
///
/// Clones share the same flag, so a listener can capture a handle and veto
/// camera movement for the gesture it is observing. The controller re-arms
/// the flag whenever a gesture starts or ends.
#[derive(Debug, Clone)]
pub struct CameraControl {
    enabled: Rc<Cell<bool>>,
}

impl Default for CameraControl {
    fn default() -> Self {
        Self {
            enabled: Rc::new(Cell::new(true)),
        }
    }
}

impl CameraControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Stop applying pan/zoom until the current gesture finishes.
    /// Gesture events keep firing.
    pub fn cancel_for_this_gesture(&self) {
        self.enabled.set(false);
    }

    pub(crate) fn rearm(&self) {
        self.enabled.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let control = CameraControl::new();
        let handle = control.clone();
        assert!(control.is_enabled());

        handle.cancel_for_this_gesture();
        assert!(!control.is_enabled());

        control.rearm();
        assert!(handle.is_enabled());
    }
}
