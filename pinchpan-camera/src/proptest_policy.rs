//! Property tests for the camera policy.
//!
//! These check the numerical guarantees of pinch zoom and the bounds pass
//! against arbitrary gesture sizes and camera poses.
