//! Replay script format and conversion into input frames.
//!
//! A script is a TOML document with one `[[frames]]` table per rendered frame.
//! Touch deltas are not written in the script; they are derived from the
//! previous position of the same touch id.

use anyhow::{Context, Result};
use pinchpan_common::{Vec2, Vec3};
use pinchpan_input::{Contact, InputFrame, PointerButtons, TouchPhase};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

const DEFAULT_FRAME_TIME: f32 = 1.0 / 60.0;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub frames: Vec<FrameSpec>,
}

/// One frame of scripted input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrameSpec {
    /// Seconds since the previous frame.
    #[serde(default = "default_dt")]
    pub dt: f32,
    /// Mouse position; keeps the previous one when omitted.
    #[serde(default)]
    pub pointer: Option<[f32; 2]>,
    /// Primary button held.
    #[serde(default)]
    pub down: bool,
    #[serde(default)]
    pub wheel: f32,
    #[serde(default = "default_true")]
    pub focused: bool,
    #[serde(default)]
    pub touches: Vec<TouchSpec>,
    /// Start a glide before this frame is processed.
    #[serde(default)]
    pub auto_move: Option<AutoMoveSpec>,
    /// Cancel camera movement for the gesture in progress after this frame.
    #[serde(default)]
    pub cancel_camera: bool,
}

fn default_dt() -> f32 {
    DEFAULT_FRAME_TIME
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TouchSpec {
    pub id: u64,
    pub position: [f32; 2],
    pub phase: PhaseSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseSpec {
    Began,
    Moved,
    Stationary,
    Ended,
    Canceled,
}

impl From<PhaseSpec> for TouchPhase {
    fn from(phase: PhaseSpec) -> Self {
        match phase {
            PhaseSpec::Began => TouchPhase::Began,
            PhaseSpec::Moved => TouchPhase::Moved,
            PhaseSpec::Stationary => TouchPhase::Stationary,
            PhaseSpec::Ended => TouchPhase::Ended,
            PhaseSpec::Canceled => TouchPhase::Canceled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AutoMoveSpec {
    pub position: [f32; 3],
    pub zoom: f32,
    pub time: f32,
}

impl AutoMoveSpec {
    pub fn target(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

impl Script {
    /// Parse a script from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("Invalid replay script")
    }

    /// Read and parse a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let script = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse script {}", path.display()))?;
        info!(
            "Loaded {} frames from {}",
            script.frames.len(),
            path.display()
        );
        Ok(script)
    }
}

/// Turns frame specs into [`InputFrame`]s, carrying time, pointer position
/// and touch positions between frames.
#[derive(Debug, Default)]
pub struct FrameBuilder {
    time: f32,
    pointer: Vec2,
    touches: HashMap<u64, Vec2>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&mut self, spec: &FrameSpec) -> InputFrame {
        self.time += spec.dt;
        if let Some(pointer) = spec.pointer {
            self.pointer = Vec2::from_array(pointer);
        }

        let mut buttons = PointerButtons::empty();
        if spec.down {
            buttons.insert(PointerButtons::PRIMARY);
        }

        let touches = spec
            .touches
            .iter()
            .map(|touch| {
                let position = Vec2::from_array(touch.position);
                let phase = TouchPhase::from(touch.phase);
                let delta = match (phase, self.touches.get(&touch.id)) {
                    (TouchPhase::Began, _) | (_, None) => Vec2::ZERO,
                    (_, Some(previous)) => position - *previous,
                };
                if phase.is_finished() {
                    self.touches.remove(&touch.id);
                } else {
                    self.touches.insert(touch.id, position);
                }
                Contact::new(touch.id, position, phase).with_delta(delta)
            })
            .collect();

        let mut frame = InputFrame {
            time: self.time,
            delta_time: spec.dt,
            touches,
            focused: spec.focused,
            ..Default::default()
        };
        frame.pointer.position = self.pointer;
        frame.pointer.buttons = buttons;
        frame.pointer.wheel_delta = spec.wheel;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCRIPT: &str = r#"
        [[frames]]
        touches = [{ id = 1, position = [10.0, 10.0], phase = "began" }]

        [[frames]]
        dt = 0.1
        touches = [{ id = 1, position = [25.0, 5.0], phase = "moved" }]

        [[frames]]
        touches = [{ id = 1, position = [25.0, 5.0], phase = "ended" }]
        auto_move = { position = [1.0, 2.0, 0.0], zoom = 3.0, time = 0.5 }

        [[frames]]
        pointer = [300.0, 200.0]
        wheel = -1.0
        cancel_camera = true
    "#;

    #[test]
    fn test_parse_script() {
        let script = Script::from_toml_str(SCRIPT).unwrap();
        assert_eq!(script.frames.len(), 4);
        assert_eq!(script.frames[0].dt, DEFAULT_FRAME_TIME);
        assert!(script.frames[0].focused);
        assert_eq!(script.frames[1].touches[0].phase, PhaseSpec::Moved);
        assert_eq!(
            script.frames[2].auto_move.unwrap().target(),
            Vec3::new(1.0, 2.0, 0.0)
        );
        assert!(script.frames[3].cancel_camera);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Script::from_toml_str("[[frames]]\ndt = \"fast\"").is_err());
        assert!(Script::from_toml_str(
            "[[frames]]\ntouches = [{ id = 0, position = [0.0, 0.0], phase = \"hover\" }]"
        )
        .is_err());
        assert_eq!(Script::from_toml_str("").unwrap(), Script::default());
    }

    #[test]
    fn test_touch_deltas_follow_ids() {
        let script = Script::from_toml_str(SCRIPT).unwrap();
        let mut builder = FrameBuilder::new();
        let frames: Vec<_> = script.frames.iter().map(|f| builder.build(f)).collect();

        assert_eq!(frames[0].touches[0].delta, Vec2::ZERO);
        assert_eq!(frames[1].touches[0].delta, Vec2::new(15.0, -5.0));
        assert_eq!(frames[2].touches[0].delta, Vec2::ZERO);
        assert!(builder.touches.is_empty());
        assert!((frames[1].time - (DEFAULT_FRAME_TIME + 0.1)).abs() < 1e-6);
        assert_eq!(frames[1].delta_time, 0.1);
    }

    #[test]
    fn test_pointer_is_sticky() {
        let mut builder = FrameBuilder::new();
        let mut spec = Script::from_toml_str(SCRIPT).unwrap().frames[3].clone();
        let first = builder.build(&spec);
        assert_eq!(first.pointer.position, Vec2::new(300.0, 200.0));
        assert_eq!(first.pointer.wheel_delta, -1.0);

        spec.pointer = None;
        spec.down = true;
        let second = builder.build(&spec);
        assert_eq!(second.pointer.position, Vec2::new(300.0, 200.0));
        assert!(second.pointer.primary_down());
    }
}
