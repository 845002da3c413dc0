//! Defaults for new assets and controllers.

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::inputs::{PlayMode, PlaybackStyle};

pub const DEFAULT_FPS: f64 = 60.0;
pub const DEFAULT_SPS: f64 = 10.0;
/// Offset from the clip end used by the play-once clamps (ms).
pub const DEFAULT_END_EPSILON_MS: f64 = 0.01;

/// Frame rates must be finite and positive.
pub fn validate_fps(fps: f64) -> Result<f64, AnimationError> {
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(AnimationError::invalid(
            "fps",
            format!("must be finite and > 0, got {fps}"),
        ))
    }
}

/// Asset defaults.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Frames per second used for rastering and frame-based advance.
    pub fps: f64,
    /// Steps per second; persisted with the asset for authoring tools.
    pub sps: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            sps: DEFAULT_SPS,
        }
    }
}

/// Configuration for creating an [`AnimationController`](crate::controller::AnimationController).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControllerCfg {
    pub play_mode: PlayMode,
    pub playback_style: PlaybackStyle,
    /// Local speed factor, multiplied with the global clock scale when
    /// `follows_global_speed` is set.
    pub speed: f64,
    pub follows_global_speed: bool,
    pub end_epsilon_ms: f64,
}

impl Default for ControllerCfg {
    fn default() -> Self {
        Self {
            play_mode: PlayMode::Loop,
            playback_style: PlaybackStyle::Continuous,
            speed: 1.0,
            follows_global_speed: true,
            end_epsilon_ms: DEFAULT_END_EPSILON_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: ControllerCfg =
            serde_json::from_str(r#"{ "play_mode": "PLAY_ONCE", "speed": 2.0 }"#).unwrap();
        assert_eq!(cfg.play_mode, PlayMode::PlayOnce);
        assert_eq!(cfg.speed, 2.0);
        assert!(cfg.follows_global_speed);
        assert_eq!(cfg.end_epsilon_ms, DEFAULT_END_EPSILON_MS);
        assert_eq!(Config::default().fps, 60.0);
    }

    #[test]
    fn fps_must_be_finite_and_positive() {
        assert_eq!(validate_fps(24.0), Ok(24.0));
        for bad in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                validate_fps(bad),
                Err(AnimationError::InvalidField { ref field, .. }) if field == "fps"
            ));
        }
    }
}
