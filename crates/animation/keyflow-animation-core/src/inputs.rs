//! Input contracts for the controller.
//!
//! Hosts either call the controller setters directly or queue
//! [`ControllerCommand`]s and hand them over before ticking.

use serde::{Deserialize, Serialize};

/// Looping/termination policy.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayMode {
    #[default]
    Loop,
    /// Play to the end and hold just before the last frame.
    PlayOnce,
    /// Play to the end and land one epsilon past it.
    PlayOnceStopAfter,
    ReverseLoop,
    /// Time frozen at the local clock offset captured when entering the mode.
    Stop,
}

/// How sample times are produced and which structure variant is evaluated.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaybackStyle {
    /// Clock-driven, evaluated on the continuous curves.
    #[default]
    Continuous,
    /// Clock-driven, evaluated on curves quantized to the asset's fps.
    RasteredToFps,
    /// One nominal frame (1000 / fps ms) per tick regardless of the clock.
    FrameBased,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum ControllerCommand {
    SetPlayMode { mode: PlayMode },
    SetPlaybackStyle { style: PlaybackStyle },
    SetSpeed { speed: f64 },
    SetFollowsGlobalSpeed { follows: bool },
    /// Jump to an absolute local time in ms.
    JumpTo { time: f64 },
    JumpToLabel { label: String },
}
