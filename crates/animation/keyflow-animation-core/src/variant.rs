//! Derived views of an asset's structure and event times.

use serde::{Deserialize, Serialize};

use crate::inputs::PlaybackStyle;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureVariant {
    Normal,
    Reverse,
    Rastered,
    RasteredReverse,
}

impl StructureVariant {
    fn pick(rastered: bool, direction: f64) -> Self {
        match (rastered, direction >= 0.0) {
            (false, true) => Self::Normal,
            (false, false) => Self::Reverse,
            (true, true) => Self::Rastered,
            (true, false) => Self::RasteredReverse,
        }
    }

    /// Structure variant sampled by `AnimationAsset::evaluate`: any style other
    /// than continuous reads the rastered curves.
    pub fn for_evaluation(direction: f64, style: PlaybackStyle) -> Self {
        Self::pick(style != PlaybackStyle::Continuous, direction)
    }

    /// Event-time map consulted when firing events: only frame-based playback
    /// reads the rastered event times; rastered-to-fps playback still fires on
    /// the unquantized times.
    pub fn for_events(direction: f64, style: PlaybackStyle) -> Self {
        Self::pick(style == PlaybackStyle::FrameBased, direction)
    }
}
