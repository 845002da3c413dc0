//! Keyframe primitive: a timestamped scalar with inbound/outbound slopes.

use serde::{Deserialize, Serialize};

/// A single keyframe of a scalar [`Sequence`](crate::sequence::Sequence).
///
/// Times are in milliseconds. Slopes are in value units per millisecond.
/// Edits that must keep the owning sequence's segment functions consistent go
/// through the `Sequence::set_key_*` methods rather than mutating a key directly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub time: f64,
    pub value: f64,
    #[serde(default)]
    pub slope_in: f64,
    #[serde(default)]
    pub slope_out: f64,
    /// Hold `value` until the next key instead of interpolating.
    #[serde(default, rename = "constant")]
    pub is_step: bool,
}

impl Keyframe {
    pub fn new(time: f64, value: f64, slope_in: f64, slope_out: f64, is_step: bool) -> Self {
        Self {
            time,
            value,
            slope_in,
            slope_out,
            is_step,
        }
    }

    /// Flat key (zero slopes, interpolating).
    pub fn at(time: f64, value: f64) -> Self {
        Self::new(time, value, 0.0, 0.0, false)
    }

    /// Flat step key (zero slopes, holding).
    pub fn step(time: f64, value: f64) -> Self {
        Self::new(time, value, 0.0, 0.0, true)
    }

    /// True when the tangent is split, i.e. `slope_in != -slope_out`.
    /// Informational only; evaluation never consults it.
    #[inline]
    pub fn broken(&self) -> bool {
        self.slope_in != -self.slope_out
    }

    /// Time-mirrored copy used by the reverse derivation: the key moves to
    /// `total_time - time` and the slopes trade places.
    pub fn reversed(&self, total_time: f64) -> Self {
        Self {
            time: total_time - self.time,
            value: self.value,
            slope_in: self.slope_out,
            slope_out: self.slope_in,
            is_step: self.is_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broken_flags_split_tangents() {
        assert!(!Keyframe::new(0.0, 1.0, 2.0, -2.0, false).broken());
        assert!(Keyframe::new(0.0, 1.0, 2.0, 2.0, false).broken());
        assert!(!Keyframe::at(0.0, 1.0).broken());
    }

    #[test]
    fn reversed_swaps_slopes_and_mirrors_time() {
        let k = Keyframe::new(250.0, 3.0, 1.5, -0.5, true);
        let r = k.reversed(1000.0);
        assert_eq!(r.time, 750.0);
        assert_eq!(r.value, 3.0);
        assert_eq!(r.slope_in, -0.5);
        assert_eq!(r.slope_out, 1.5);
        assert!(r.is_step);
    }

    #[test]
    fn serde_uses_constant_for_step_flag() {
        let k = Keyframe::step(10.0, 2.0);
        let json = serde_json::to_value(k).unwrap();
        assert_eq!(json["constant"], serde_json::json!(true));
        assert_eq!(json["slopeIn"], serde_json::json!(0.0));
        let back: Keyframe =
            serde_json::from_value(serde_json::json!({ "time": 10.0, "value": 2.0 })).unwrap();
        assert!(!back.is_step);
        assert_eq!(back.slope_out, 0.0);
    }
}
