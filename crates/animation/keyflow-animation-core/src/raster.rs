//! Rastering: quantize continuous curves and event times to a frame grid.
//!
//! A rastered sequence holds one step key per frame in `[0, total_time)`, each
//! carrying the source curve's value at that frame time.

use std::collections::BTreeMap;

use crate::config::DEFAULT_FPS;
use crate::keyframe::Keyframe;
use crate::sequence::Sequence;
use crate::structure::AnimationStructure;

/// Frame length in ms for `fps`. Non-finite or non-positive rates fall back to
/// [`DEFAULT_FPS`].
pub fn frame_duration(fps: f64) -> f64 {
    let fps = if fps.is_finite() && fps > 0.0 {
        fps
    } else {
        log::warn!("invalid frame rate {fps}; rastering at {DEFAULT_FPS} fps");
        DEFAULT_FPS
    };
    1000.0 / fps
}

/// Sample `source` every frame from 0 (inclusive) to `total_time` (exclusive).
/// An empty sequence stays empty.
pub fn rasterize_sequence(source: &Sequence, total_time: f64, fps: f64) -> Sequence {
    if source.is_empty() {
        return Sequence::new();
    }
    let step = frame_duration(fps);
    let keys = (0_u64..)
        .map(|frame| frame as f64 * step)
        .take_while(|t| *t < total_time)
        .map(|t| Keyframe::step(t, source.evaluate(t)));
    Sequence::from_keys(keys)
}

pub fn rasterize_structure(
    source: &AnimationStructure,
    total_time: f64,
    fps: f64,
) -> AnimationStructure {
    source.map_sequences(&mut |seq| rasterize_sequence(seq, total_time, fps))
}

/// Floor `time` to the start of its frame.
#[inline]
pub fn floor_to_frame(time: f64, fps: f64) -> f64 {
    time - time % frame_duration(fps)
}

pub fn rasterize_event_times(times: &BTreeMap<String, f64>, fps: f64) -> BTreeMap<String, f64> {
    times
        .iter()
        .map(|(name, t)| (name.clone(), floor_to_frame(*t, fps)))
        .collect()
}
