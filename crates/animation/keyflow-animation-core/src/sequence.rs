//! Ordered keyframes for one scalar attribute plus their segment functions.
//!
//! Wiring after every structural edit, for n keys:
//! - `segments[i]` runs from `keys[i]` to `keys[i + 1]` for i in [0, n-1)
//! - `closing` runs from the last key back to the first key and doubles as the
//!   first key's incoming segment. The reverse and raster derivations rely on
//!   every key owning an outgoing segment, so the closing segment is always
//!   present when the sequence is non-empty.

use crate::keyframe::Keyframe;
use crate::segment::SegmentFunction;

#[derive(Clone, Debug, Default)]
pub struct Sequence {
    keys: Vec<Keyframe>,
    segments: Vec<SegmentFunction>,
    closing: Option<SegmentFunction>,
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an unordered key list: sorts once, wires once.
    pub fn from_keys(keys: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut seq = Self {
            keys: keys.into_iter().collect(),
            segments: Vec::new(),
            closing: None,
        };
        seq.sort_keys();
        seq.rewire();
        seq
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn get_key(&self, index: usize) -> Option<&Keyframe> {
        self.keys.get(index)
    }

    pub fn first_key(&self) -> Option<&Keyframe> {
        self.keys.first()
    }

    pub fn last_key(&self) -> Option<&Keyframe> {
        self.keys.last()
    }

    /// Outgoing segment of key `index`. The last key's outgoing segment is the
    /// closing segment.
    pub fn segment(&self, index: usize) -> Option<&SegmentFunction> {
        if index + 1 < self.keys.len() {
            self.segments.get(index)
        } else if index + 1 == self.keys.len() {
            self.closing.as_ref()
        } else {
            None
        }
    }

    /// Incoming segment of key `index`. The first key's incoming segment is the
    /// closing segment.
    pub fn incoming_segment(&self, index: usize) -> Option<&SegmentFunction> {
        match index {
            0 => self.closing.as_ref(),
            i if i < self.keys.len() => self.segments.get(i - 1),
            _ => None,
        }
    }

    pub fn closing_segment(&self) -> Option<&SegmentFunction> {
        self.closing.as_ref()
    }

    /// Scalar value at `time` (ms).
    ///
    /// An empty sequence yields `0.0`, which callers cannot tell apart from a
    /// real zero; use [`Sequence::try_evaluate`] where that matters.
    pub fn evaluate(&self, time: f64) -> f64 {
        self.try_evaluate(time).unwrap_or(0.0)
    }

    /// Like [`Sequence::evaluate`] but `None` when there are no keys.
    pub fn try_evaluate(&self, time: f64) -> Option<f64> {
        let first = self.keys.first()?;
        if self.keys.len() == 1 || time <= first.time {
            return Some(first.value);
        }
        for (i, pair) in self.keys.windows(2).enumerate() {
            if pair[0].time <= time && time < pair[1].time {
                return Some(self.segments[i].evaluate(time));
            }
        }
        self.keys.last().map(|k| k.value)
    }

    /// Insert a key, re-sort ascending by time and rewire all segments.
    /// Returns the index the key landed at.
    pub fn add_key(&mut self, key: Keyframe) -> usize {
        self.keys.push(key);
        self.sort_keys();
        self.rewire();
        self.index_of(&key).unwrap_or(self.keys.len() - 1)
    }

    /// Remove the first key equal to `key`.
    pub fn remove_key(&mut self, key: &Keyframe) -> Option<Keyframe> {
        let index = self.index_of(key)?;
        self.remove_key_at(index)
    }

    pub fn remove_key_at(&mut self, index: usize) -> Option<Keyframe> {
        if index >= self.keys.len() {
            return None;
        }
        let removed = self.keys.remove(index);
        self.rewire();
        Some(removed)
    }

    pub fn index_of(&self, key: &Keyframe) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Move key `index` to `time`. Keys are re-sorted and rewired; the key's
    /// new index is returned.
    pub fn set_key_time(&mut self, index: usize, time: f64) -> Option<usize> {
        let key = self.keys.get_mut(index)?;
        key.time = time;
        let moved = *key;
        self.sort_keys();
        self.rewire();
        self.index_of(&moved)
    }

    pub fn set_key_value(&mut self, index: usize, value: f64) -> Option<usize> {
        self.keys.get_mut(index)?.value = value;
        self.refresh_around(index);
        Some(index)
    }

    pub fn set_key_slope_in(&mut self, index: usize, slope: f64) -> Option<usize> {
        self.keys.get_mut(index)?.slope_in = slope;
        self.refresh_around(index);
        Some(index)
    }

    pub fn set_key_slope_out(&mut self, index: usize, slope: f64) -> Option<usize> {
        self.keys.get_mut(index)?.slope_out = slope;
        self.refresh_around(index);
        Some(index)
    }

    pub fn set_key_step(&mut self, index: usize, is_step: bool) -> Option<usize> {
        self.keys.get_mut(index)?.is_step = is_step;
        self.refresh_around(index);
        Some(index)
    }

    /// Time-mirrored copy: every key is reflected around `total_time` with its
    /// slopes swapped.
    pub fn reversed(&self, total_time: f64) -> Self {
        Self::from_keys(self.keys.iter().map(|k| k.reversed(total_time)))
    }

    fn sort_keys(&mut self) {
        self.keys.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    fn rewire(&mut self) {
        self.segments.clear();
        self.segments.extend(
            self.keys
                .windows(2)
                .map(|pair| SegmentFunction::new(pair[0], Some(pair[1]))),
        );
        self.closing = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => Some(SegmentFunction::new(*last, Some(*first))),
            _ => None,
        };
    }

    /// Recompute only the segments touching key `index` after a non-time edit.
    fn refresh_around(&mut self, index: usize) {
        let n = self.keys.len();
        let key = self.keys[index];
        if index + 1 < n {
            self.segments[index].set_key_in(key);
        }
        if index > 0 {
            self.segments[index - 1].set_key_out(Some(key));
        }
        if index == 0 || index + 1 == n {
            if let Some(closing) = self.closing.as_mut() {
                closing.set_key_in(self.keys[n - 1]);
                closing.set_key_out(Some(self.keys[0]));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wiring_has_closing_segment_back_to_first() {
        let seq = Sequence::from_keys([
            Keyframe::at(0.0, 1.0),
            Keyframe::at(500.0, 2.0),
            Keyframe::at(1000.0, 3.0),
        ]);
        assert_eq!(seq.segment(0).unwrap().key_out().unwrap().time, 500.0);
        assert_eq!(seq.segment(1).unwrap().key_out().unwrap().time, 1000.0);
        let closing = seq.segment(2).unwrap();
        assert_eq!(closing.key_in().time, 1000.0);
        assert_eq!(closing.key_out().unwrap().time, 0.0);
        assert_eq!(seq.incoming_segment(0), seq.closing_segment());
        assert!(seq.segment(3).is_none());
    }

    #[test]
    fn empty_sequence_has_no_segments() {
        let seq = Sequence::new();
        assert!(seq.closing_segment().is_none());
        assert!(seq.segment(0).is_none());
        assert_eq!(seq.try_evaluate(10.0), None);
        assert_eq!(seq.evaluate(10.0), 0.0);
    }

    #[test]
    fn value_edit_refreshes_neighbours() {
        let mut seq = Sequence::from_keys([Keyframe::at(0.0, 0.0), Keyframe::at(100.0, 10.0)]);
        assert_eq!(seq.set_key_value(1, 20.0), Some(1));
        assert_eq!(seq.segment(0).unwrap().key_out().unwrap().value, 20.0);
        assert_eq!(seq.closing_segment().unwrap().key_in().value, 20.0);
        assert!((seq.evaluate(50.0) - 10.0).abs() < 1e-9);
        assert_eq!(seq.set_key_value(5, 1.0), None);
    }
}
