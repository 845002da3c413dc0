//! Named event times and the wrapped-interval query that decides which fire.

use std::collections::BTreeMap;

/// Event name -> time in ms.
pub type EventTimes = BTreeMap<String, f64>;

pub fn reverse_event_times(times: &EventTimes, total_time: f64) -> EventTimes {
    times
        .iter()
        .map(|(name, t)| (name.clone(), total_time - *t))
        .collect()
}

/// Names whose time lies in `[min, max)`.
pub fn events_between(times: &EventTimes, min: f64, max: f64) -> Vec<String> {
    times
        .iter()
        .filter(|(_, t)| min <= **t && **t < max)
        .map(|(name, _)| name.clone())
        .collect()
}

/// Events due in the unwrapped interval `[min, max)` of a clip that loops every
/// `total_time` ms.
///
/// Each loop section crossed contributes `[min_wrapped, total_time)` and the
/// final section contributes `[min_wrapped, max_wrapped)`, with `min_wrapped`
/// reset to 0 after the first section. Tiling a timeline with contiguous
/// windows therefore fires every event exactly once per traversal.
pub fn events_to_fire(times: &EventTimes, min: f64, max: f64, total_time: f64) -> Vec<String> {
    if times.is_empty() || !(total_time > 0.0) || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let mut section = (min / total_time).floor();
    let last_section = (max / total_time).floor();
    let mut lower = min.rem_euclid(total_time);
    let upper = max.rem_euclid(total_time);

    let mut fired = Vec::new();
    while section <= last_section {
        if section == last_section {
            fired.extend(events_between(times, lower, upper));
        } else {
            fired.extend(events_between(times, lower, total_time));
            lower = 0.0;
        }
        section += 1.0;
    }
    fired
}
