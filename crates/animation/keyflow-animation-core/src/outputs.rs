//! Per-tick result of `AnimationController::advance`.

use serde::{Deserialize, Serialize};

use crate::structure::Mutator;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickOutput {
    /// New values, `None` when the sampled time did not move.
    #[serde(default)]
    pub mutator: Option<Mutator>,
    /// Sampled time wrapped into `[0, total_time)`; 0 for an empty asset.
    pub time: f64,
    /// +1 forward, -1 reverse, 0 stopped or past the end of a play-once clip.
    pub direction: f64,
    /// Event names dispatched this tick, in firing order.
    #[serde(default)]
    pub events: Vec<String>,
}

impl TickOutput {
    /// `(mutator, time)` pair.
    pub fn into_parts(self) -> (Option<Mutator>, f64) {
        (self.mutator, self.time)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mutator.is_none() && self.events.is_empty()
    }
}
