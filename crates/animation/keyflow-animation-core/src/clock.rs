//! Time sources.
//!
//! A [`ClockSource`] is the host's global clock: current time plus a global
//! scale. Each controller keeps its own [`LocalClock`], a scaled virtual
//! timeline derived from the source.

use std::cell::Cell;

/// Global time source injected into controllers.
pub trait ClockSource {
    /// Current time in ms.
    fn now(&self) -> f64;

    /// Global time scale applied to controllers that follow it.
    fn scale(&self) -> f64 {
        1.0
    }

    /// Bumped every time `scale` changes. Controllers compare it on each tick
    /// to pick up scale changes.
    fn scale_revision(&self) -> u64 {
        0
    }
}

/// Host-driven clock: time only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<f64>,
    scale: Cell<f64>,
    revision: Cell<u64>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Cell::new(0.0),
            scale: Cell::new(1.0),
            revision: Cell::new(0),
        }
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_now(&self, now: f64) {
        self.now.set(now);
    }

    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }

    pub fn set_scale(&self, scale: f64) {
        if scale != self.scale.get() {
            self.scale.set(scale);
            self.revision.set(self.revision.get().wrapping_add(1));
        }
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn scale(&self) -> f64 {
        self.scale.get()
    }

    fn scale_revision(&self) -> u64 {
        self.revision.get()
    }
}

/// Scaled virtual clock: `offset + (now - start) * scale`.
///
/// Setting the time or the scale rebases `start` to the source's current time
/// so the local timeline stays continuous.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalClock {
    scale: f64,
    offset: f64,
    start: f64,
}

impl LocalClock {
    pub fn new(now: f64) -> Self {
        Self {
            scale: 1.0,
            offset: 0.0,
            start: now,
        }
    }

    #[inline]
    pub fn get(&self, now: f64) -> f64 {
        self.offset + (now - self.start) * self.scale
    }

    /// Jump the local timeline to `time`.
    pub fn set(&mut self, time: f64, now: f64) {
        self.offset = time;
        self.start = now;
    }

    pub fn set_scale(&mut self, scale: f64, now: f64) {
        self.offset = self.get(now);
        self.start = now;
        self.scale = scale;
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Local time at the last rebase.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }
}
