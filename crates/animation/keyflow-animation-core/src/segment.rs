//! Per-segment cubic between two keyframes.
//!
//! f(dt) = a*dt^3 + b*dt^2 + c*dt + d, dt = t - key_in.time, fitted so that
//! f(0) = key_in.value, f'(0) = key_in.slope_out, f(x1) = key_out.value and
//! f'(x1) = key_out.slope_in where x1 = key_out.time - key_in.time.
//!
//! Without a successor, or when `key_in.is_step`, the segment is constant.
//! Two keys at the same time give x1 = 0 and non-finite coefficients; this is
//! not guarded.

use crate::keyframe::Keyframe;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentFunction {
    key_in: Keyframe,
    key_out: Option<Keyframe>,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl SegmentFunction {
    pub fn new(key_in: Keyframe, key_out: Option<Keyframe>) -> Self {
        let mut f = Self {
            key_in,
            key_out,
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: key_in.value,
        };
        f.calculate();
        f
    }

    /// Constant segment holding `key_in.value`.
    pub fn constant(key_in: Keyframe) -> Self {
        Self::new(key_in, None)
    }

    pub fn key_in(&self) -> &Keyframe {
        &self.key_in
    }

    pub fn key_out(&self) -> Option<&Keyframe> {
        self.key_out.as_ref()
    }

    pub fn set_key_in(&mut self, key: Keyframe) {
        self.key_in = key;
        self.calculate();
    }

    pub fn set_key_out(&mut self, key: Option<Keyframe>) {
        self.key_out = key;
        self.calculate();
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        self.key_out.is_none() || self.key_in.is_step
    }

    /// `[a, b, c, d]`.
    pub fn coefficients(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    #[inline]
    pub fn evaluate(&self, time: f64) -> f64 {
        if self.is_constant() {
            return self.key_in.value;
        }
        let dt = time - self.key_in.time;
        self.a * dt.powi(3) + self.b * dt.powi(2) + self.c * dt + self.d
    }

    fn calculate(&mut self) {
        self.d = self.key_in.value;
        let key_out = match self.key_out {
            Some(k) if !self.key_in.is_step => k,
            _ => {
                self.a = 0.0;
                self.b = 0.0;
                self.c = 0.0;
                return;
            }
        };
        let x1 = key_out.time - self.key_in.time;
        self.c = self.key_in.slope_out;
        self.a = (-x1 * (self.key_in.slope_out + key_out.slope_in) - 2.0 * self.key_in.value
            + 2.0 * key_out.value)
            / -x1.powi(3);
        self.b = (key_out.slope_in - self.key_in.slope_out - 3.0 * self.a * x1.powi(2)) / (2.0 * x1);
    }
}
