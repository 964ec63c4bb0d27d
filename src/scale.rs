// 📏 Scales - continuous domain → range maps shared by every layout stage
//
// A point domain (min == max) has no slope; both scales then return the
// start of their range instead of dividing by zero.

use serde::{Deserialize, Serialize};

// ============================================================================
// LINEAR SCALE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
    pub clamp: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale {
            domain,
            range,
            clamp: false,
        }
    }

    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }

    pub fn is_degenerate(&self) -> bool {
        self.domain.0 == self.domain.1
    }

    pub fn apply(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        if self.is_degenerate() {
            return self.range.0;
        }
        let t = (x - d0) / (d1 - d0);
        interpolate(self.range, if self.clamp { t.clamp(0.0, 1.0) } else { t })
    }
}

// ============================================================================
// LOG SCALE
// ============================================================================

/// Logarithmic scale; the base only matters for `log`, the normalized
/// position of a value is base independent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogScale {
    pub base: f64,
    pub domain: (f64, f64),
    pub range: (f64, f64),
    pub clamp: bool,
}

impl LogScale {
    pub fn new(base: f64, domain: (f64, f64), range: (f64, f64)) -> Self {
        LogScale {
            base,
            domain,
            range,
            clamp: false,
        }
    }

    pub fn clamped(mut self) -> Self {
        self.clamp = true;
        self
    }

    pub fn log(&self, x: f64) -> f64 {
        x.ln() / self.base.ln()
    }

    pub fn is_degenerate(&self) -> bool {
        self.domain.0 == self.domain.1
    }

    /// Map `x` through the scale. Non-positive inputs sit at -∞ on a log
    /// axis: with clamping they land on the range start, otherwise they
    /// are reported as the range start as well rather than as NaN.
    pub fn apply(&self, x: f64) -> f64 {
        if self.is_degenerate() {
            return self.range.0;
        }
        if x <= 0.0 {
            return self.range.0;
        }
        let l0 = self.log(self.domain.0);
        let l1 = self.log(self.domain.1);
        let t = (self.log(x) - l0) / (l1 - l0);
        interpolate(self.range, if self.clamp { t.clamp(0.0, 1.0) } else { t })
    }
}

fn interpolate(range: (f64, f64), t: f64) -> f64 {
    range.0 + (range.1 - range.0) * t
}
