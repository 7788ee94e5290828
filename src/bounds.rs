//! Scalar intervals and remapping between them.

#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

/// A closed scalar interval.
///
/// `min <= max` always holds, whatever order the ends were given in.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_", from = "(f64, f64)", into = "(f64, f64)")
)]
pub struct Bounds {
    min: f64,
    max: f64,
    range: f64,
}

impl Bounds {
    /// The `[0, 1]` interval.
    pub const UNIT: Bounds = Bounds {
        min: 0.0,
        max: 1.0,
        range: 1.0,
    };

    /// Create the interval spanned by `a` and `b`.
    ///
    /// A non-finite `a` is replaced by `0.0`, a non-finite `b` by `1.0`.
    pub fn new(a: f64, b: f64) -> Bounds {
        let a = if a.is_finite() { a } else { 0.0 };
        let b = if b.is_finite() { b } else { 1.0 };
        let (min, max) = if a < b { (a, b) } else { (b, a) };
        Bounds {
            min,
            max,
            range: max - min,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    /// The position of `value` inside these bounds, in `[0, 1]`.
    ///
    /// Returns `None` if `value` is NaN or lies outside the bounds. A
    /// zero-range interval maps its only value to `0.0`.
    pub fn normalize(&self, value: f64) -> Option<f64> {
        if !self.is_in_bounds(value, false, false) {
            return None;
        }
        if self.range == 0.0 {
            Some(0.0)
        } else {
            Some((value - self.min) / self.range)
        }
    }

    /// Map a normalized `value` in `[0, 1]` back into these bounds.
    pub fn remap(&self, value: f64) -> Option<f64> {
        if (0.0..=1.0).contains(&value) {
            Some(self.min + value * self.range)
        } else {
            None
        }
    }

    /// Whether `value` lies inside these bounds.
    ///
    /// Each edge can independently be made exclusive.
    pub fn is_in_bounds(&self, value: f64, min_exclusive: bool, max_exclusive: bool) -> bool {
        let above_min = if min_exclusive {
            value > self.min
        } else {
            value >= self.min
        };
        let below_max = if max_exclusive {
            value < self.max
        } else {
            value <= self.max
        };
        above_min && below_max
    }

    /// Widen the interval so that it includes `value`.
    ///
    /// This never shrinks the interval, and moves at most one of its ends.
    pub fn extend_to(&mut self, value: f64) {
        if value < self.min {
            self.min = value;
        } else if value > self.max {
            self.max = value;
        } else {
            return;
        }
        self.range = self.max - self.min;
    }

    /// Merge two intervals that overlap or touch.
    ///
    /// Returns `None` when the intervals are disjoint.
    pub fn try_fusion(&self, other: &Bounds) -> Option<Bounds> {
        let touching = self.is_in_bounds(other.min, false, false)
            || self.is_in_bounds(other.max, false, false)
            || other.is_in_bounds(self.min, false, false)
            || other.is_in_bounds(self.max, false, false);
        if !touching {
            return None;
        }
        let mut fused = *self;
        fused.extend_to(other.min);
        fused.extend_to(other.max);
        Some(fused)
    }

    /// Map `value` from `source` into `target`.
    ///
    /// Returns `None` if `value` lies outside `source`.
    pub fn remap_using_bounds(value: f64, source: &Bounds, target: &Bounds) -> Option<f64> {
        source.normalize(value).and_then(|n| target.remap(n))
    }

    /// Map `value` from `[source_min, source_max]` into `[target_min, target_max]`.
    pub fn remap_using_values(
        value: f64,
        source_min: f64,
        source_max: f64,
        target_min: f64,
        target_max: f64,
    ) -> Option<f64> {
        Bounds::remap_using_bounds(
            value,
            &Bounds::new(source_min, source_max),
            &Bounds::new(target_min, target_max),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::UNIT
    }
}

impl From<(f64, f64)> for Bounds {
    fn from((a, b): (f64, f64)) -> Self {
        Bounds::new(a, b)
    }
}

impl From<Bounds> for (f64, f64) {
    fn from(bounds: Bounds) -> Self {
        (bounds.min, bounds.max)
    }
}
