//! A cardinal spline, interpolating its base points.

use kurbo::{CubicBez, Point};
#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::curve::Curve;
use crate::util::CubicBezierFactors;
use crate::vec2::Vec2;

const DEFAULT_PRECISION: usize = 25;
const DEFAULT_ALPHA: f64 = 10.0;

/// A cardinal spline through a list of base points.
///
/// The tangent at each base point is the chord between its two neighbours,
/// divided by `alpha`: a bigger `alpha` gives a tighter curve. The ends use
/// a mirrored phantom point in place of the missing neighbour.
///
/// Each segment is sampled `bezier_precision` times from its start, and the
/// last base point closes the output.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        crate = "serde_",
        from = "CardinalSplineState",
        into = "CardinalSplineState"
    )
)]
pub struct CardinalSpline {
    /// The tessellated output.
    points: Curve,
    base: Curve,
    /// `base` with a phantom point on each side.
    extended: Curve,
    alpha: f64,
    bezier_precision: usize,
    factors: CubicBezierFactors,
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(crate = "serde_")]
struct CardinalSplineState {
    base: Curve,
    alpha: f64,
    bezier_precision: usize,
}

impl CardinalSpline {
    pub fn new(bezier_precision: usize, alpha: f64) -> CardinalSpline {
        let bezier_precision = bezier_precision.max(2);
        CardinalSpline {
            points: Curve::new(),
            base: Curve::new(),
            extended: Curve::new(),
            alpha,
            bezier_precision,
            factors: CubicBezierFactors::new(bezier_precision),
        }
    }

    pub fn from_points(
        points: impl IntoIterator<Item = Vec2>,
        bezier_precision: usize,
        alpha: f64,
    ) -> CardinalSpline {
        let mut spline = CardinalSpline::new(bezier_precision, alpha);
        spline.base = Curve::from_points(points);
        spline.build_spline(true);
        spline
    }

    /// The tessellated curve.
    pub fn points(&self) -> &[Vec2] {
        self.points.points()
    }

    pub fn base_points(&self) -> &[Vec2] {
        self.base.points()
    }

    /// The base points with the two phantom end points.
    pub fn extended_points(&self) -> &[Vec2] {
        self.extended.points()
    }

    pub fn nb_points(&self) -> usize {
        self.points.len()
    }

    pub fn nb_base_points(&self) -> usize {
        self.base.len()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn bezier_precision(&self) -> usize {
        self.bezier_precision
    }

    pub fn closest_base_id(&self, p: Vec2) -> Option<usize> {
        self.base.closest_point_id(p)
    }

    pub fn closest_point_id(&self, p: Vec2) -> Option<usize> {
        self.points.closest_point_id(p)
    }

    /// Non-function regions of the tessellated curve.
    pub fn duplicate_x_points(&self) -> Vec<Bounds> {
        self.points.scan_for_duplicate_x()
    }

    /// Runs of tessellated points lying in a non-function region.
    pub fn duplicate_x_runs(&self) -> Vec<Vec<Vec2>> {
        self.points.duplicate_x_runs()
    }

    /// Change the tension divisor, keeping the number of output points.
    pub fn set_alpha(&mut self, alpha: f64) {
        if !alpha.is_finite() {
            log::trace!("ignoring alpha {}", alpha);
            return;
        }
        if alpha == self.alpha {
            return;
        }
        self.alpha = alpha;
        self.build_spline(false);
    }

    pub fn set_bezier_precision(&mut self, bezier_precision: usize) {
        let bezier_precision = bezier_precision.max(2);
        if bezier_precision == self.bezier_precision {
            return;
        }
        log::debug!(
            "cardinal precision {} -> {}",
            self.bezier_precision,
            bezier_precision
        );
        self.bezier_precision = bezier_precision;
        self.factors.fill(bezier_precision);
        self.build_spline(true);
    }

    /// Recompute the phantom points and every segment.
    pub fn build_spline(&mut self, resize: bool) {
        let expected = self.expected_len();
        if resize {
            self.points.resize(expected);
        }
        debug_assert_eq!(self.points.len(), expected);
        log::debug!(
            "rebuilding cardinal spline: {} base points, alpha {}",
            self.base.len(),
            self.alpha
        );

        self.build_extended();
        match self.base.len() {
            0 => (),
            1 => self.points.write(0, self.base.points()[0]),
            n => {
                for seg in 0..n - 1 {
                    self.build_segment(seg);
                }
            }
        }
    }

    /// Insert a base point at `id`, with the same placement rules as
    /// [`BezierSpline::insert_base_point`](crate::BezierSpline::insert_base_point).
    pub fn insert_base_point(&mut self, id: usize, point: Vec2) -> Option<usize> {
        let n = self.base.len();
        let mut id = id.min(n);
        if n >= 2 && id == n - 1 && !self.base.is_between_points(point, n - 2) {
            id = n;
        }
        let id = self.base.insert_point(id, point)?;
        if n < 2 {
            self.build_spline(true);
        } else {
            self.extended.insert_point(id + 1, point);
            self.update_phantom_points();
            self.insert_spline_section(id, point);
        }
        Some(id)
    }

    pub fn remove_base_point(&mut self, id: usize) -> Option<Vec2> {
        let removed = self.base.remove_point(id)?;
        if self.base.len() < 2 {
            self.build_spline(true);
        } else {
            self.extended.remove_point(id + 1);
            self.update_phantom_points();
            self.remove_spline_section(id);
        }
        Some(removed)
    }

    pub fn set_base_point(&mut self, id: usize, point: Vec2) -> bool {
        if !self.base.set_point(id, point) {
            return false;
        }
        self.extended.write(id + 1, point);
        self.update_phantom_points();
        if self.base.len() == 1 {
            self.points.write(0, point);
        } else {
            self.build_segments(id.saturating_sub(2), id + 1);
        }
        true
    }

    /// The index of the output point sitting on base point `id`.
    pub fn base_id_to_spline_id(&self, id: usize) -> Option<usize> {
        if id < self.base.len() {
            Some(id * self.bezier_precision)
        } else {
            None
        }
    }

    /// The base point ending the segment that output point `spline_id`
    /// belongs to.
    pub fn spline_id_to_base_id(&self, spline_id: usize) -> Option<usize> {
        let n = self.base.len();
        if spline_id >= self.points.len() {
            None
        } else if n == 1 {
            Some(0)
        } else {
            Some((spline_id / self.bezier_precision + 1).min(n - 1))
        }
    }

    /// The segments as exact cubic Béziers.
    pub fn cubic_segments(&self) -> Vec<CubicBez> {
        (0..self.base.len().saturating_sub(1))
            .map(|seg| {
                let [p0, p1, p2, p3] = self.segment_points(seg);
                CubicBez::new(
                    Point::from(p0),
                    Point::from(p1),
                    Point::from(p2),
                    Point::from(p3),
                )
            })
            .collect()
    }

    fn expected_len(&self) -> usize {
        match self.base.len() {
            0 => 0,
            n => (n - 1) * self.bezier_precision + 1,
        }
    }

    fn build_extended(&mut self) {
        self.extended.clear();
        let base = self.base.points();
        if let (Some(&first), Some(&last)) = (base.first(), base.last()) {
            let mut extended = Vec::with_capacity(base.len() + 2);
            extended.push(first);
            extended.extend_from_slice(base);
            extended.push(last);
            self.extended = Curve::from_points(extended);
            self.update_phantom_points();
        }
    }

    /// Mirror the second point around the first, and the second to last
    /// around the last.
    fn update_phantom_points(&mut self) {
        let base = self.base.points();
        let n = base.len();
        if n == 0 {
            return;
        }
        let (start, end) = if n == 1 {
            (base[0], base[0])
        } else {
            (
                base[0] * 2.0 - base[1],
                base[n - 1] * 2.0 - base[n - 2],
            )
        };
        self.extended.write(0, start);
        self.extended.write(n + 1, end);
    }

    fn segment_points(&self, seg: usize) -> [Vec2; 4] {
        let ext = self.extended.points();
        let (before, start, end, after) = (ext[seg], ext[seg + 1], ext[seg + 2], ext[seg + 3]);
        [
            start,
            start + (end - before) / self.alpha,
            end - (after - start) / self.alpha,
            end,
        ]
    }

    fn build_segment(&mut self, seg: usize) {
        let [p0, p1, p2, p3] = self.segment_points(seg);
        let start = seg * self.bezier_precision;
        for k in 0..self.bezier_precision {
            let p = self.factors.sample(k, p0, p1, p2, p3);
            self.points.write(start + k, p);
        }
        if seg + 2 == self.base.len() {
            let last = self.factors.sample(self.bezier_precision, p0, p1, p2, p3);
            self.points.write(start + self.bezier_precision, last);
        }
    }

    /// Re-tessellate segments `first..=last`, clamped.
    fn build_segments(&mut self, first: usize, last: usize) {
        let n = self.base.len();
        if n < 2 {
            return;
        }
        log::trace!("rebuilding cardinal segments {}..={}", first, last.min(n - 2));
        for seg in first..=last.min(n - 2) {
            self.build_segment(seg);
        }
    }

    /// Make room for the segment created by inserting base point `id`, and
    /// rebuild every segment that depends on it.
    fn insert_spline_section(&mut self, id: usize, fill: Vec2) {
        let section = id.min(self.base.len() - 2);
        self.points
            .splice_fill(section * self.bezier_precision, self.bezier_precision, fill);
        self.build_segments(id.saturating_sub(2), id + 1);
    }

    /// Drop the segment lost by removing base point `id`, and rebuild the
    /// segments around the gap.
    fn remove_spline_section(&mut self, id: usize) {
        let section = id.min(self.base.len() - 1);
        self.points
            .drain(section * self.bezier_precision, self.bezier_precision);
        self.build_segments(id.saturating_sub(2), id + 1);
    }
}

impl Default for CardinalSpline {
    fn default() -> Self {
        CardinalSpline::new(DEFAULT_PRECISION, DEFAULT_ALPHA)
    }
}

#[cfg(feature = "serde")]
impl From<CardinalSplineState> for CardinalSpline {
    fn from(state: CardinalSplineState) -> Self {
        CardinalSpline::from_points(
            state.base.points().to_vec(),
            state.bezier_precision,
            state.alpha,
        )
    }
}

#[cfg(feature = "serde")]
impl From<CardinalSpline> for CardinalSplineState {
    fn from(spline: CardinalSpline) -> Self {
        CardinalSplineState {
            base: spline.base,
            alpha: spline.alpha,
            bezier_precision: spline.bezier_precision,
        }
    }
}
