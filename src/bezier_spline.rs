//! A cubic Bézier spline with automatic, tangent-continuous handles.

use kurbo::{CubicBez, Point};
#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::curve::Curve;
use crate::util::CubicBezierFactors;
use crate::vec2::Vec2;

/// Distance from a base point to each of its automatic handles.
pub const HANDLE_LENGTH: f64 = 20.0;

const DEFAULT_PRECISION: usize = 20;

/// An editable cubic Bézier spline through a list of base points.
///
/// Every base point `i` carries two handles in the control curve: `2i` on
/// the incoming side and `2i + 1` on the outgoing side. Handles sit by
/// default on the smoothed tangent at their base point; a handle moved by
/// hand keeps its offset from that default, so it follows along when its
/// neighbours are edited.
///
/// Segment `i` runs from base point `i` to base point `i + 1`, and is sampled
/// at `bezier_precision` evenly spaced parameters, both ends included.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        crate = "serde_",
        from = "BezierSplineState",
        into = "BezierSplineState"
    )
)]
pub struct BezierSpline {
    /// The tessellated output.
    points: Curve,
    base: Curve,
    control: Curve,
    /// Manual offset of each handle from its default position.
    offsets: Vec<Vec2>,
    bezier_precision: usize,
    factors: CubicBezierFactors,
}

/// The part of a [`BezierSpline`] that is not derived from anything else.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
#[serde(crate = "serde_")]
struct BezierSplineState {
    base: Curve,
    offsets: Vec<Vec2>,
    bezier_precision: usize,
}

impl BezierSpline {
    /// Create an empty spline sampling each segment `bezier_precision` times.
    ///
    /// The precision is at least 2.
    pub fn new(bezier_precision: usize) -> BezierSpline {
        let bezier_precision = bezier_precision.max(2);
        BezierSpline {
            points: Curve::new(),
            base: Curve::new(),
            control: Curve::new(),
            offsets: Vec::new(),
            bezier_precision,
            factors: CubicBezierFactors::new(bezier_precision - 1),
        }
    }

    /// Create a spline through `points`, with automatic handles.
    pub fn from_points(
        points: impl IntoIterator<Item = Vec2>,
        bezier_precision: usize,
    ) -> BezierSpline {
        let mut spline = BezierSpline::new(bezier_precision);
        spline.base = Curve::from_points(points);
        spline.control = Curve::from_points(vec![Vec2::ZERO; 2 * spline.base.len()]);
        spline.offsets = vec![Vec2::ZERO; 2 * spline.base.len()];
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

    /// The handles, two per base point.
    pub fn control_points(&self) -> &[Vec2] {
        self.control.points()
    }

    pub fn nb_points(&self) -> usize {
        self.points.len()
    }

    pub fn nb_base_points(&self) -> usize {
        self.base.len()
    }

    pub fn bezier_precision(&self) -> usize {
        self.bezier_precision
    }

    /// The manual offset applied to a handle.
    pub fn control_offset(&self, control_id: usize) -> Option<Vec2> {
        self.offsets.get(control_id).copied()
    }

    pub fn closest_base_id(&self, p: Vec2) -> Option<usize> {
        self.base.closest_point_id(p)
    }

    pub fn closest_point_id(&self, p: Vec2) -> Option<usize> {
        self.points.closest_point_id(p)
    }

    /// Non-function regions of either the base polyline or the tessellated
    /// curve.
    pub fn get_duplicate_x_points(&self, from_tessellated: bool) -> Vec<Bounds> {
        if from_tessellated {
            self.points.scan_for_duplicate_x()
        } else {
            self.base.scan_for_duplicate_x()
        }
    }

    /// Change the number of samples per segment and rebuild everything.
    pub fn set_bezier_precision(&mut self, bezier_precision: usize) {
        let bezier_precision = bezier_precision.max(2);
        if bezier_precision == self.bezier_precision {
            return;
        }
        log::debug!(
            "bezier precision {} -> {}",
            self.bezier_precision,
            bezier_precision
        );
        self.bezier_precision = bezier_precision;
        self.fill_cubic_bezier_factors();
        self.build_spline(true);
    }

    /// Recompute the Bernstein weights for the current precision.
    pub fn fill_cubic_bezier_factors(&mut self) {
        self.factors.fill(self.bezier_precision - 1);
        debug_assert_eq!(self.factors.len(), self.bezier_precision);
    }

    /// Recompute every handle and every segment.
    ///
    /// With `resize`, the output is first resized to match the number of base
    /// points and the precision; without it, the output length is assumed to
    /// be right already.
    pub fn build_spline(&mut self, resize: bool) {
        let expected = self.expected_len();
        if resize {
            self.points.resize(expected);
        }
        debug_assert_eq!(self.points.len(), expected);
        log::debug!(
            "rebuilding bezier spline: {} base points, {} samples",
            self.base.len(),
            expected
        );

        let n = self.base.len();
        for i in 0..n {
            self.update_control(i);
        }
        match n {
            0 => (),
            1 => self.points.write(0, self.base.points()[0]),
            _ => {
                for seg in 0..n - 1 {
                    self.build_segment(seg);
                }
            }
        }
    }

    /// Insert a base point at `id`, clamped to the end of the spline.
    ///
    /// A point inserted at the last index that does not fall between the two
    /// last points goes after the last point instead. Returns the index the
    /// point was inserted at.
    pub fn insert_base_point(&mut self, id: usize, point: Vec2) -> Option<usize> {
        let n = self.base.len();
        let mut id = id.min(n);
        if n >= 2 && id == n - 1 && !self.base.is_between_points(point, n - 2) {
            id = n;
        }
        let id = self.base.insert_point(id, point)?;
        self.control.splice_fill(2 * id, 2, point);
        self.offsets
            .splice(2 * id..2 * id, std::iter::repeat(Vec2::ZERO).take(2));

        let n = n + 1;
        if n <= 2 {
            self.build_spline(true);
        } else {
            self.update_controls(id.saturating_sub(1), id + 1);
            let section = id.min(n - 2);
            self.points
                .splice_fill(section * self.bezier_precision, self.bezier_precision, point);
            self.build_segments(id.saturating_sub(2), id + 1);
        }
        Some(id)
    }

    /// Remove the base point at `id` and its two handles.
    ///
    /// The neighbouring handles are moved to their new default positions,
    /// keeping any manual offset they had.
    pub fn remove_base_point(&mut self, id: usize) -> Option<Vec2> {
        let removed = self.base.remove_point(id)?;
        self.control.drain(2 * id, 2);
        self.offsets.drain(2 * id..2 * id + 2);

        let n = self.base.len();
        if n < 2 {
            self.build_spline(true);
        } else {
            let section = id.min(n - 1);
            self.points
                .drain(section * self.bezier_precision, self.bezier_precision);
            self.update_controls(id.saturating_sub(1), id);
            self.build_segments(id.saturating_sub(2), id);
        }
        Some(removed)
    }

    /// Move the base point at `id`.
    ///
    /// Only the (up to) four segments whose shape depends on that point are
    /// re-tessellated. Returns `false` if nothing changed.
    pub fn set_base_point(&mut self, id: usize, point: Vec2) -> bool {
        if !self.base.set_point(id, point) {
            return false;
        }
        self.update_controls(id.saturating_sub(1), id + 1);
        if self.base.len() == 1 {
            self.points.write(0, point);
        } else {
            self.build_segments(id.saturating_sub(2), id + 1);
        }
        true
    }

    /// Move a handle by hand.
    ///
    /// The handle's offset from its default position is recorded, and kept
    /// from then on.
    pub fn set_control_point(&mut self, control_id: usize, point: Vec2) -> bool {
        if control_id >= self.control.len() || !point.is_valid() {
            log::trace!("ignoring handle {} moved to {:?}", control_id, point);
            return false;
        }
        let default = self.default_control(control_id);
        if !default.is_valid() {
            log::trace!("ignoring handle {} without a default position", control_id);
            return false;
        }
        let offset = point - default;
        if offset == self.offsets[control_id] {
            return false;
        }
        self.offsets[control_id] = offset;
        self.control.write(control_id, default + offset);
        self.build_segment_for_control(control_id);
        true
    }

    /// Put a handle back at its default position.
    pub fn reset_control_point(&mut self, control_id: usize) -> bool {
        match self.offsets.get_mut(control_id) {
            Some(offset) if *offset != Vec2::ZERO => *offset = Vec2::ZERO,
            _ => return false,
        }
        self.update_control(control_id / 2);
        self.build_segment_for_control(control_id);
        true
    }

    /// The index of the first output point generated from base point `id`.
    pub fn base_id_to_spline_id(&self, id: usize) -> Option<usize> {
        let n = self.base.len();
        if id >= n {
            None
        } else if n == 1 {
            Some(0)
        } else if id == n - 1 {
            Some((n - 1) * self.bezier_precision - 1)
        } else {
            Some(id * self.bezier_precision)
        }
    }

    /// The base point ending the segment that output point `spline_id`
    /// belongs to.
    ///
    /// This is where a point inserted near `spline_id` should go.
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

    /// The incoming handle of base point `id`; the outgoing one follows it.
    pub fn base_id_to_control_id(&self, id: usize) -> Option<usize> {
        if id < self.base.len() {
            Some(2 * id)
        } else {
            None
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
            1 => 1,
            n => (n - 1) * self.bezier_precision,
        }
    }

    /// The automatic handles of base point `i`, incoming then outgoing.
    fn default_controls(&self, i: usize) -> (Vec2, Vec2) {
        let base = self.base.points();
        let n = base.len();
        let p = base[i];
        if n < 2 {
            return (p, p);
        }
        let tangent = if i == 0 {
            (base[1] - base[0]).normalized()
        } else if i == n - 1 {
            (base[n - 1] - base[n - 2]).normalized()
        } else {
            let incoming = (p - base[i - 1]).normalized();
            let outgoing = (base[i + 1] - p).normalized();
            (incoming + outgoing).normalized()
        };
        let handle = tangent * HANDLE_LENGTH;
        (p - handle, p + handle)
    }

    fn default_control(&self, control_id: usize) -> Vec2 {
        let (incoming, outgoing) = self.default_controls(control_id / 2);
        if control_id % 2 == 0 {
            incoming
        } else {
            outgoing
        }
    }

    fn update_control(&mut self, i: usize) {
        let (incoming, outgoing) = self.default_controls(i);
        self.control.write(2 * i, incoming + self.offsets[2 * i]);
        self.control.write(2 * i + 1, outgoing + self.offsets[2 * i + 1]);
    }

    /// Update the handles of base points `first..=last`, clamped.
    fn update_controls(&mut self, first: usize, last: usize) {
        let n = self.base.len();
        if n == 0 {
            return;
        }
        for i in first..=last.min(n - 1) {
            self.update_control(i);
        }
    }

    fn segment_points(&self, seg: usize) -> [Vec2; 4] {
        let base = self.base.points();
        let control = self.control.points();
        [
            base[seg],
            control[2 * seg + 1],
            control[2 * seg + 2],
            base[seg + 1],
        ]
    }

    fn build_segment(&mut self, seg: usize) {
        let [p0, p1, p2, p3] = self.segment_points(seg);
        let start = seg * self.bezier_precision;
        for k in 0..self.bezier_precision {
            let p = self.factors.sample(k, p0, p1, p2, p3);
            self.points.write(start + k, p);
        }
    }

    /// Re-tessellate segments `first..=last`, clamped.
    fn build_segments(&mut self, first: usize, last: usize) {
        let n = self.base.len();
        if n < 2 {
            return;
        }
        log::trace!("rebuilding bezier segments {}..={}", first, last.min(n - 2));
        for seg in first..=last.min(n - 2) {
            self.build_segment(seg);
        }
    }

    fn build_segment_for_control(&mut self, control_id: usize) {
        let i = control_id / 2;
        if self.base.len() == 1 {
            return;
        }
        if control_id % 2 == 0 {
            if i > 0 {
                self.build_segment(i - 1);
            }
        } else if i + 1 < self.base.len() {
            self.build_segment(i);
        }
    }
}

impl Default for BezierSpline {
    fn default() -> Self {
        BezierSpline::new(DEFAULT_PRECISION)
    }
}

#[cfg(feature = "serde")]
impl From<BezierSplineState> for BezierSpline {
    fn from(state: BezierSplineState) -> Self {
        let mut spline =
            BezierSpline::from_points(state.base.points().to_vec(), state.bezier_precision);
        if state.offsets.len() == spline.offsets.len() {
            spline.offsets = state.offsets;
            spline.build_spline(false);
        }
        spline
    }
}

#[cfg(feature = "serde")]
impl From<BezierSpline> for BezierSplineState {
    fn from(spline: BezierSpline) -> Self {
        BezierSplineState {
            base: spline.base,
            offsets: spline.offsets,
            bezier_precision: spline.bezier_precision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use kurbo::ParamCurve;
    use rand::distributions::{Distribution, Uniform};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pt(x: f64, y: f64) -> Vec2 {
        Vec2::new(x, y)
    }

    fn zigzag(n: usize) -> Vec<Vec2> {
        (0..n)
            .map(|i| pt(50.0 * i as f64, if i % 2 == 0 { 0.0 } else { 40.0 }))
            .collect()
    }

    /// The same spline, rebuilt from scratch.
    fn rebuilt(spline: &BezierSpline) -> BezierSpline {
        let mut fresh = spline.clone();
        fresh.build_spline(true);
        fresh
    }

    #[test]
    fn empty_spline_doesnt_crash() {
        let mut spline = BezierSpline::default();
        spline.build_spline(true);
        assert_eq!(spline.nb_points(), 0);
        assert_eq!(spline.remove_base_point(0), None);
        assert!(!spline.set_base_point(0, pt(1.0, 1.0)));
        assert!(spline.get_duplicate_x_points(true).is_empty());
    }

    #[test]
    fn two_points_precision_two() {
        let spline = BezierSpline::from_points(vec![pt(0.0, 0.0), pt(10.0, 0.0)], 2);
        assert_eq!(spline.points(), &[pt(0.0, 0.0), pt(10.0, 0.0)]);
        assert_eq!(spline.control_points().len(), 4);
    }

    #[test]
    fn point_counts() {
        let mut rng = StdRng::seed_from_u64(3);
        let coord = Uniform::from(0.0..500.0);
        for n in 2..10 {
            for &precision in &[2, 3, 17, 40] {
                let pts = (0..n).map(|_| pt(coord.sample(&mut rng), coord.sample(&mut rng)));
                let mut spline = BezierSpline::from_points(pts, precision);
                assert_eq!(spline.nb_points(), (n - 1) * precision);
                assert_eq!(spline.control_points().len(), 2 * n);
                spline.set_bezier_precision(precision + 5);
                assert_eq!(spline.nb_points(), (n - 1) * (precision + 5));
            }
        }
    }

    #[test]
    fn single_point() {
        let mut spline = BezierSpline::new(10);
        assert_eq!(spline.insert_base_point(0, pt(3.0, 4.0)), Some(0));
        assert_eq!(spline.points(), &[pt(3.0, 4.0)]);
        assert!(spline.set_base_point(0, pt(5.0, 5.0)));
        assert_eq!(spline.points(), &[pt(5.0, 5.0)]);
        assert_eq!(spline.insert_base_point(1, pt(15.0, 5.0)), Some(1));
        assert_eq!(spline.nb_points(), 10);
        assert_eq!(spline.remove_base_point(0), Some(pt(5.0, 5.0)));
        assert_eq!(spline.points(), &[pt(15.0, 5.0)]);
        assert_eq!(spline.remove_base_point(0), Some(pt(15.0, 5.0)));
        assert_eq!(spline.nb_points(), 0);
    }

    #[test]
    fn default_handles() {
        let spline = BezierSpline::from_points(vec![pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 100.0)], 5);
        let c = spline.control_points();
        // Open ends follow their only chord.
        assert_eq!(c[0], pt(-HANDLE_LENGTH, 0.0));
        assert_eq!(c[1], pt(HANDLE_LENGTH, 0.0));
        assert_eq!(c[5], pt(100.0, 100.0 + HANDLE_LENGTH));
        // The corner gets the bisecting direction.
        let d = HANDLE_LENGTH / 2f64.sqrt();
        assert_abs_diff_eq!(c[2].x(), 100.0 - d, epsilon = 1e-9);
        assert_abs_diff_eq!(c[2].y(), -d, epsilon = 1e-9);
        assert_abs_diff_eq!(c[3].x(), 100.0 + d, epsilon = 1e-9);
        assert_abs_diff_eq!(c[3].y(), d, epsilon = 1e-9);
    }

    #[test]
    fn trailing_click_appends() {
        let mut spline = BezierSpline::from_points(vec![pt(0.0, 0.0), pt(10.0, 0.0)], 4);
        assert_eq!(spline.insert_base_point(1, pt(20.0, 0.0)), Some(2));
        assert_eq!(spline.insert_base_point(2, pt(15.0, 1.0)), Some(2));
        assert_eq!(
            spline.base_points(),
            &[pt(0.0, 0.0), pt(10.0, 0.0), pt(15.0, 1.0), pt(20.0, 0.0)]
        );
        assert_eq!(spline.insert_base_point(99, pt(30.0, 0.0)), Some(4));
        assert_eq!(spline.insert_base_point(0, pt(f64::NAN, 0.0)), None);
        assert_eq!(spline.nb_base_points(), 5);
        assert_eq!(spline.nb_points(), 4 * 4);
    }

    #[test]
    fn edits_only_touch_neighbouring_segments() {
        let precision = 10;
        let mut spline = BezierSpline::from_points(zigzag(9), precision);
        let before = spline.points().to_vec();
        assert!(spline.set_base_point(4, pt(210.0, 90.0)));
        let after = spline.points();
        for seg in 0..8 {
            let range = seg * precision..(seg + 1) * precision;
            if (2..=5).contains(&seg) {
                assert_ne!(&before[range.clone()], &after[range]);
            } else {
                assert_eq!(&before[range.clone()], &after[range]);
            }
        }
    }

    #[test]
    fn incremental_edits_match_full_rebuild() {
        let mut rng = StdRng::seed_from_u64(11);
        let coord = Uniform::from(0.0..500.0);
        let action = Uniform::from(0..4);
        let mut spline = BezierSpline::new(7);
        for _ in 0..300 {
            let n = spline.nb_base_points();
            let p = pt(coord.sample(&mut rng), coord.sample(&mut rng));
            let id = Uniform::from(0..n + 1).sample(&mut rng);
            match action.sample(&mut rng) {
                0 | 1 => {
                    spline.insert_base_point(id, p);
                }
                2 => {
                    spline.remove_base_point(id);
                }
                _ => {
                    spline.set_base_point(id, p);
                }
            }
            let fresh = rebuilt(&spline);
            assert_eq!(spline.control_points(), fresh.control_points());
            assert_eq!(spline.points(), fresh.points());
            assert_eq!(spline.nb_points(), spline.expected_len());
        }
    }

    #[test]
    fn manual_offsets_survive_neighbour_removal() {
        let mut spline = BezierSpline::from_points(zigzag(5), 6);
        let handle = spline.base_id_to_control_id(2).unwrap() + 1;
        let moved = spline.control_points()[handle] + pt(3.0, -4.0);
        assert!(spline.set_control_point(handle, moved));
        assert_eq!(spline.control_points()[handle], moved);
        let offset = spline.control_offset(handle).unwrap();
        assert_abs_diff_eq!(offset.x(), 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(offset.y(), -4.0, epsilon = 1e-9);

        spline.remove_base_point(3);
        assert_eq!(spline.control_offset(handle), Some(offset));
        let plain = BezierSpline::from_points(spline.base_points().to_vec(), 6);
        assert_eq!(spline.control_points()[handle], plain.control_points()[handle] + offset);
        assert_eq!(spline.points(), rebuilt(&spline).points());

        assert!(spline.reset_control_point(handle));
        assert_eq!(spline.control_points(), plain.control_points());
        assert_eq!(spline.points(), plain.points());
        assert!(!spline.reset_control_point(handle));
    }

    #[test]
    fn moved_handle_only_changes_its_segment() {
        let precision = 8;
        let mut spline = BezierSpline::from_points(zigzag(4), precision);
        let before = spline.points().to_vec();
        // Incoming handle of base point 2 shapes segment 1.
        let handle = spline.base_id_to_control_id(2).unwrap();
        assert!(spline.set_control_point(handle, pt(0.0, 0.0)));
        let after = spline.points();
        assert_eq!(&before[..precision], &after[..precision]);
        assert_ne!(&before[precision..2 * precision], &after[precision..2 * precision]);
        assert_eq!(&before[2 * precision..], &after[2 * precision..]);
        assert!(!spline.set_control_point(99, pt(0.0, 0.0)));
    }

    #[test]
    fn handle_without_tangent_cannot_be_dragged() {
        // Base point 1 turns straight back, so its tangent is undefined.
        let mut spline =
            BezierSpline::from_points(vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(0.0, 0.0)], 4);
        assert!(!spline.control_points()[2].is_valid());
        assert!(!spline.set_control_point(2, pt(5.0, 5.0)));
        assert_eq!(spline.control_offset(2), Some(Vec2::ZERO));

        assert!(spline.set_base_point(2, pt(0.0, 10.0)));
        assert!(spline.control_points().iter().all(Vec2::is_valid));
        assert!(spline.points().iter().all(Vec2::is_valid));
    }

    #[test]
    fn straight_spline_is_a_function() {
        let spline =
            BezierSpline::from_points(vec![pt(0.0, 0.0), pt(100.0, 0.0), pt(200.0, 0.0)], 10);
        // The joint at x = 100 is sampled by both segments.
        assert_eq!(spline.points()[9], spline.points()[10]);
        assert!(spline.get_duplicate_x_points(true).is_empty());
        assert!(spline.get_duplicate_x_points(false).is_empty());
    }

    #[test]
    fn index_translation() {
        let spline = BezierSpline::from_points(zigzag(3), 4);
        assert_eq!(spline.base_id_to_spline_id(0), Some(0));
        assert_eq!(spline.base_id_to_spline_id(1), Some(4));
        assert_eq!(spline.base_id_to_spline_id(2), Some(7));
        assert_eq!(spline.base_id_to_spline_id(3), None);
        assert_eq!(spline.points()[7], spline.base_points()[2]);
        assert_eq!(spline.spline_id_to_base_id(0), Some(1));
        assert_eq!(spline.spline_id_to_base_id(5), Some(2));
        assert_eq!(spline.spline_id_to_base_id(7), Some(2));
        assert_eq!(spline.spline_id_to_base_id(8), None);
        assert_eq!(spline.base_id_to_control_id(2), Some(4));
        assert_eq!(spline.base_id_to_control_id(3), None);
    }

    #[test]
    fn duplicate_x_on_base_and_tessellation() {
        let spline = BezierSpline::from_points(
            vec![pt(0.0, 0.0), pt(10.0, 10.0), pt(5.0, 20.0), pt(15.0, 30.0)],
            20,
        );
        assert_eq!(spline.get_duplicate_x_points(false), vec![Bounds::new(5.0, 10.0)]);
        assert!(!spline.get_duplicate_x_points(true).is_empty());
    }

    #[test]
    fn cubic_segments_match_samples() {
        let precision = 5;
        let spline = BezierSpline::from_points(zigzag(4), precision);
        let cubics = spline.cubic_segments();
        assert_eq!(cubics.len(), 3);
        for (seg, c) in cubics.iter().enumerate() {
            for k in 0..precision {
                let expected = c.eval(k as f64 / (precision - 1) as f64);
                let got = spline.points()[seg * precision + k];
                assert_abs_diff_eq!(got.x(), expected.x, epsilon = 1e-9);
                assert_abs_diff_eq!(got.y(), expected.y, epsilon = 1e-9);
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip_keeps_offsets() {
        let mut spline = BezierSpline::from_points(zigzag(4), 6);
        spline.set_control_point(3, pt(80.0, 80.0));
        let json = serde_json::to_string(&spline).unwrap();
        let back: BezierSpline = serde_json::from_str(&json).unwrap();
        assert_eq!(back.base_points(), spline.base_points());
        assert_eq!(back.control_points(), spline.control_points());
        assert_eq!(back.points(), spline.points());
    }
}
