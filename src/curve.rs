//! An ordered, editable sequence of points.

use kurbo::BezPath;
#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::vec2::Vec2;

/// An ordered sequence of points.
///
/// Points are addressed by position. Edits with an out of range index or a
/// non-finite point are ignored.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_", transparent)
)]
pub struct Curve {
    points: Vec<Vec2>,
}

impl Curve {
    pub fn new() -> Curve {
        Curve::default()
    }

    /// Create a curve from a list of points, dropping any non-finite ones.
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Curve {
        Curve {
            points: points.into_iter().filter(Vec2::is_valid).collect(),
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<Vec2> {
        self.points.get(id).copied()
    }

    pub fn first(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    /// Insert `point` at `id`, clamped to the end of the curve.
    ///
    /// Returns the index the point was inserted at, or `None` if the point is
    /// not finite.
    pub fn insert_point(&mut self, id: usize, point: Vec2) -> Option<usize> {
        if !point.is_valid() {
            log::trace!("ignoring insertion of invalid point {:?}", point);
            return None;
        }
        let id = id.min(self.points.len());
        self.points.insert(id, point);
        Some(id)
    }

    /// Append `point` to the end of the curve.
    pub fn push(&mut self, point: Vec2) -> Option<usize> {
        self.insert_point(self.points.len(), point)
    }

    pub fn remove_point(&mut self, id: usize) -> Option<Vec2> {
        if id < self.points.len() {
            Some(self.points.remove(id))
        } else {
            log::trace!("ignoring removal of point {} out of {}", id, self.points.len());
            None
        }
    }

    /// Replace the point at `id`.
    ///
    /// Returns `true` only if the stored point actually changed, so callers
    /// can skip recomputing anything that depends on it.
    pub fn set_point(&mut self, id: usize, point: Vec2) -> bool {
        if !point.is_valid() {
            log::trace!("ignoring invalid point {:?} for {}", point, id);
            return false;
        }
        match self.points.get_mut(id) {
            Some(p) if *p != point => {
                *p = point;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.points.clear();
    }

    /// Insert `count` copies of `fill` at `id`.
    pub(crate) fn splice_fill(&mut self, id: usize, count: usize, fill: Vec2) {
        let id = id.min(self.points.len());
        self.points.splice(id..id, std::iter::repeat(fill).take(count));
    }

    /// Remove `count` points starting at `id`.
    pub(crate) fn drain(&mut self, id: usize, count: usize) {
        let start = id.min(self.points.len());
        let end = (start + count).min(self.points.len());
        self.points.drain(start..end);
    }

    pub(crate) fn resize(&mut self, len: usize) {
        self.points.resize(len, Vec2::ZERO);
    }

    /// Write a point without the validity and change checks of
    /// [`Curve::set_point`].
    pub(crate) fn write(&mut self, id: usize, point: Vec2) {
        self.points[id] = point;
    }

    /// The index of the point closest to `p`.
    ///
    /// Ties go to the lowest index. Returns `None` for an empty curve.
    pub fn closest_point_id(&self, p: Vec2) -> Option<usize> {
        let mut best: Option<(f64, usize)> = None;
        for (i, pt) in self.points.iter().enumerate() {
            let dist = pt.distance(p);
            if best.map(|(d, _)| dist < d).unwrap_or(true) {
                best = Some((dist, i));
            }
        }
        best.map(|(_, i)| i)
    }

    /// Whether `p` lies between the point at `previous_id` and the next one.
    ///
    /// This holds when the two vectors from those points to `p` make an
    /// obtuse angle, which is how a click decides which side of a point a
    /// new point goes.
    pub fn is_between_points(&self, p: Vec2, previous_id: usize) -> bool {
        match (self.get(previous_id), self.get(previous_id + 1)) {
            (Some(a), Some(b)) => a.to_point(p).dot(b.to_point(p)) < 0.0,
            _ => false,
        }
    }

    /// Find the X ranges over which the curve is not a function of X.
    ///
    /// The points are walked in order while tracking the X range covered so
    /// far. A point falling back inside that range opens a region (starting
    /// at the previous point, where the curve turned back), and following
    /// points inside the range widen it. A point leaving the range closes
    /// the open region, after stretching it to the edge being crossed, since
    /// the curve re-traces everything up to there.
    ///
    /// The returned regions are pairwise disjoint and sorted by `min`. A
    /// curve with two points or fewer has no regions.
    pub fn scan_for_duplicate_x(&self) -> Vec<Bounds> {
        let mut regions = Vec::new();
        if self.points.len() <= 2 {
            return regions;
        }

        let mut window = Bounds::new(self.points[0].x(), self.points[1].x());
        let mut current: Option<Bounds> = None;
        for pair in self.points[1..].windows(2) {
            let (prev_x, x) = (pair[0].x(), pair[1].x());
            if x == prev_x && current.is_none() {
                // Repeated sample on the edge the window just reached.
                continue;
            }
            if window.is_in_bounds(x, false, false) {
                match current.as_mut() {
                    Some(region) => region.extend_to(x),
                    None => current = Some(Bounds::new(prev_x, x)),
                }
            } else {
                if let Some(mut region) = current.take() {
                    let edge = if x > window.max() {
                        window.max()
                    } else {
                        window.min()
                    };
                    region.extend_to(edge);
                    push_fused(&mut regions, region);
                }
                window.extend_to(x);
            }
        }
        if let Some(region) = current {
            push_fused(&mut regions, region);
        }

        regions.sort_by(|a, b| {
            a.min()
                .partial_cmp(&b.min())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        regions
    }

    /// The points lying in the regions found by
    /// [`Curve::scan_for_duplicate_x`], as maximal runs of consecutive
    /// points.
    pub fn duplicate_x_runs(&self) -> Vec<Vec<Vec2>> {
        let regions = self.scan_for_duplicate_x();
        let mut runs = Vec::new();
        let mut run = Vec::new();
        for pt in &self.points {
            if regions.iter().any(|r| r.is_in_bounds(pt.x(), false, false)) {
                run.push(*pt);
            } else if !run.is_empty() {
                runs.push(std::mem::take(&mut run));
            }
        }
        if !run.is_empty() {
            runs.push(run);
        }
        runs
    }

    /// The curve as a polyline path.
    pub fn to_polyline(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut pts = self.points.iter().copied().map(kurbo::Point::from);
        if let Some(first) = pts.next() {
            path.move_to(first);
            for p in pts {
                path.line_to(p);
            }
        }
        path
    }
}

impl From<Vec<Vec2>> for Curve {
    fn from(points: Vec<Vec2>) -> Self {
        Curve::from_points(points)
    }
}

impl std::iter::FromIterator<Vec2> for Curve {
    fn from_iter<I: IntoIterator<Item = Vec2>>(iter: I) -> Self {
        Curve::from_points(iter)
    }
}

/// Add `region` to `regions`, merging it with every region it touches.
fn push_fused(regions: &mut Vec<Bounds>, mut region: Bounds) {
    let mut i = 0;
    while i < regions.len() {
        if let Some(fused) = region.try_fusion(&regions[i]) {
            region = fused;
            regions.swap_remove(i);
            // The widened region may now reach earlier entries.
            i = 0;
        } else {
            i += 1;
        }
    }
    regions.push(region);
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Point};

    fn curve(pts: &[(f64, f64)]) -> Curve {
        pts.iter().copied().map(Vec2::from).collect()
    }

    fn xs(xs: &[f64]) -> Curve {
        xs.iter().map(|&x| Vec2::new(x, 0.0)).collect()
    }

    #[test]
    fn insert_then_remove_round_trips() {
        let original = curve(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        for id in 0..=original.len() {
            let mut c = original.clone();
            assert_eq!(c.insert_point(id, Vec2::new(9.0, 9.0)), Some(id));
            assert_eq!(c.len(), 4);
            assert_eq!(c.remove_point(id), Some(Vec2::new(9.0, 9.0)));
            assert_eq!(c, original);
        }
    }

    #[test]
    fn insert_clamps_and_rejects_invalid() {
        let mut c = curve(&[(0.0, 0.0)]);
        assert_eq!(c.insert_point(42, Vec2::new(1.0, 1.0)), Some(1));
        assert_eq!(c.insert_point(0, Vec2::new(f64::NAN, 1.0)), None);
        assert_eq!(c.insert_point(0, Vec2::new(f64::INFINITY, 1.0)), None);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn remove_and_set_out_of_range() {
        let mut c = curve(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(c.remove_point(2), None);
        assert!(!c.set_point(2, Vec2::new(5.0, 5.0)));
        assert!(!c.set_point(1, Vec2::new(1.0, 1.0)), "same value is not a change");
        assert!(!c.set_point(1, Vec2::new(f64::NAN, 1.0)));
        assert!(c.set_point(1, Vec2::new(2.0, 1.0)));
        assert_eq!(c.get(1), Some(Vec2::new(2.0, 1.0)));
    }

    #[test]
    fn closest_point() {
        let c = curve(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        assert_eq!(c.closest_point_id(Vec2::new(1.1, 0.9)), Some(1));
        assert_eq!(c.closest_point_id(Vec2::new(1.0, 0.0)), Some(0), "ties go to the first");
        assert_eq!(Curve::new().closest_point_id(Vec2::ZERO), None);
    }

    #[test]
    fn between_points() {
        let c = curve(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        assert!(c.is_between_points(Vec2::new(1.0, 0.5), 0));
        assert!(!c.is_between_points(Vec2::new(-1.0, 0.0), 0));
        assert!(!c.is_between_points(Vec2::new(1.5, 0.5), 2));
    }

    #[test]
    fn monotonic_has_no_duplicates() {
        assert!(xs(&[0.0, 1.0, 2.0, 3.0, 10.0]).scan_for_duplicate_x().is_empty());
        assert!(xs(&[5.0, 4.0, 0.0, -3.0]).scan_for_duplicate_x().is_empty());
        assert!(xs(&[0.0, 1.0]).scan_for_duplicate_x().is_empty());
        assert!(xs(&[0.0, 1.0, 2.0]).duplicate_x_runs().is_empty());
    }

    #[test]
    fn repeated_edge_sample_is_not_a_region() {
        assert!(xs(&[0.0, 1.0, 1.0, 2.0, 3.0]).scan_for_duplicate_x().is_empty());
        assert!(xs(&[5.0, 4.0, 4.0, 3.0]).scan_for_duplicate_x().is_empty());
        assert!(xs(&[0.0, 1.0, 2.0, 2.0]).duplicate_x_runs().is_empty());
        let regions = xs(&[0.0, 2.0, 2.0, 1.0, 3.0]).scan_for_duplicate_x();
        assert_eq!(regions, vec![Bounds::new(1.0, 2.0)]);
    }

    #[test]
    fn single_dip_gives_one_region() {
        let regions = xs(&[0.0, 1.0, 2.0, 3.0, 1.5, 4.0, 5.0]).scan_for_duplicate_x();
        assert_eq!(regions, vec![Bounds::new(1.5, 3.0)]);
    }

    #[test]
    fn region_reaches_crossed_edge() {
        // Going left, turning back at 2 and leaving on the right.
        let regions = xs(&[5.0, 4.0, 3.0, 2.0, 3.5, 6.0]).scan_for_duplicate_x();
        assert_eq!(regions, vec![Bounds::new(2.0, 5.0)]);
    }

    #[test]
    fn region_open_at_end() {
        let regions = xs(&[0.0, 1.0, 2.0, 3.0, 2.5]).scan_for_duplicate_x();
        assert_eq!(regions, vec![Bounds::new(2.5, 3.0)]);
    }

    #[test]
    fn separate_and_fused_regions() {
        let regions = xs(&[0.0, 2.0, 1.0, 3.0, 10.0, 9.0, 11.0]).scan_for_duplicate_x();
        assert_eq!(regions, vec![Bounds::new(1.0, 2.0), Bounds::new(9.0, 10.0)]);

        let regions = xs(&[0.0, 2.0, 1.0, 3.0, 2.5, 4.0]).scan_for_duplicate_x();
        assert_eq!(regions, vec![Bounds::new(1.0, 2.0), Bounds::new(2.5, 3.0)]);

        // Both dips touch at x = 2.
        let regions = xs(&[0.0, 2.0, 1.0, 3.0, 2.0, 4.0]).scan_for_duplicate_x();
        assert_eq!(regions, vec![Bounds::new(1.0, 3.0)]);
    }

    #[test]
    fn runs_follow_regions() {
        let c = xs(&[0.0, 1.0, 2.0, 3.0, 1.5, 4.0, 5.0]);
        let runs = c.duplicate_x_runs();
        assert_eq!(runs.len(), 1);
        let run_xs: Vec<f64> = runs[0].iter().map(Vec2::x).collect();
        assert_eq!(run_xs, vec![2.0, 3.0, 1.5]);
    }

    #[test]
    fn polyline_path() {
        let c = curve(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let path = c.to_polyline();
        assert_eq!(path.elements().len(), 3);
        assert_eq!(path.elements()[0], PathEl::MoveTo(Point::new(0.0, 0.0)));
        assert_eq!(path.elements()[2], PathEl::LineTo(Point::new(2.0, 0.0)));
        assert!(Curve::new().to_polyline().elements().is_empty());
    }
}
