//! Closed parametric patterns made of sines and cosines.

use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::curve::Curve;
use crate::vec2::Vec2;

/// Parameters of the pattern curve.
///
/// `x = cos(aθ) - cos(bθ)^j` and `y = sin(cθ) - sin(dθ)^k`, for `θ` going
/// once around the circle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub struct PatternParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub j: f64,
    pub k: f64,
}

impl PatternParams {
    /// The pattern at `t` in `[0, 1]`, in `[-2, 2]` on both axes for integer
    /// exponents.
    pub fn point_at(&self, t: f64) -> Vec2 {
        let theta = 2.0 * PI * t;
        Vec2::new(
            (self.a * theta).cos() - (self.b * theta).cos().powf(self.j),
            (self.c * theta).sin() - (self.d * theta).sin().powf(self.k),
        )
    }
}

impl Default for PatternParams {
    fn default() -> Self {
        PatternParams {
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            j: 1.0,
            k: 1.0,
        }
    }
}

/// Sample the pattern `nb_points + 1` times, into the unit square.
///
/// Samples that fall outside `[-2, 2]` (or are NaN, as fractional exponents
/// of negative values are) are skipped. With `centered`, the curve is moved
/// so that its bounding box is centred on `(0.5, 0.5)`.
pub fn pattern_curve(params: &PatternParams, nb_points: usize, centered: bool) -> Curve {
    let nb_points = nb_points.max(1);
    let remap = |v: f64| Bounds::remap_using_values(v, -2.0, 2.0, 0.0, 1.0);
    let points: Vec<Vec2> = (0..=nb_points)
        .filter_map(|i| {
            let p = params.point_at(i as f64 / nb_points as f64);
            match (remap(p.x()), remap(p.y())) {
                (Some(x), Some(y)) => Some(Vec2::new(x, y)),
                _ => {
                    log::trace!("skipping pattern sample {} at {:?}", i, p);
                    None
                }
            }
        })
        .collect();

    if !centered || points.is_empty() {
        return Curve::from_points(points);
    }
    let mut x_range = Bounds::new(points[0].x(), points[0].x());
    let mut y_range = Bounds::new(points[0].y(), points[0].y());
    for p in &points {
        x_range.extend_to(p.x());
        y_range.extend_to(p.y());
    }
    let to_center = Vec2::new(
        0.5 - (x_range.min() + x_range.max()) / 2.0,
        0.5 - (y_range.min() + y_range.max()) / 2.0,
    );
    points.into_iter().map(|p| p + to_center).collect()
}
