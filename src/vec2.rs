//! A 2D vector with a cached magnitude.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use kurbo::Point;
#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

/// A 2D vector, also used for points.
///
/// The magnitude is kept alongside the components and recomputed by every
/// setter, so reading it is free.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_", from = "(f64, f64)", into = "(f64, f64)")
)]
pub struct Vec2 {
    x: f64,
    y: f64,
    magnitude: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 {
        x: 0.0,
        y: 0.0,
        magnitude: 0.0,
    };

    pub fn new(x: f64, y: f64) -> Vec2 {
        Vec2 {
            x,
            y,
            magnitude: kurbo::Vec2::new(x, y).hypot(),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Whether both components are finite.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn set(&mut self, x: f64, y: f64) {
        *self = Vec2::new(x, y);
    }

    pub fn set_x(&mut self, x: f64) {
        self.set(x, self.y);
    }

    pub fn set_y(&mut self, y: f64) {
        self.set(self.x, y);
    }

    pub fn scalar_mult(&mut self, factor: f64) {
        self.set(self.x * factor, self.y * factor);
    }

    pub fn scalar_div(&mut self, divisor: f64) {
        self.set(self.x / divisor, self.y / divisor);
    }

    pub fn component_mult(&mut self, other: Vec2) {
        self.set(self.x * other.x, self.y * other.y);
    }

    pub fn component_div(&mut self, other: Vec2) {
        self.set(self.x / other.x, self.y / other.y);
    }

    /// Scale this vector to unit length, in place.
    ///
    /// A zero vector becomes NaN.
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Componentwise product of two vectors.
    pub fn component_product(a: Vec2, b: Vec2) -> Vec2 {
        Vec2::new(a.x * b.x, a.y * b.y)
    }

    /// The vector going from `self` to `p`.
    pub fn to_point(&self, p: Vec2) -> Vec2 {
        p - *self
    }

    /// Componentwise reciprocal, with zero components left at zero.
    pub fn inverse(&self) -> Vec2 {
        fn recip(v: f64) -> f64 {
            if v == 0.0 {
                0.0
            } else {
                v.recip()
            }
        }
        Vec2::new(recip(self.x), recip(self.y))
    }

    /// This vector scaled to unit length.
    ///
    /// The result is NaN for a zero vector; callers are expected to guard
    /// against that.
    pub fn normalized(&self) -> Vec2 {
        *self / self.magnitude
    }

    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance(&self, other: Vec2) -> f64 {
        self.to_point(other).magnitude
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Vec2::ZERO
    }
}

impl PartialEq for Vec2 {
    fn eq(&self, other: &Vec2) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Vec2) {
        self.set(self.x + other.x, self.y + other.y);
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, other: Vec2) {
        self.set(self.x - other.x, self.y - other.y);
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, factor: f64) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, v: Vec2) -> Vec2 {
        v * self
    }
}

impl MulAssign<f64> for Vec2 {
    fn mul_assign(&mut self, factor: f64) {
        self.scalar_mult(factor);
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;

    fn div(self, divisor: f64) -> Vec2 {
        Vec2::new(self.x / divisor, self.y / divisor)
    }
}

impl DivAssign<f64> for Vec2 {
    fn div_assign(&mut self, divisor: f64) {
        self.scalar_div(divisor);
    }
}

impl From<(f64, f64)> for Vec2 {
    fn from((x, y): (f64, f64)) -> Self {
        Vec2::new(x, y)
    }
}

impl From<Vec2> for (f64, f64) {
    fn from(v: Vec2) -> Self {
        (v.x, v.y)
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<kurbo::Vec2> for Vec2 {
    fn from(v: kurbo::Vec2) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<Vec2> for kurbo::Vec2 {
    fn from(v: Vec2) -> Self {
        kurbo::Vec2::new(v.x, v.y)
    }
}
