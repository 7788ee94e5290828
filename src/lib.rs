//! Editable splines for interactive curve toys.
//!
//! This crate holds the curve core of a few small curve editors: a Bézier
//! spline with automatic, tangent-continuous handles, a cardinal
//! (Catmull-Rom style) spline, and the parametric "spline-gen" pattern.
//!
//! A UI shell owns a spline, forwards clicks and drags to its mutation
//! methods ([`BezierSpline::set_base_point`],
//! [`BezierSpline::insert_base_point`], [`BezierSpline::remove_base_point`]),
//! and reads the sampled polyline back with [`BezierSpline::points`] for
//! drawing. Edits only re-tessellate the segments they touch.
//!
//! Invalid input (out of range indices, non-finite coordinates) is ignored
//! rather than reported, so that a stray mouse event can never break an
//! interaction loop.

mod bezier_spline;
mod bounds;
mod cardinal_spline;
mod curve;
mod pattern;
mod util;
mod vec2;

pub use bezier_spline::{BezierSpline, HANDLE_LENGTH};
pub use bounds::Bounds;
pub use cardinal_spline::CardinalSpline;
pub use curve::Curve;
pub use pattern::{pattern_curve, PatternParams};
pub use vec2::Vec2;
