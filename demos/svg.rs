//! A simple test program that edits random splines.
//!
//! This builds a Bézier spline and a cardinal spline through a sequence of
//! random points, drags a few of them around, and outputs an SVG.

use rand::distributions::{Distribution, Uniform};

use kurbo::BezPath;

use splinetoys::{BezierSpline, CardinalSpline, Curve, Vec2};

fn main() {
    let mut rng = rand::thread_rng();
    const N: usize = 10;
    let coord = Uniform::from(0.0..500.0);
    let pts = (0..N)
        .map(|_| Vec2::new(coord.sample(&mut rng), coord.sample(&mut rng)))
        .collect::<Vec<_>>();

    let mut bezier = BezierSpline::default();
    let mut cardinal = CardinalSpline::default();
    for pt in &pts {
        bezier.insert_base_point(bezier.nb_base_points(), *pt);
        cardinal.insert_base_point(cardinal.nb_base_points(), *pt);
    }
    let pick = Uniform::from(0..N);
    for _ in 0..3 {
        let id = pick.sample(&mut rng);
        let to = Vec2::new(coord.sample(&mut rng), coord.sample(&mut rng));
        bezier.set_base_point(id, to);
        cardinal.set_base_point(id, to);
    }
    eprintln!(
        "bezier: {} points, cardinal: {} points, non-function regions: {:?}",
        bezier.nb_points(),
        cardinal.nb_points(),
        bezier.get_duplicate_x_points(true)
    );

    let mut handles = BezPath::new();
    for (i, pair) in bezier.control_points().chunks(2).enumerate() {
        handles.move_to(pair[0]);
        handles.line_to(bezier.base_points()[i]);
        handles.line_to(pair[1]);
    }
    let bezier_path = Curve::from_points(bezier.points().iter().copied()).to_polyline();
    let cardinal_path = Curve::from_points(cardinal.points().iter().copied()).to_polyline();
    println!(
        r##"<!DOCTYPE html>
<html>
    <body>
    <svg height="500" width="500">
      <path d="{}" fill="none" stroke="#aaa" />
      <path d="{}" fill="none" stroke="#000" />
      <path d="{}" fill="none" stroke="#c00" />"##,
        handles.to_svg(),
        bezier_path.to_svg(),
        cardinal_path.to_svg()
    );
    for pt in bezier.base_points() {
        println!(
            r#"      <circle cx="{}" cy="{}" r="3" fill="blue" />"#,
            pt.x(),
            pt.y()
        )
    }
    println!(
        r#"    </svg>
    </body>
</html>"#
    );
}
