//! Render a saved Bézier spline as SVG.
//!
//! The input is a spline as serialized with the `serde` feature:
//!
//! ```json
//! { "base": [[0, 0], [100, 50]], "offsets": [], "bezier_precision": 20 }
//! ```
//!
//! Offsets that don't match the number of base points are ignored.

use std::error::Error;

use kurbo::BezPath;

use splinetoys::BezierSpline;

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args().nth(1).ok_or("needs filename")?;
    let data = std::fs::read_to_string(path)?;
    let spline: BezierSpline = serde_json::from_str(&data)?;

    for region in spline.get_duplicate_x_points(true) {
        eprintln!("not a function over [{}, {}]", region.min(), region.max());
    }

    let mut bp = BezPath::new();
    for (i, seg) in spline.cubic_segments().into_iter().enumerate() {
        if i == 0 {
            bp.move_to(seg.p0);
        }
        bp.curve_to(seg.p1, seg.p2, seg.p3);
    }
    println!(
        r##"<!DOCTYPE html>
<html>
    <body>
    <svg height="500" width="500">
      <path d="{}" fill="none" stroke="#000" />"##,
        bp.to_svg()
    );
    println!(
        r#"    </svg>
    </body>
</html>"#
    );

    println!("<!-- {} -->", serde_json::to_string(&spline)?);
    Ok(())
}
