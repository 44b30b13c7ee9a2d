//! Shape formulas.
//!
//! Every shape is computed from the stroke's baseline start point and the
//! current pointer, and stroked as an outline. Previews call these once per
//! pointer sample after restoring the baseline, so each function renders the
//! complete candidate shape in one pass.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use strokes::ShapeKind;

use crate::color::Rgba;
use crate::consts::QUAD_FLATTEN_SEGMENTS;
use crate::raster::{Point, Raster};

/// Render one candidate shape from `start` to `end`. [`ShapeKind::None`]
/// draws nothing (freehand strokes never route through here).
pub fn draw_shape(raster: &mut Raster, kind: ShapeKind, start: Point, end: Point, color: Rgba, width: f64) {
    match kind {
        ShapeKind::None => {}
        ShapeKind::Rectangle => draw_rectangle(raster, start, end, color, width),
        ShapeKind::Circle => draw_circle(raster, start, end, color, width),
        ShapeKind::Triangle => draw_triangle(raster, start, end, color, width),
        ShapeKind::Heart => draw_heart(raster, start, end, color, width),
    }
}

/// Radius of the circle anchored at `start` passing through `end`.
#[must_use]
pub fn circle_radius(start: Point, end: Point) -> f64 {
    start.distance(end)
}

/// Axis-aligned box from `start` to `end`, stroked edge by edge.
pub fn draw_rectangle(raster: &mut Raster, start: Point, end: Point, color: Rgba, width: f64) {
    let a = start;
    let b = Point::new(end.x, start.y);
    let c = end;
    let d = Point::new(start.x, end.y);
    raster.stroke_line(a, b, color, width);
    raster.stroke_line(b, c, color, width);
    raster.stroke_line(c, d, color, width);
    raster.stroke_line(d, a, color, width);
}

/// Circle centered on `start` with radius = distance(start, end).
pub fn draw_circle(raster: &mut Raster, start: Point, end: Point, color: Rgba, width: f64) {
    raster.stroke_circle(start, circle_radius(start, end), color, width);
}

/// Isosceles triangle: `start` is the apex, `end` one base corner, and the
/// other base corner is `end` reflected through the apex's vertical axis.
pub fn draw_triangle(raster: &mut Raster, start: Point, end: Point, color: Rgba, width: f64) {
    let mirrored = Point::new(2.0 * start.x - end.x, end.y);
    raster.stroke_line(start, end, color, width);
    raster.stroke_line(end, mirrored, color, width);
    raster.stroke_line(mirrored, start, color, width);
}

/// Heart outline: six quadratic curves scaled by distance(start, end),
/// anchored at `start`, flattened into a polyline for stroking.
pub fn draw_heart(raster: &mut Raster, start: Point, end: Point, color: Rgba, width: f64) {
    let size = start.distance(end);
    if size <= 0.0 {
        return;
    }
    let (sx, sy) = (start.x, start.y);
    let q = size / 4.0;
    let h = size / 2.0;

    let mut outline = vec![Point::new(sx, sy + q)];
    let curves = [
        (Point::new(sx, sy), Point::new(sx + q, sy)),
        (Point::new(sx + h, sy), Point::new(sx + h, sy + q)),
        (Point::new(sx + h, sy + h), Point::new(sx, sy + size)),
        (Point::new(sx - h, sy + h), Point::new(sx - h, sy + q)),
        (Point::new(sx - h, sy), Point::new(sx - q, sy)),
        (Point::new(sx, sy), Point::new(sx, sy + q)),
    ];
    for (ctrl, to) in curves {
        let from = outline[outline.len() - 1];
        flatten_quad(from, ctrl, to, &mut outline);
    }

    for pair in outline.windows(2) {
        raster.stroke_line(pair[0], pair[1], color, width);
    }
}

/// Flatten one quadratic Bézier curve into line segments, appending every
/// point after `from` to `out`.
fn flatten_quad(from: Point, ctrl: Point, to: Point, out: &mut Vec<Point>) {
    for i in 1..=QUAD_FLATTEN_SEGMENTS {
        let t = f64::from(i) / f64::from(QUAD_FLATTEN_SEGMENTS);
        let u = 1.0 - t;
        out.push(Point::new(
            u * u * from.x + 2.0 * u * t * ctrl.x + t * t * to.x,
            u * u * from.y + 2.0 * u * t * ctrl.y + t * t * to.y,
        ));
    }
}
