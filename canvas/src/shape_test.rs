#![allow(clippy::float_cmp)]

use super::*;
use crate::color::{BLACK, WHITE};

fn blank(side: u32) -> Raster {
    Raster::new(side, side)
}

#[test]
fn circle_radius_is_euclidean_distance() {
    // 3-4-5 triangle.
    assert_eq!(circle_radius(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
    assert_eq!(circle_radius(Point::new(10.0, 10.0), Point::new(10.0, 10.0)), 0.0);
}

#[test]
fn circle_renders_ring_at_computed_radius() {
    let mut raster = blank(40);
    draw_circle(&mut raster, Point::new(20.0, 20.0), Point::new(23.0, 24.0), BLACK, 2.0);

    // Radius 5 ring: a point 5px right of center is inked, center is not.
    assert_eq!(raster.pixel(25, 20), Some(BLACK));
    assert_eq!(raster.pixel(20, 20), Some(WHITE));
}

#[test]
fn rectangle_strokes_edges_only() {
    let mut raster = blank(30);
    draw_rectangle(&mut raster, Point::new(5.0, 5.0), Point::new(25.0, 20.0), BLACK, 2.0);

    // Edge midpoints are inked.
    assert_eq!(raster.pixel(15, 5), Some(BLACK));
    assert_eq!(raster.pixel(5, 12), Some(BLACK));
    assert_eq!(raster.pixel(25, 12), Some(BLACK));
    assert_eq!(raster.pixel(15, 20), Some(BLACK));
    // Interior stays background.
    assert_eq!(raster.pixel(15, 12), Some(WHITE));
}

#[test]
fn rectangle_accepts_inverted_corners() {
    let mut forward = blank(30);
    draw_rectangle(&mut forward, Point::new(5.0, 5.0), Point::new(25.0, 20.0), BLACK, 2.0);

    let mut backward = blank(30);
    draw_rectangle(&mut backward, Point::new(25.0, 20.0), Point::new(5.0, 5.0), BLACK, 2.0);

    assert_eq!(forward, backward);
}

#[test]
fn triangle_base_is_mirrored_through_apex() {
    let mut raster = blank(40);
    // Apex (20, 5), dragged corner (30, 25) — mirrored corner lands at (10, 25).
    draw_triangle(&mut raster, Point::new(20.0, 5.0), Point::new(30.0, 25.0), BLACK, 2.0);

    // Base edge midpoint between the two corners.
    assert_eq!(raster.pixel(20, 25), Some(BLACK));
    // Both base corners.
    assert_eq!(raster.pixel(30, 25), Some(BLACK));
    assert_eq!(raster.pixel(10, 25), Some(BLACK));
    // Interior stays background.
    assert_eq!(raster.pixel(20, 20), Some(WHITE));
}

#[test]
fn heart_outline_is_symmetric_about_the_anchor() {
    let mut raster = blank(120);
    draw_heart(&mut raster, Point::new(60.0, 30.0), Point::new(60.0, 70.0), BLACK, 2.0);

    // The two lobes reach half the size to either side of the anchor; both
    // extreme columns must carry ink, and nothing may spill past them.
    let mut left = 0u32;
    let mut right = 0u32;
    let mut outside = 0u32;
    for y in 0..120 {
        if raster.pixel(40, y) == Some(BLACK) {
            left += 1;
        }
        if raster.pixel(79, y) == Some(BLACK) {
            right += 1;
        }
        if raster.pixel(30, y) == Some(BLACK) || raster.pixel(90, y) == Some(BLACK) {
            outside += 1;
        }
    }
    assert!(left > 0, "left lobe should be inked");
    assert!(right > 0, "right lobe should be inked");
    assert_eq!(outside, 0, "outline must stay within half the size of the anchor");
}

#[test]
fn heart_with_zero_size_draws_nothing() {
    let mut raster = blank(20);
    draw_heart(&mut raster, Point::new(10.0, 10.0), Point::new(10.0, 10.0), BLACK, 3.0);
    assert_eq!(raster, blank(20));
}

#[test]
fn draw_shape_dispatches_none_to_nothing() {
    let mut raster = blank(20);
    draw_shape(&mut raster, ShapeKind::None, Point::new(2.0, 2.0), Point::new(15.0, 15.0), BLACK, 3.0);
    assert_eq!(raster, blank(20));
}
