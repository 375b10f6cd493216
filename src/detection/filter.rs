use imageproc::geometry::{arc_length, convex_hull};
use imageproc::point::Point;
use log::debug;

use crate::config::FilterParams;
use crate::detection::moments::contour_area;
use crate::models::Contour;

/// Inclusive axis-aligned bounding box as `(x, y, width, height)`.
/// An empty contour yields all zeros.
pub fn bounding_box(points: &[Point<i32>]) -> (i32, i32, i32, i32) {
    let Some(first) = points.first() else {
        return (0, 0, 0, 0);
    };
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
}

/// Width over height, undefined for a zero height
pub fn aspect_ratio(width: i32, height: i32) -> Option<f64> {
    if height == 0 {
        return None;
    }
    Some(f64::from(width) / f64::from(height))
}

/// Percentage of the convex hull covered by the contour, undefined when the
/// hull has no area
pub fn solidity(area: f64, hull_area: f64) -> Option<f64> {
    if hull_area == 0.0 {
        return None;
    }
    Some(100.0 * area / hull_area)
}

/// Convex hull of a point set. Fewer than three points are returned as is.
pub fn hull_of(points: &[Point<i32>]) -> Contour {
    if points.len() < 3 {
        return points.to_vec();
    }
    convex_hull(points)
}

/// First failed test for `contour`, or `None` if it passes them all.
fn rejection(contour: &[Point<i32>], params: &FilterParams) -> Option<&'static str> {
    let (_, _, w, h) = bounding_box(contour);
    if !params.width.contains(f64::from(w)) {
        return Some("width");
    }
    if !params.height.contains(f64::from(h)) {
        return Some("height");
    }
    let area = contour_area(contour);
    if area < params.min_area {
        return Some("area");
    }
    if arc_length(contour, true) < params.min_perimeter {
        return Some("perimeter");
    }
    match solidity(area, contour_area(&hull_of(contour))) {
        Some(s) if params.solidity.contains(s) => {}
        _ => return Some("solidity"),
    }
    if !params.vertex_count.contains(contour.len() as f64) {
        return Some("vertex count");
    }
    match aspect_ratio(w, h) {
        Some(r) if params.ratio.contains(r) => {}
        _ => return Some("ratio"),
    }
    None
}

/// Keep the contours that satisfy every geometric threshold. Geometry is
/// left untouched.
pub fn filter_contours(contours: &[Contour], params: &FilterParams) -> Vec<Contour> {
    contours
        .iter()
        .enumerate()
        .filter(|(i, c)| match rejection(c, params) {
            Some(reason) => {
                debug!("contour {} ({} points) rejected by {} filter", i, c.len(), reason);
                false
            }
            None => true,
        })
        .map(|(_, c)| c.clone())
        .collect()
}

/// Replace every contour with its convex hull
pub fn convex_hulls(contours: &[Contour]) -> Vec<Contour> {
    contours.iter().map(Vec::as_slice).map(hull_of).collect()
}
