use image::GrayImage;
use imageproc::contours::{self, BorderType};
use imageproc::point::Point;

use crate::models::Contour;

/// Trace the borders of every connected foreground region in `mask`.
///
/// With `external_only` set, hole borders and anything nested inside a hole
/// are dropped. Otherwise every border is returned as an independent contour
/// and the nesting is discarded.
pub fn find_contours(mask: &GrayImage, external_only: bool) -> Vec<Contour> {
    contours::find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| {
            !external_only || (matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        })
        .map(|c| simplify_chain(&c.points))
        .collect()
}

/// Compress straight runs of a closed chain down to their end points.
pub fn simplify_chain(points: &[Point<i32>]) -> Contour {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }

    let step =
        |from: Point<i32>, to: Point<i32>| ((to.x - from.x).signum(), (to.y - from.y).signum());

    (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect()
}
