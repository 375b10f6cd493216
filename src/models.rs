use std::cell::OnceCell;

use imageproc::point::Point;

use crate::detection::filter::hull_of;
use crate::detection::moments::Moments;
use crate::error::{Result, VisionError};

/// Closed pixel boundary, in tracing order
pub type Contour = Vec<Point<i32>>;

/// One detected strip of tape.
///
/// Owns the hull contour it was built from. Everything beyond the rectangle
/// corners is derived on first use and cached for the life of the target.
#[derive(Debug, Clone)]
pub struct Target {
    vertices: [Point<i32>; 4],
    contour: Contour,
    moments: OnceCell<Moments>,
    sorted_by_x: OnceCell<[Point<i32>; 4]>,
    sorted_by_y: OnceCell<[Point<i32>; 4]>,
    angle: OnceCell<f64>,
}

impl Target {
    /// Build a target from a (hull) contour. The corners are those of the
    /// minimum-area rotated rectangle around it.
    pub fn new(contour: Contour) -> Result<Self> {
        if contour.is_empty() {
            return Err(VisionError::DegenerateGeometry(
                "cannot fit a rectangle to an empty contour".to_string(),
            ));
        }
        let vertices = min_area_corners(&contour);
        Ok(Self::from_parts(contour, vertices))
    }

    pub(crate) fn from_parts(contour: Contour, vertices: [Point<i32>; 4]) -> Self {
        Self {
            vertices,
            contour,
            moments: OnceCell::new(),
            sorted_by_x: OnceCell::new(),
            sorted_by_y: OnceCell::new(),
            angle: OnceCell::new(),
        }
    }

    pub fn vertices(&self) -> &[Point<i32>; 4] {
        &self.vertices
    }

    pub fn contour(&self) -> &[Point<i32>] {
        &self.contour
    }

    pub fn moments(&self) -> &Moments {
        self.moments.get_or_init(|| Moments::of_polygon(&self.contour))
    }

    /// Moment centroid, truncated to whole pixels
    pub fn center(&self) -> Result<Point<i32>> {
        let (cx, cy) = self.moments().centroid().ok_or_else(|| self.degenerate("centroid"))?;
        Ok(Point::new(cx as i32, cy as i32))
    }

    /// Zeroth moment of the contour
    pub fn area(&self) -> Result<f64> {
        let m00 = self.moments().m00;
        if m00 == 0.0 {
            return Err(self.degenerate("area"));
        }
        Ok(m00)
    }

    /// Corners in ascending x, ties kept in rectangle order
    pub fn sorted_vertices_by_x(&self) -> &[Point<i32>; 4] {
        self.sorted_by_x.get_or_init(|| {
            let mut sorted = self.vertices;
            sorted.sort_by_key(|p| p.x);
            sorted
        })
    }

    /// Corners in ascending y, ties kept in rectangle order
    pub fn sorted_vertices_by_y(&self) -> &[Point<i32>; 4] {
        self.sorted_by_y.get_or_init(|| {
            let mut sorted = self.vertices;
            sorted.sort_by_key(|p| p.y);
            sorted
        })
    }

    /// Tilt in degrees of the edge through the two left-most corners,
    /// measured from the vertical axis: `atan2(dx, dy)`.
    pub fn angle(&self) -> f64 {
        *self.angle.get_or_init(|| {
            let [a, b, ..] = *self.sorted_vertices_by_x();
            let dx = f64::from(b.x - a.x);
            let dy = f64::from(b.y - a.y);
            dx.atan2(dy).to_degrees()
        })
    }

    fn degenerate(&self, what: &str) -> VisionError {
        VisionError::DegenerateGeometry(format!(
            "{what} undefined for zero-area contour with {} points",
            self.contour.len()
        ))
    }
}

/// Corners of the minimum-area rotated rectangle around `points`, each
/// coordinate truncated toward zero.
///
/// Rotating calipers over every hull edge, the closing edge included. For an
/// edge `e` the extents are taken along `e` and its normal in integer units
/// scaled by `|e|^2`, so each corner is an exact rational and the final
/// division is the only rounding step. Ties keep the first edge.
fn min_area_corners(points: &[Point<i32>]) -> [Point<i32>; 4] {
    let hull = hull_of(points);
    let mut best: Option<(i128, i64, [i64; 6])> = None;

    for (i, a) in hull.iter().enumerate() {
        let b = hull[(i + 1) % hull.len()];
        let (ex, ey) = (i64::from(b.x - a.x), i64::from(b.y - a.y));
        let scale = ex * ex + ey * ey;
        if scale == 0 {
            continue;
        }

        let (mut s0, mut s1, mut t0, mut t1) = (i64::MAX, i64::MIN, i64::MAX, i64::MIN);
        for q in &hull {
            let (x, y) = (i64::from(q.x), i64::from(q.y));
            let (s, t) = (x * ex + y * ey, y * ex - x * ey);
            s0 = s0.min(s);
            s1 = s1.max(s);
            t0 = t0.min(t);
            t1 = t1.max(t);
        }

        // area = extent / scale, compared by cross-multiplying
        let extent = i128::from(s1 - s0) * i128::from(t1 - t0);
        let smaller = match best {
            None => true,
            Some((e, sc, _)) => extent * i128::from(sc) < e * i128::from(scale),
        };
        if smaller {
            best = Some((extent, scale, [ex, ey, s0, s1, t0, t1]));
        }
    }

    let Some((_, scale, [ex, ey, s0, s1, t0, t1])) = best else {
        // Single point (or repeated copies of one)
        return [points[0]; 4];
    };
    let corner = |s: i64, t: i64| {
        Point::new(((s * ex - t * ey) / scale) as i32, ((s * ey + t * ex) / scale) as i32)
    };
    [corner(s0, t0), corner(s1, t0), corner(s1, t1), corner(s0, t1)]
}

/// Frame drawn around a matched pair: two opposite corners, in the order
/// they were taken from the members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupBounds {
    pub from: Point<i32>,
    pub to: Point<i32>,
}

impl GroupBounds {
    /// `(top_left, bottom_right)`
    pub fn normalized(&self) -> (Point<i32>, Point<i32>) {
        (
            Point::new(self.from.x.min(self.to.x), self.from.y.min(self.to.y)),
            Point::new(self.from.x.max(self.to.x), self.from.y.max(self.to.y)),
        )
    }
}

/// Two targets linked by the pairing rule. Borrows its members from the
/// frame's target list.
#[derive(Debug, Clone, Copy)]
pub struct Group<'a> {
    pub first: &'a Target,
    pub second: &'a Target,
    pub center: Point<i32>,
    pub bounds: GroupBounds,
}

impl<'a> Group<'a> {
    pub fn new(first: &'a Target, second: &'a Target) -> Result<Self> {
        let (c1, c2) = (first.center()?, second.center()?);
        let center = Point::new((c1.x + c2.x) / 2, (c1.y + c2.y) / 2);

        let (fx, sy) = (first.sorted_vertices_by_x(), second.sorted_vertices_by_y());
        let bounds = GroupBounds {
            from: Point::new(fx[2].x, fx[0].y),
            to: Point::new(sy[2].x, sy[3].y),
        };

        Ok(Self {
            first,
            second,
            center,
            bounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point<i32> {
        Point::new(x, y)
    }

    fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Contour {
        vec![p(x0, y0), p(x1, y0), p(x1, y1), p(x0, y1)]
    }

    #[test]
    fn axis_aligned_rectangle_geometry() {
        let target = Target::new(rect(20, 10, 80, 50)).unwrap();
        assert_eq!(target.center().unwrap(), p(50, 30));
        assert_eq!(target.area().unwrap(), 2400.0);

        let mut corners = target.vertices().to_vec();
        corners.sort_by_key(|q| (q.x, q.y));
        assert_eq!(corners, vec![p(20, 10), p(20, 50), p(80, 10), p(80, 50)]);
    }

    #[test]
    fn centroid_truncates() {
        let target = Target::new(rect(0, 0, 5, 3)).unwrap();
        // (2.5, 1.5)
        assert_eq!(target.center().unwrap(), p(2, 1));
    }

    #[test]
    fn empty_contour_is_degenerate() {
        assert!(matches!(Target::new(Vec::new()), Err(VisionError::DegenerateGeometry(_))));
    }

    #[test]
    fn zero_area_contour_faults_on_center_and_area() {
        let line = vec![p(0, 0), p(5, 5), p(10, 10)];
        let target = Target::from_parts(line, [p(0, 0), p(10, 10), p(10, 10), p(0, 0)]);
        assert!(matches!(target.center(), Err(VisionError::DegenerateGeometry(_))));
        assert!(matches!(target.area(), Err(VisionError::DegenerateGeometry(_))));
        // Angle only depends on the corners
        assert_eq!(target.angle(), 0.0);
    }

    #[test]
    fn sorting_is_stable() {
        let vertices = [p(5, 9), p(1, 4), p(5, 2), p(1, 7)];
        let target = Target::from_parts(rect(1, 2, 5, 9), vertices);
        assert_eq!(target.sorted_vertices_by_x(), &[p(1, 4), p(1, 7), p(5, 9), p(5, 2)]);
        assert_eq!(target.sorted_vertices_by_y(), &[p(5, 2), p(1, 4), p(1, 7), p(5, 9)]);
    }

    #[test]
    fn angle_is_measured_from_vertical() {
        let upright = Target::from_parts(rect(0, 0, 4, 10), [p(0, 0), p(4, 0), p(4, 10), p(0, 10)]);
        assert_eq!(upright.angle(), 0.0);

        // Left edge leans right going down: dx = 1, dy = 1
        let leaning = [p(0, 0), p(1, 1), p(9, 1), p(8, 0)];
        let target = Target::from_parts(leaning.to_vec(), leaning);
        assert!((target.angle() - 45.0).abs() < 1e-9);

        // Left edge leans left going down: dx = 1, dy = -1
        let mirrored = [p(1, 0), p(0, 1), p(8, 1), p(9, 0)];
        let target = Target::from_parts(mirrored.to_vec(), mirrored);
        assert!((target.angle() - 135.0).abs() < 1e-9);
    }

    #[test]
    fn cached_values_are_stable() {
        let target = Target::new(rect(3, 4, 30, 60)).unwrap();
        let first = (target.center().unwrap(), target.area().unwrap(), target.angle());
        let second = (target.center().unwrap(), target.area().unwrap(), target.angle());
        assert_eq!(first, second);
        assert!(std::ptr::eq(target.moments(), target.moments()));
    }

    #[test]
    fn rotated_corners_are_truncated() {
        let target = Target::new(vec![p(140, 60), p(200, 110), p(100, 100)]).unwrap();
        // Exact corners: (200, 110), (100, 100), (104.36, 56.44), (204.36, 66.44)
        assert_eq!(
            target.sorted_vertices_by_x(),
            &[p(100, 100), p(104, 56), p(200, 110), p(204, 66)]
        );
        assert!((target.angle() - 174.805_571).abs() < 1e-4);
    }

    #[test]
    fn parallelogram_fits_along_long_side() {
        // 14 x 3 along the horizontal edges beats 13 x 6 along the slanted ones
        let target = Target::new(vec![p(0, 0), p(10, 0), p(14, 3), p(4, 3)]).unwrap();
        let mut corners = target.vertices().to_vec();
        corners.sort_by_key(|q| (q.x, q.y));
        assert_eq!(corners, vec![p(0, 0), p(0, 3), p(14, 0), p(14, 3)]);
    }

    #[test]
    fn single_point_contour_collapses() {
        let target = Target::new(vec![p(7, 9)]).unwrap();
        assert_eq!(target.vertices(), &[p(7, 9); 4]);
    }

    #[test]
    fn group_center_and_bounds() {
        let left = Target::from_parts(rect(0, 0, 10, 40), [p(0, 0), p(10, 0), p(10, 40), p(0, 40)]);
        let right =
            Target::from_parts(rect(30, 0, 41, 40), [p(30, 0), p(41, 0), p(41, 40), p(30, 40)]);
        let group = Group::new(&left, &right).unwrap();
        // (5, 20) and (35, 20)
        assert_eq!(group.center, p(20, 20));
        assert_eq!(group.bounds.from, p(10, 0));
        assert_eq!(group.bounds.to, p(41, 40));
        assert_eq!(group.bounds.normalized(), (p(10, 0), p(41, 40)));
    }
}
