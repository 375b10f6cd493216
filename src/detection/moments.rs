use imageproc::point::Point;

/// Spatial moments up to first order of a closed polygon.
///
/// Normalised so that `m00` is never negative regardless of winding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    /// Green's theorem over the polygon edges, closing back to the first point.
    pub fn of_polygon(points: &[Point<i32>]) -> Self {
        let n = points.len();
        if n < 3 {
            return Self::default();
        }

        let (mut a00, mut a10, mut a01) = (0.0, 0.0, 0.0);
        for i in 0..n {
            let (p, q) = (points[i], points[(i + 1) % n]);
            let (xi, yi) = (f64::from(p.x), f64::from(p.y));
            let (xj, yj) = (f64::from(q.x), f64::from(q.y));
            let cross = xi * yj - xj * yi;
            a00 += cross;
            a10 += cross * (xi + xj);
            a01 += cross * (yi + yj);
        }

        let sign = if a00 < 0.0 { -1.0 } else { 1.0 };
        Self {
            m00: sign * a00 / 2.0,
            m10: sign * a10 / 6.0,
            m01: sign * a01 / 6.0,
        }
    }

    /// `(m10 / m00, m01 / m00)`, or `None` for a zero-area polygon
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.m00 == 0.0 {
            return None;
        }
        Some((self.m10 / self.m00, self.m01 / self.m00))
    }
}

/// Enclosed area of a closed polygon
pub fn contour_area(points: &[Point<i32>]) -> f64 {
    Moments::of_polygon(points).m00
}
