use image::{Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;
use tapevision::{Bounds, FilterParams, PipelineConfig};

/// Lit tape: fully white, inside the default value window
pub const TAPE: Rgb<u8> = Rgb([255, 255, 255]);
/// Dark background, outside the default value window
pub const BACKGROUND: Rgb<u8> = Rgb([20, 30, 40]);

/// Creates a frame filled with the background color.
pub fn blank_frame(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, BACKGROUND)
}

/// Paints the inclusive pixel rectangle `[x0, x1] x [y0, y1]` with tape.
pub fn paint_rect(frame: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32) {
    for y in y0..=y1 {
        for x in x0..=x1 {
            frame.put_pixel(x, y, TAPE);
        }
    }
}

/// Fills a polygon with tape. The first and last point must differ.
pub fn paint_polygon(frame: &mut RgbImage, corners: &[(i32, i32)]) {
    let poly: Vec<Point<i32>> = corners.iter().map(|&(x, y)| Point::new(x, y)).collect();
    draw_polygon_mut(frame, &poly, TAPE);
}

/// Corners of a `w x h` rectangle centred on `(cx, cy)` and rotated by
/// `degrees` (clockwise on screen).
pub fn rotated_rect(cx: f64, cy: f64, w: f64, h: f64, degrees: f64) -> Vec<(i32, i32)> {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [(-w / 2.0, -h / 2.0), (w / 2.0, -h / 2.0), (w / 2.0, h / 2.0), (-w / 2.0, h / 2.0)]
        .iter()
        .map(|&(dx, dy)| {
            let x = cx + dx * cos - dy * sin;
            let y = cy + dx * sin + dy * cos;
            (x.round() as i32, y.round() as i32)
        })
        .collect()
}

/// Default color window with loose geometry limits that still drop specks.
pub fn tape_config() -> PipelineConfig {
    PipelineConfig {
        filter: FilterParams {
            min_area: 100.0,
            ..FilterParams::permissive()
        },
        ..Default::default()
    }
}

/// Same as [`tape_config`] with a solidity window.
pub fn tape_config_with_solidity(min: f64, max: f64) -> PipelineConfig {
    let mut config = tape_config();
    config.filter.solidity = Bounds::new(min, max);
    config
}

/// True when every point lies inside the convex quadrilateral `quad`,
/// allowing `slack` pixels for the integer corners.
pub fn quad_contains(quad: &[Point<i32>; 4], points: &[Point<i32>], slack: f64) -> bool {
    let cx = quad.iter().map(|p| f64::from(p.x)).sum::<f64>() / 4.0;
    let cy = quad.iter().map(|p| f64::from(p.y)).sum::<f64>() / 4.0;

    points.iter().all(|p| {
        (0..4).all(|i| {
            let (a, b) = (quad[i], quad[(i + 1) % 4]);
            let (ex, ey) = (f64::from(b.x - a.x), f64::from(b.y - a.y));
            let len = ex.hypot(ey);
            if len == 0.0 {
                return true;
            }
            let side =
                |x: f64, y: f64| (ex * (y - f64::from(a.y)) - ey * (x - f64::from(a.x))) / len;
            let inward = side(cx, cy).signum();
            side(f64::from(p.x), f64::from(p.y)) * inward >= -slack
        })
    })
}
