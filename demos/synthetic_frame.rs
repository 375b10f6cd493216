use image::{Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

/// Corners of a `w x h` strip centred on `(cx, cy)`, rotated clockwise
fn strip(cx: f64, cy: f64, w: f64, h: f64, degrees: f64) -> Vec<Point<i32>> {
    let (sin, cos) = degrees.to_radians().sin_cos();
    [(-w / 2.0, -h / 2.0), (w / 2.0, -h / 2.0), (w / 2.0, h / 2.0), (-w / 2.0, h / 2.0)]
        .iter()
        .map(|&(dx, dy)| {
            Point::new(
                (cx + dx * cos - dy * sin).round() as i32,
                (cy + dx * sin + dy * cos).round() as i32,
            )
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let mut img = RgbImage::new(640, 480);

    // Dim gradient background
    for y in 0..480 {
        for x in 0..640 {
            let r = (x * 60 / 640) as u8;
            let g = (y * 60 / 480) as u8;
            img.put_pixel(x, y, Rgb([r, g, 40]));
        }
    }

    // Two lit tape strips leaning towards each other
    let tape = Rgb([255, 255, 255]);
    draw_polygon_mut(&mut img, &strip(260.0, 240.0, 40.0, 110.0, 14.5), tape);
    draw_polygon_mut(&mut img, &strip(380.0, 240.0, 40.0, 110.0, -14.5), tape);

    img.save("tape_pair.png")?;
    println!("Created tape_pair.png (640x480, two tape strips)");
    Ok(())
}
