use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::detection::Detections;
use crate::models::Group;

const TARGET_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const CENTER_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const GROUP_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const GROUP_CENTER_COLOR: Rgb<u8> = Rgb([255, 255, 0]);

const MARKER_RADIUS: i32 = 5;
const FRAME_THICKNESS: i32 = 3;

/// Copy of `frame` annotated with target rectangles, centroids and group
/// frames. Targets with no defined centroid are drawn without a marker.
pub fn draw_overlay(frame: &RgbImage, detections: &Detections, groups: &[Group<'_>]) -> RgbImage {
    let mut canvas = frame.clone();

    for target in &detections.targets {
        let v = target.vertices();
        for i in 0..4 {
            let (a, b) = (v[i], v[(i + 1) % 4]);
            draw_line_segment_mut(
                &mut canvas,
                (a.x as f32, a.y as f32),
                (b.x as f32, b.y as f32),
                TARGET_COLOR,
            );
        }
        if let Ok(c) = target.center() {
            draw_filled_circle_mut(&mut canvas, (c.x, c.y), MARKER_RADIUS, CENTER_COLOR);
        }
    }

    for group in groups {
        let (top_left, bottom_right) = group.bounds.normalized();
        for inset in 0..FRAME_THICKNESS {
            let w = bottom_right.x - top_left.x + 1 - 2 * inset;
            let h = bottom_right.y - top_left.y + 1 - 2 * inset;
            if w <= 0 || h <= 0 {
                break;
            }
            let rect = Rect::at(top_left.x + inset, top_left.y + inset).of_size(w as u32, h as u32);
            draw_hollow_rect_mut(&mut canvas, rect, GROUP_COLOR);
        }
        draw_filled_circle_mut(
            &mut canvas,
            (group.center.x, group.center.y),
            MARKER_RADIUS,
            GROUP_CENTER_COLOR,
        );
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Target;
    use imageproc::point::Point;

    #[test]
    fn empty_detections_leave_frame_untouched() {
        let frame = RgbImage::from_pixel(16, 16, Rgb([10, 20, 30]));
        let out = draw_overlay(&frame, &Detections::default(), &[]);
        assert_eq!(out, frame);
    }

    #[test]
    fn target_outline_and_center_are_drawn() -> anyhow::Result<()> {
        let frame = RgbImage::new(64, 64);
        let contour = vec![
            Point::new(10, 10),
            Point::new(40, 10),
            Point::new(40, 50),
            Point::new(10, 50),
        ];
        let detections = Detections {
            targets: vec![Target::new(contour)?],
        };
        let out = draw_overlay(&frame, &detections, &[]);
        assert_eq!(out.get_pixel(25, 10), &TARGET_COLOR);
        assert_eq!(out.get_pixel(25, 30), &CENTER_COLOR);
        assert_eq!(out.get_pixel(2, 2), &Rgb([0, 0, 0]));
        Ok(())
    }
}
