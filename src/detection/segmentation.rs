use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::map::map_colors;

use crate::config::HsvRange;

const MASK_ON: Luma<u8> = Luma([255]);
const MASK_OFF: Luma<u8> = Luma([0]);

/// Convert an 8-bit RGB sample to 8-bit HSV.
///
/// Hue is halved to fit a byte (`[0, 180)`), saturation and value span
/// `[0, 255]`. Both hue and saturation are rounded half-up.
pub fn rgb_to_hsv(pixel: Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0.map(i32::from);
    let v = r.max(g).max(b);
    let diff = v - r.min(g).min(b);

    let s = if v == 0 { 0 } else { (510 * diff + v) / (2 * v) };

    let h = if diff == 0 {
        0
    } else {
        let sector = if v == r {
            g - b
        } else if v == g {
            b - r + 2 * diff
        } else {
            r - g + 4 * diff
        };
        let h = (60 * sector + diff).div_euclid(2 * diff);
        if h < 0 { h + 180 } else { h }
    };

    [h as u8, s as u8, v as u8]
}

/// Whether an HSV triple falls inside every channel window
pub fn in_range(hsv: [u8; 3], range: &HsvRange) -> bool {
    range.hue.contains(f64::from(hsv[0]))
        && range.saturation.contains(f64::from(hsv[1]))
        && range.value.contains(f64::from(hsv[2]))
}

/// Binary mask of the pixels whose HSV color lies inside `range`
pub fn hsv_threshold(frame: &RgbImage, range: &HsvRange) -> GrayImage {
    map_colors(frame, |pixel| {
        if in_range(rgb_to_hsv(pixel), range) {
            MASK_ON
        } else {
            MASK_OFF
        }
    })
}
