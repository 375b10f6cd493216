pub mod contours;
pub mod filter;
pub mod grouping;
pub mod moments;
pub mod segmentation;

use image::{GrayImage, RgbImage};
use log::debug;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{Contour, Group, Target};

/// Targets found in one frame
#[derive(Debug, Clone, Default)]
pub struct Detections {
    pub targets: Vec<Target>,
}

impl Detections {
    /// Pair this frame's targets. Fails if a paired target has no area.
    pub fn groups(&self) -> Result<Vec<Group<'_>>> {
        grouping::group_targets(&self.targets)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Stateless tape detector: HSV threshold, contour tracing, geometric
/// filtering, convex hulls, then one [`Target`] per hull.
#[derive(Debug, Clone, Default)]
pub struct TapeDetector {
    config: PipelineConfig,
}

impl TapeDetector {
    /// Fails with a configuration error before any frame is seen.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run every stage on a frame
    pub fn detect(&self, frame: &RgbImage) -> Result<Detections> {
        let mask = self.mask(frame);
        let raw = contours::find_contours(&mask, self.config.external_only);
        let kept = filter::filter_contours(&raw, &self.config.filter);
        let hulls = filter::convex_hulls(&kept);
        debug!(
            "{}x{} frame: {} contours, {} after filtering",
            frame.width(),
            frame.height(),
            raw.len(),
            kept.len()
        );

        let targets = hulls.into_iter().map(Target::new).collect::<Result<Vec<_>>>()?;
        Ok(Detections { targets })
    }

    /// Binary mask of the in-range pixels (for debugging)
    pub fn mask(&self, frame: &RgbImage) -> GrayImage {
        segmentation::hsv_threshold(frame, &self.config.threshold)
    }

    /// Every traced contour before filtering (for debugging)
    pub fn raw_contours(&self, frame: &RgbImage) -> Vec<Contour> {
        contours::find_contours(&self.mask(frame), self.config.external_only)
    }

    /// Contours that pass the filter (for debugging)
    pub fn filtered_contours(&self, frame: &RgbImage) -> Vec<Contour> {
        filter::filter_contours(&self.raw_contours(frame), &self.config.filter)
    }

    /// Convex hulls of the filtered contours (for debugging)
    pub fn hulls(&self, frame: &RgbImage) -> Vec<Contour> {
        filter::convex_hulls(&self.filtered_contours(frame))
    }
}
