use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbImage;
use log::{debug, info};
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::detection::{Detections, TapeDetector};
use crate::models::{Group, Target};
use crate::render::draw_overlay;

/// Read an image file as one RGB frame
pub fn load_frame(path: impl AsRef<Path>) -> crate::error::Result<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
}

/// Owned per-target figures, detached from the frame's target list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TapeSummary {
    pub center: (i32, i32),
    pub area: f64,
    pub angle: f64,
    pub vertices: [(i32, i32); 4],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    /// Indices into [`FrameSummary::tapes`]
    pub members: (usize, usize),
    pub center: (i32, i32),
    pub bounds: [(i32, i32); 2],
}

/// Everything detected in one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSummary {
    pub frame: usize,
    pub tapes: Vec<TapeSummary>,
    pub groups: Vec<GroupSummary>,
}

impl FrameSummary {
    fn build(frame: usize, detections: &Detections, groups: &[Group<'_>]) -> Result<Self> {
        let tapes = detections
            .targets
            .iter()
            .map(|t| {
                let c = t.center()?;
                Ok(TapeSummary {
                    center: (c.x, c.y),
                    area: t.area()?,
                    angle: t.angle(),
                    vertices: t.vertices().map(|v| (v.x, v.y)),
                })
            })
            .collect::<crate::error::Result<Vec<_>>>()?;

        let index_of = |target: &Target| {
            detections
                .targets
                .iter()
                .position(|t| std::ptr::eq(t, target))
                .context("group member is not part of this frame")
        };
        let groups = groups
            .iter()
            .map(|g| {
                Ok(GroupSummary {
                    members: (index_of(g.first)?, index_of(g.second)?),
                    center: (g.center.x, g.center.y),
                    bounds: [(g.bounds.from.x, g.bounds.from.y), (g.bounds.to.x, g.bounds.to.y)],
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            frame,
            tapes,
            groups,
        })
    }
}

/// Drives a [`TapeDetector`] frame after frame. The only thing carried
/// between frames is the frame counter used to name debug output.
pub struct Pipeline {
    detector: TapeDetector,
    debug: Option<DebugConfig>,
    frames_seen: usize,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let detector = TapeDetector::new(config).context("Rejected pipeline configuration")?;
        Ok(Self {
            detector,
            debug: None,
            frames_seen: 0,
        })
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.debug = Some(DebugConfig { output_dir });

        Ok(self)
    }

    /// Process one frame. A failure only concerns this frame; the next call
    /// starts from scratch.
    pub fn process(&mut self, frame: &RgbImage) -> Result<FrameSummary> {
        self.frames_seen += 1;
        let index = self.frames_seen;

        let detections = self.detector.detect(frame).context("Target detection failed")?;
        let groups = detections.groups().context("Target grouping failed")?;
        info!("frame {}: {} tapes, {} groups", index, detections.len(), groups.len());

        self.save_debug_output(index, frame, &detections, &groups)?;

        FrameSummary::build(index, &detections, &groups)
    }

    fn save_debug_output(
        &self,
        index: usize,
        frame: &RgbImage,
        detections: &Detections,
        groups: &[Group<'_>],
    ) -> Result<()> {
        let Some(debug_config) = &self.debug else {
            return Ok(());
        };

        let dir = &debug_config.output_dir;
        let save = |name: &str, result: image::ImageResult<()>| {
            result.map_err(|e| anyhow::anyhow!("Failed to save debug image {}: {}", name, e))?;
            debug!("Debug: saved {}", name);
            Ok::<_, anyhow::Error>(())
        };

        let name = format!("{:02}_input.png", index);
        save(&name, frame.save(dir.join(&name)))?;

        let name = format!("{:02}_mask.png", index);
        save(&name, self.detector.mask(frame).save(dir.join(&name)))?;

        let name = format!("{:02}_overlay.png", index);
        save(&name, draw_overlay(frame, detections, groups).save(dir.join(&name)))?;

        Ok(())
    }
}
