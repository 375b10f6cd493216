use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VisionError};

/// Closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive on both ends
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, name: &str, non_negative: bool) -> Result<()> {
        if self.min.is_nan() || self.max.is_nan() {
            return Err(VisionError::Configuration(format!("{name} has a NaN bound")));
        }
        if self.min > self.max {
            return Err(VisionError::Configuration(format!(
                "{name} range is inverted: min {} > max {}",
                self.min, self.max
            )));
        }
        if non_negative && self.min < 0.0 {
            return Err(VisionError::Configuration(format!(
                "{name} lower bound must not be negative (got {})",
                self.min
            )));
        }
        Ok(())
    }
}

/// Hue/saturation/value window for segmentation. Hue is in `[0, 180]`,
/// saturation and value in `[0, 255]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HsvRange {
    pub hue: Bounds,
    pub saturation: Bounds,
    pub value: Bounds,
}

impl Default for HsvRange {
    fn default() -> Self {
        Self {
            hue: Bounds::new(0.0, 180.0),
            saturation: Bounds::new(0.0, 130.5050505050505),
            value: Bounds::new(249.95503597122303, 255.0),
        }
    }
}

/// Geometric thresholds applied to every extracted contour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub min_area: f64,
    pub min_perimeter: f64,
    pub width: Bounds,
    pub height: Bounds,
    /// Percent, `100 * area / hull_area`
    pub solidity: Bounds,
    pub vertex_count: Bounds,
    /// Width divided by height
    pub ratio: Bounds,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            min_area: 100.0,
            min_perimeter: 200.0,
            width: Bounds::new(50.0, 100.0),
            height: Bounds::new(0.0, 200.0),
            solidity: Bounds::new(0.0, 100.0),
            vertex_count: Bounds::new(0.0, 1_000_000.0),
            ratio: Bounds::new(0.0, 1000.0),
        }
    }
}

impl FilterParams {
    /// Accepts every contour that has a measurable shape.
    pub fn permissive() -> Self {
        Self {
            min_area: 0.0,
            min_perimeter: 0.0,
            width: Bounds::new(0.0, f64::MAX),
            height: Bounds::new(0.0, f64::MAX),
            solidity: Bounds::new(0.0, 100.0),
            vertex_count: Bounds::new(0.0, f64::MAX),
            ratio: Bounds::new(0.0, f64::MAX),
        }
    }
}

/// Full set of thresholds for one detector. Loaded once at startup and
/// never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub threshold: HsvRange,
    /// Only keep outermost borders, ignoring holes and anything nested in them
    pub external_only: bool,
    pub filter: FilterParams,
}

impl PipelineConfig {
    /// Parse a JSON document. Missing fields fall back to the defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| VisionError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject inverted ranges and negative dimension bounds.
    pub fn validate(&self) -> Result<()> {
        let t = &self.threshold;
        t.hue.check("hue", false)?;
        t.saturation.check("saturation", false)?;
        t.value.check("value", false)?;

        let f = &self.filter;
        for (name, value) in [("min_area", f.min_area), ("min_perimeter", f.min_perimeter)] {
            if value.is_nan() || value < 0.0 {
                return Err(VisionError::Configuration(format!(
                    "{name} must be a non-negative number (got {value})"
                )));
            }
        }
        f.width.check("width", true)?;
        f.height.check("height", true)?;
        f.solidity.check("solidity", true)?;
        f.vertex_count.check("vertex_count", true)?;
        f.ratio.check("ratio", true)?;
        Ok(())
    }
}
