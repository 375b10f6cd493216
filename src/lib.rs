pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod render;

pub use config::{Bounds, FilterParams, HsvRange, PipelineConfig};
pub use detection::{Detections, TapeDetector};
pub use error::{Result, VisionError};
pub use models::{Contour, Group, GroupBounds, Target};
pub use pipeline::{DebugConfig, FrameSummary, GroupSummary, Pipeline, TapeSummary};
