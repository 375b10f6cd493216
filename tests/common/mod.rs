mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from tapevision for tests
pub use tapevision::{
    Bounds, Detections, FilterParams, PipelineConfig, TapeDetector, Target, VisionError,
};
