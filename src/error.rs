use std::path::PathBuf;

/// Errors raised by the tape detection core.
#[derive(thiserror::Error, Debug)]
pub enum VisionError {
    /// Centroid or area requested on a contour with a zero area moment.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("failed to read configuration {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    ConfigParse(#[from] serde_json::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VisionError>;
