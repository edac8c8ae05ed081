use thiserror::Error;
use std::io;
use std::path::PathBuf;

/// Custom error types for CamPaintR
#[derive(Error, Debug)]
pub enum CamPaintError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid target color: {0}")]
    InvalidTargetColor(String),

    #[error("No regions found above the minimum size")]
    NoRegions,

    #[error("No recolored image available - run find_regions and recolor_image first")]
    NoRecoloredImage,

    #[error("CSV output error: {0}")]
    CsvOutput(#[from] csv::Error),

    #[error("Invalid input path: {0}")]
    InvalidPath(PathBuf),

    #[error("Unexpected error: {0}")]
    Other(String),
}

/// Type alias for Result with our custom error type
pub type Result<T> = std::result::Result<T, CamPaintError>;
