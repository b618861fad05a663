//! Error and warning types shared by the rendering pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::{EarSide, Frequency};

/// A calibration lookup that fell outside the profile's known domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupMiss {
    #[error("no x coordinate for {frequency} on the {ear} ear")]
    Frequency { ear: EarSide, frequency: Frequency },
    #[error("{frequency} is not a bone-conduction frequency ({ear} ear)")]
    BoneFrequency { ear: EarSide, frequency: Frequency },
    #[error("level {0} dB HL is outside -10..=120 in steps of 5")]
    Level(i32),
}

#[derive(Debug, Error)]
pub enum AudiogramError {
    #[error("template image '{path}' could not be read: {source}")]
    MissingTemplateAsset {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("calibration lookup miss: {0}")]
    CalibrationLookupMiss(#[from] LookupMiss),
    #[error("invalid calibration profile: {0}")]
    InvalidProfile(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("png encoding error: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Recoverable problems found while preparing a template. Rendering still
/// proceeds; the caller decides whether to surface them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateWarning {
    /// The image is not the size the calibration profile was aligned against,
    /// so plotted symbols may not line up with the printed grid.
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

impl std::fmt::Display for TemplateWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateWarning::DimensionMismatch { expected, actual } => write!(
                f,
                "image size is {}x{}, expected {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, AudiogramError>;
