//! Chart template images — the background every audiogram is drawn on.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::calibration::CalibrationProfile;
use crate::error::{AudiogramError, Result, TemplateWarning};

#[derive(Debug, Clone)]
pub struct ChartTemplate {
    image: RgbaImage,
    warnings: Vec<TemplateWarning>,
}

impl ChartTemplate {
    /// Read a template from disk.
    ///
    /// A missing or undecodable file is fatal. A file of the wrong size is
    /// accepted with a [`TemplateWarning::DimensionMismatch`].
    pub fn open<P: AsRef<Path>>(path: P, profile: &CalibrationProfile) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| AudiogramError::MissingTemplateAsset {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded template {} ({}x{})", path.display(), image.width(), image.height());
        Ok(Self::from_image(image.to_rgba8(), profile))
    }

    /// Wrap an already decoded image.
    pub fn from_image(image: RgbaImage, profile: &CalibrationProfile) -> Self {
        let expected = profile.template().dimensions();
        let actual = image.dimensions();
        let mut warnings = Vec::new();
        if actual != expected {
            let warning = TemplateWarning::DimensionMismatch { expected, actual };
            log::warn!("{}: {warning}; symbols may not line up with the grid", profile.template().name);
            warnings.push(warning);
        }
        Self { image, warnings }
    }

    /// A plain white sheet at the profile's native size, for when no grid is
    /// wanted behind the symbols.
    pub fn blank(profile: &CalibrationProfile) -> Self {
        let (w, h) = profile.template().dimensions();
        Self {
            image: RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255])),
            warnings: Vec::new(),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn warnings(&self) -> &[TemplateWarning] {
        &self.warnings
    }
}
