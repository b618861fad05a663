//! Calibration profiles — map clinical values onto a chart template's pixels.
//!
//! A profile is produced by aligning against one specific background image
//! and is only valid for that image. The template description it carries
//! (name, version, native size, dpi) is what ties the two together; bump the
//! version whenever either side changes.
//!
//! Profiles can be loaded from JSON:
//!
//! ```json
//! {
//!   "template": { "name": "dual_audiogram_grid.png", "version": "1",
//!                 "width": 1060, "height": 674, "dpi": 96.0 },
//!   "right_x": { "250": 218, "500": 262, ... },
//!   "left_x":  { "250": 752, "500": 798, ... },
//!   "y": { "start": 53.0, "scale": 2.33, "rounding": "nearest" },
//!   "masked_offset": 13.0
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AudiogramError, LookupMiss, Result};
use crate::model::{EarSide, Frequency, Level, MIN_LEVEL_DB};

/// The background image a profile was aligned against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub name: String,
    pub version: String,
    /// Native pixel width.
    pub width: u32,
    /// Native pixel height.
    pub height: u32,
    /// Physical resolution the template is printed at.
    pub dpi: f64,
}

impl TemplateSpec {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YRounding {
    /// Snap to the nearest whole pixel (halves away from zero).
    #[default]
    Nearest,
    /// Keep the fractional position.
    Exact,
}

/// `y = start + (level + 10) * scale`, optionally snapped to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YTransform {
    pub start: f64,
    pub scale: f64,
    #[serde(default)]
    pub rounding: YRounding,
}

impl YTransform {
    fn apply(&self, db: i32) -> f64 {
        let y = self.start + (db - MIN_LEVEL_DB) as f64 * self.scale;
        match self.rounding {
            YRounding::Nearest => y.round(),
            YRounding::Exact => y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationProfile {
    template: TemplateSpec,
    right_x: BTreeMap<Frequency, f64>,
    left_x: BTreeMap<Frequency, f64>,
    y: YTransform,
    masked_offset: f64,
}

impl CalibrationProfile {
    /// Build a profile and check it with [`CalibrationProfile::validate`].
    pub fn new(
        template: TemplateSpec,
        right_x: BTreeMap<Frequency, f64>,
        left_x: BTreeMap<Frequency, f64>,
        y: YTransform,
        masked_offset: f64,
    ) -> Result<Self> {
        let profile = Self { template, right_x, left_x, y, masked_offset };
        profile.validate()?;
        Ok(profile)
    }

    /// Profile for `dual_audiogram_grid.png` (1060x674 @ 96 dpi): right ear
    /// on the left half of the sheet, left ear on the right half.
    pub fn dual_grid_1060x674() -> Self {
        let table = |xs: [f64; 8]| -> BTreeMap<Frequency, f64> {
            Frequency::AIR_CONDUCTION.into_iter().zip(xs).collect()
        };
        Self {
            template: TemplateSpec {
                name: "dual_audiogram_grid.png".into(),
                version: "1".into(),
                width: 1060,
                height: 674,
                dpi: 96.0,
            },
            right_x: table([218.0, 262.0, 317.0, 375.0, 399.0, 432.0, 456.0, 489.0]),
            left_x: table([752.0, 798.0, 855.0, 911.0, 935.0, 969.0, 992.0, 1029.0]),
            y: YTransform { start: 53.0, scale: 2.33, rounding: YRounding::Nearest },
            masked_offset: 13.0,
        }
    }

    /// Load a profile from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: CalibrationProfile = serde_json::from_str(json)?;
        profile.validate()?;
        log::debug!(
            "loaded calibration profile for {} v{}",
            profile.template.name,
            profile.template.version
        );
        Ok(profile)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn template(&self) -> &TemplateSpec {
        &self.template
    }

    /// Horizontal distance between a masked bracket and its frequency line.
    pub fn masked_offset(&self) -> f64 {
        self.masked_offset
    }

    /// Pixel x of `frequency` in `ear`'s half of the chart.
    pub fn x_of(&self, ear: EarSide, frequency: Frequency) -> Result<f64> {
        let table = match ear {
            EarSide::Right => &self.right_x,
            EarSide::Left => &self.left_x,
        };
        table
            .get(&frequency)
            .copied()
            .ok_or(AudiogramError::CalibrationLookupMiss(LookupMiss::Frequency { ear, frequency }))
    }

    /// Pixel y of a hearing level. Only levels on the -10..=120 / 5 dB grid
    /// resolve; nothing is extrapolated.
    pub fn y_of(&self, db: i32) -> Result<f64> {
        if !Level::is_on_grid(db) {
            return Err(LookupMiss::Level(db).into());
        }
        Ok(self.y.apply(db))
    }

    /// Check table coverage, monotonicity of the level axis, and that every
    /// calibrated point lands on the template.
    pub fn validate(&self) -> Result<()> {
        let t = &self.template;
        if t.width == 0 || t.height == 0 {
            return Err(invalid(format!("template {} has zero size", t.name)));
        }
        if !(t.dpi.is_finite() && t.dpi > 0.0) {
            return Err(invalid(format!("template {} has dpi {}", t.name, t.dpi)));
        }
        if !(self.masked_offset.is_finite() && self.masked_offset >= 0.0) {
            return Err(invalid(format!("masked offset {} is not a distance", self.masked_offset)));
        }

        for ear in EarSide::BOTH {
            for f in Frequency::AIR_CONDUCTION {
                let x = self
                    .x_of(ear, f)
                    .map_err(|_| invalid(format!("{ear} ear table has no entry for {f}")))?;
                if !(0.0..t.width as f64).contains(&x) {
                    return Err(invalid(format!("{ear} ear x for {f} ({x}) is off the template")));
                }
            }
        }

        let mut previous: Option<f64> = None;
        for db in Level::grid() {
            let y = self.y.apply(db);
            if !(0.0..t.height as f64).contains(&y) {
                return Err(invalid(format!("y for {db} dB ({y}) is off the template")));
            }
            if let Some(prev) = previous {
                if y <= prev {
                    return Err(invalid(format!(
                        "level axis is not increasing at {db} dB ({prev} -> {y})"
                    )));
                }
            }
            previous = Some(y);
        }
        Ok(())
    }
}

fn invalid(message: String) -> AudiogramError {
    AudiogramError::InvalidProfile(message)
}
