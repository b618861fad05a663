//! Air-conduction symbols: one connecting line per ear plus an open marker
//! at each measured frequency.

use super::scene::{AirMarkerShape, Point, SceneElement};
use crate::calibration::CalibrationProfile;
use crate::error::Result;
use crate::model::{Color, EarMeasurements, EarSide};

/// Elements for one ear's air-conduction thresholds.
///
/// Only present levels are plotted. Absent frequencies are skipped, so the
/// line runs straight from the last point before a gap to the first point
/// after it.
pub(super) fn air_elements(
    ear: EarSide,
    measurements: &EarMeasurements,
    profile: &CalibrationProfile,
    color: Color,
) -> Result<Vec<SceneElement>> {
    let mut placed = Vec::new();
    for (frequency, db) in measurements.present_air() {
        let center = Point::new(profile.x_of(ear, frequency)?, profile.y_of(db)?);
        placed.push((frequency, center));
    }

    let mut elements = Vec::with_capacity(placed.len() + 1);
    if placed.len() >= 2 {
        elements.push(SceneElement::AirLine {
            ear,
            points: placed.iter().map(|&(_, p)| p).collect(),
            color,
        });
    }
    let shape = AirMarkerShape::for_ear(ear);
    for (frequency, center) in placed {
        elements.push(SceneElement::AirMarker { ear, frequency, center, shape, color });
    }
    Ok(elements)
}
