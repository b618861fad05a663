//! Bone-conduction glyphs. Each frequency stands alone; bone-conduction
//! points are never joined.

use super::scene::{Point, SceneElement};
use crate::calibration::CalibrationProfile;
use crate::error::{LookupMiss, Result};
use crate::model::{Color, EarMeasurements, EarSide};
use crate::resolver::{glyph_offset, resolve_bone};

/// Glyphs for every resolvable bone-conduction entry of one ear.
///
/// A plottable value at a frequency outside
/// [`Frequency::BONE_CONDUCTION`](crate::model::Frequency::BONE_CONDUCTION) is
/// a lookup miss. Entries with neither value present draw nothing wherever
/// they are keyed.
pub(super) fn bone_elements(
    ear: EarSide,
    measurements: &EarMeasurements,
    profile: &CalibrationProfile,
    color: Color,
) -> Result<Vec<SceneElement>> {
    let mut elements = Vec::new();
    for (&frequency, entry) in &measurements.bone {
        let Some(resolved) = resolve_bone(entry) else {
            continue;
        };
        if !frequency.is_bone_conduction() {
            return Err(LookupMiss::BoneFrequency { ear, frequency }.into());
        }
        let anchor = Point::new(profile.x_of(ear, frequency)?, profile.y_of(resolved.level)?);
        let dx = glyph_offset(resolved.glyph, ear, profile.masked_offset());
        elements.push(SceneElement::BoneGlyph {
            ear,
            frequency,
            anchor,
            center: Point::new(anchor.x + dx, anchor.y),
            glyph: resolved.glyph,
            color,
        });
    }
    Ok(elements)
}
