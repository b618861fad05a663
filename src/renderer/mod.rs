//! Chart renderer — places audiogram symbols on a template and exports the
//! result.
//!
//! Rendering builds a display list of [`SceneElement`]s from the measurements,
//! paints it onto a copy of the template, and keeps both on the returned
//! [`RenderedScene`]. The PNG export encodes the painted canvas. The SVG
//! export embeds the unpainted template and writes the display list over it,
//! so the two never disagree.

mod constants;
mod scene;
mod svg_builder;
mod raster;
mod air;
mod bone;
mod export;

use crate::calibration::CalibrationProfile;
use crate::error::Result;
use crate::model::{Audiogram, ColorScheme, EarSide};
use crate::template::ChartTemplate;
use air::air_elements;
use bone::bone_elements;
use raster::paint_elements;

pub use export::{export_png, export_svg, RasterExport};
pub use scene::{AirMarkerShape, BoundingBox, Point, RenderedScene, SceneElement};

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Render both ears of `audiogram` onto `template`.
///
/// Fails on the first calibration lookup miss; nothing is substituted.
pub fn render_audiogram(
    audiogram: &Audiogram,
    profile: &CalibrationProfile,
    scheme: ColorScheme,
    template: &ChartTemplate,
) -> Result<RenderedScene> {
    let mut elements = Vec::new();

    // Air conduction first so bone glyphs sit on top where they overlap.
    for ear in EarSide::BOTH {
        let color = scheme.color_for(ear);
        elements.extend(air_elements(ear, audiogram.ear(ear), profile, color)?);
    }
    for ear in EarSide::BOTH {
        let color = scheme.color_for(ear);
        elements.extend(bone_elements(ear, audiogram.ear(ear), profile, color)?);
    }
    log::debug!("rendered {} chart elements", elements.len());

    let background = template.image().clone();
    let mut canvas = background.clone();
    paint_elements(&mut canvas, &elements);
    Ok(RenderedScene::new(background, canvas, profile.template().dpi, elements))
}
