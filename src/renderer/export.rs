//! Export of a rendered scene to PNG and SVG.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::RgbaImage;
use png::{BitDepth, ColorType, Encoder, PixelDimensions, Unit};

use super::scene::{BoundingBox, RenderedScene};
use super::svg_builder::{empty_svg, SvgBuilder};
use crate::error::Result;

const METERS_PER_INCH: f64 = 0.0254;

/// An encoded PNG and the metadata written into it.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterExport {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub dpi: f64,
}

/// Encode the painted canvas as PNG at the template's native size.
///
/// The canvas is written pixel-for-pixel (no resampling, no cropping) with a
/// pHYs chunk declaring the template resolution, so placing the image at its
/// natural size in a document reproduces the printed chart's dimensions.
pub fn export_png(scene: &RenderedScene) -> Result<RasterExport> {
    let (width, height) = (scene.width(), scene.height());
    let bytes = encode_png(scene.canvas(), scene.dpi())?;
    log::debug!("encoded {}x{} PNG at {} dpi ({} bytes)", width, height, scene.dpi(), bytes.len());

    Ok(RasterExport { bytes, width, height, dpi: scene.dpi() })
}

/// Write the scene as SVG, cropped to the drawn symbols.
///
/// The unpainted template is embedded as a PNG image in template pixel space
/// and the display list is written over it. Coordinates stay in template
/// pixels, so every element sits exactly where it does on the raster; only
/// the viewBox is tightened to the ink extent.
pub fn export_svg(scene: &RenderedScene) -> Result<String> {
    let Some(bounds) = scene.bounds() else {
        return Ok(empty_svg("No measurements plotted"));
    };

    let background = encode_png(scene.background(), scene.dpi())?;
    let mut svg = SvgBuilder::new(snap_outward(bounds), scene.dpi());
    svg.background(&STANDARD.encode(background), scene.width(), scene.height());
    for element in scene.elements() {
        svg.element(element);
    }
    Ok(svg.build())
}

fn encode_png(image: &RgbaImage, dpi: f64) -> Result<Vec<u8>> {
    let ppm = (dpi / METERS_PER_INCH).round() as u32;

    let mut bytes = Vec::new();
    {
        let mut enc = Encoder::new(&mut bytes, image.width(), image.height());
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        enc.set_pixel_dims(Some(PixelDimensions { xppu: ppm, yppu: ppm, unit: Unit::Meter }));
        let mut writer = enc.write_header()?;
        writer.write_image_data(image.as_raw())?;
        writer.finish()?;
    }
    Ok(bytes)
}

/// Grow a box to whole pixels so rounding in the viewBox never clips ink.
fn snap_outward(b: BoundingBox) -> BoundingBox {
    BoundingBox {
        min_x: b.min_x.floor(),
        min_y: b.min_y.floor(),
        max_x: b.max_x.ceil(),
        max_y: b.max_y.ceil(),
    }
}
