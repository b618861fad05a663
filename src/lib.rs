//! audiogramlib — audiogram chart rendering with print-accurate export.
//!
//! Measurements are placed on a fixed chart template using a calibration
//! profile aligned against that template, then exported as a PNG of the
//! template's exact size and resolution or as an SVG of the same chart
//! cropped to the symbols.
//!
//! # Example
//! ```no_run
//! use audiogramlib::*;
//!
//! let profile = CalibrationProfile::dual_grid_1060x674();
//! let template = ChartTemplate::open("dual_audiogram_grid.png", &profile).unwrap();
//!
//! let mut audiogram = Audiogram::default();
//! audiogram.right.air.insert(Frequency::Hz1000, Level::Present(25));
//! audiogram.left.bone.insert(Frequency::Hz1000, BoneConductionEntry::masked(0));
//!
//! let scene = render_audiogram(&audiogram, &profile, ColorScheme::Dual, &template).unwrap();
//! let png = export_png(&scene).unwrap();
//! let svg = export_svg(&scene).unwrap();
//! println!("{}x{} PNG, {} byte SVG", png.width, png.height, svg.len());
//! ```

pub mod calibration;
pub mod error;
pub mod input;
pub mod model;
pub mod renderer;
pub mod resolver;
pub mod template;

#[cfg(target_os = "android")]
pub mod android;

use std::path::Path;

pub use calibration::{CalibrationProfile, TemplateSpec, YRounding, YTransform};
pub use error::{AudiogramError, LookupMiss, Result, TemplateWarning};
pub use input::SharedUnmaskedDefaults;
pub use model::*;
pub use renderer::{export_png, export_svg, render_audiogram, RasterExport, RenderedScene, SceneElement};
pub use resolver::{resolve_bone, BoneGlyph, ResolvedBone};
pub use template::ChartTemplate;

/// Parse a measurement set from JSON.
///
/// Maps are keyed by frequency in Hz; levels are integers or `null`:
/// `{"right": {"air": {"1000": 25}, "bone": {"1000": {"unmasked": 10, "masked": null}}}}`
pub fn parse_audiogram_json(json: &str) -> Result<Audiogram> {
    Ok(serde_json::from_str(json)?)
}

/// Convert a measurement set to a JSON string.
/// Useful for passing data across FFI boundaries.
pub fn audiogram_to_json(audiogram: &Audiogram) -> Result<String> {
    Ok(serde_json::to_string_pretty(audiogram)?)
}

/// Parse measurement JSON and render it to SVG with the built-in profile.
/// The background is a blank sheet; use [`render_audiogram`] with an opened
/// [`ChartTemplate`] to get the printed grid behind the symbols.
pub fn render_json_to_svg(json: &str, scheme: ColorScheme) -> Result<String> {
    let audiogram = parse_audiogram_json(json)?;
    let profile = CalibrationProfile::dual_grid_1060x674();
    let scene = render_audiogram(&audiogram, &profile, scheme, &ChartTemplate::blank(&profile))?;
    export_svg(&scene)
}

/// Load a template, render onto it, and write the PNG to `out`.
///
/// Returns any template warnings so the caller can tell the user the chart
/// may be misaligned.
pub fn render_to_png_file<P: AsRef<Path>, Q: AsRef<Path>>(
    audiogram: &Audiogram,
    profile: &CalibrationProfile,
    scheme: ColorScheme,
    template_path: P,
    out: Q,
) -> Result<Vec<TemplateWarning>> {
    let template = ChartTemplate::open(template_path, profile)?;
    let scene = render_audiogram(audiogram, profile, scheme, &template)?;
    let png = export_png(&scene)?;
    std::fs::write(out.as_ref(), &png.bytes)?;
    Ok(template.warnings().to_vec())
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI - for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Render measurement JSON to SVG and return it as a C string.
/// The caller must free the returned string with `audiogram_free_string`.
///
/// `monochrome` non-zero draws both ears in black.
///
/// # Safety
/// `json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn audiogram_render_svg(json: *const c_char, monochrome: i32) -> *mut c_char {
    if json.is_null() {
        return std::ptr::null_mut();
    }
    let c_str = unsafe { CStr::from_ptr(json) };
    let json_str = match c_str.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };

    let scheme = if monochrome != 0 { ColorScheme::Monochrome } else { ColorScheme::Dual };

    match render_json_to_svg(json_str, scheme) {
        Ok(svg) => CString::new(svg).unwrap_or_default().into_raw(),
        Err(e) => {
            log::warn!("audiogram_render_svg failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Free a string previously returned by audiogramlib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by an audiogramlib function, or null.
#[no_mangle]
pub unsafe extern "C" fn audiogram_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
