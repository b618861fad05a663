//! Rendering tests — place measurements on the built-in chart and export.

use audiogramlib::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use base64::Engine;
use image::{Rgba, RgbaImage};
use std::collections::HashSet;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn output_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn mixed_loss() -> Audiogram {
    let json = std::fs::read_to_string(fixtures_dir().join("mixed_loss.json")).unwrap();
    parse_audiogram_json(&json).expect("fixture should parse")
}

fn render(audiogram: &Audiogram, scheme: ColorScheme) -> RenderedScene {
    let profile = CalibrationProfile::dual_grid_1060x674();
    let template = ChartTemplate::blank(&profile);
    render_audiogram(audiogram, &profile, scheme, &template).expect("render should succeed")
}

/// Parse `viewBox="x y w h"` out of an SVG document.
fn view_box(svg: &str) -> (f64, f64, f64, f64) {
    let start = svg.find("viewBox=\"").expect("SVG should have viewBox") + "viewBox=\"".len();
    let end = start + svg[start..].find('"').unwrap();
    let v: Vec<f64> = svg[start..end]
        .split_whitespace()
        .map(|n| n.parse().unwrap())
        .collect();
    (v[0], v[1], v[2], v[3])
}

// ═══════════════════════════════════════════════════════════════════════
// Placement
// ═══════════════════════════════════════════════════════════════════════

#[rstest]
fn air_marker_lands_on_calibrated_point(
    #[values(EarSide::Right, EarSide::Left)] ear: EarSide,
    #[values(
        Frequency::Hz250,
        Frequency::Hz500,
        Frequency::Hz1000,
        Frequency::Hz2000,
        Frequency::Hz3000,
        Frequency::Hz4000,
        Frequency::Hz6000,
        Frequency::Hz8000
    )]
    frequency: Frequency,
    #[values(-10, 0, 65, 120)] db: i32,
) {
    let profile = CalibrationProfile::dual_grid_1060x674();
    let mut audiogram = Audiogram::default();
    audiogram.ear_mut(ear).air.insert(frequency, Level::Present(db));

    let scene = render(&audiogram, ColorScheme::Dual);
    let markers: Vec<_> = scene
        .elements()
        .iter()
        .filter_map(|e| match e {
            SceneElement::AirMarker { ear: e_ear, frequency: f, center, .. } => Some((*e_ear, *f, *center)),
            _ => None,
        })
        .collect();

    let expected = renderer::Point::new(profile.x_of(ear, frequency).unwrap(), profile.y_of(db).unwrap());
    assert_eq!(markers, vec![(ear, frequency, expected)]);
}

#[test]
fn builtin_chart_positions() {
    let mut audiogram = Audiogram::default();
    audiogram.right.air.insert(Frequency::Hz250, Level::Present(-10));
    audiogram.left.air.insert(Frequency::Hz8000, Level::Present(120));
    let scene = render(&audiogram, ColorScheme::Dual);

    let centers: Vec<_> = scene
        .elements()
        .iter()
        .filter_map(|e| match e {
            SceneElement::AirMarker { center, shape, .. } => Some((center.x, center.y, *shape)),
            _ => None,
        })
        .collect();
    assert_eq!(
        centers,
        vec![
            (218.0, 53.0, renderer::AirMarkerShape::Circle),
            (1029.0, 356.0, renderer::AirMarkerShape::Cross),
        ]
    );
}

#[test]
fn masked_brackets_sit_on_the_ear_side() {
    let scene = render(&mixed_loss(), ColorScheme::Dual);
    let brackets: Vec<_> = scene
        .elements()
        .iter()
        .filter_map(|e| match e {
            SceneElement::BoneGlyph { ear, frequency, anchor, center, glyph: BoneGlyph::MaskedBracket, .. } => {
                Some((*ear, *frequency, center.x - anchor.x, anchor.y))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        brackets,
        vec![
            (EarSide::Right, Frequency::Hz1000, -13.0, 76.0), // masked 0 dB wins over unmasked 30
            (EarSide::Left, Frequency::Hz1000, 13.0, 111.0),
            (EarSide::Left, Frequency::Hz4000, 13.0, 146.0),
        ]
    );
}

#[test]
fn triangles_are_centred_on_frequency_line() {
    let scene = render(&mixed_loss(), ColorScheme::Dual);
    let triangles: Vec<_> = scene
        .elements()
        .iter()
        .filter_map(|e| match e {
            SceneElement::BoneGlyph { ear, frequency, anchor, center, glyph: BoneGlyph::UnmaskedTriangle, .. } => {
                assert_eq!(anchor, center);
                Some((*ear, *frequency))
            }
            _ => None,
        })
        .collect();
    assert_eq!(
        triangles,
        vec![
            (EarSide::Right, Frequency::Hz500),
            (EarSide::Right, Frequency::Hz2000),
            (EarSide::Left, Frequency::Hz500),
        ]
    );
}

#[test]
fn mixed_loss_element_count() {
    let scene = render(&mixed_loss(), ColorScheme::Dual);
    // right: line + 7 markers + 3 glyphs; left: line + 8 markers + 3 glyphs
    assert_eq!(scene.elements().len(), 23);
}

// ═══════════════════════════════════════════════════════════════════════
// Colour schemes
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn monochrome_uses_one_colour_everywhere() {
    let scene = render(&mixed_loss(), ColorScheme::Monochrome);
    let colours: HashSet<_> = scene.elements().iter().map(SceneElement::color).collect();
    assert_eq!(colours, HashSet::from([Color::BLACK]));
}

#[test]
fn dual_scheme_colours_by_ear() {
    let scene = render(&mixed_loss(), ColorScheme::Dual);
    for element in scene.elements() {
        let expected = match element.ear() {
            EarSide::Right => Color::RED,
            EarSide::Left => Color::BLUE,
        };
        assert_eq!(element.color(), expected, "{element:?}");
    }

    let svg = export_svg(&scene).unwrap();
    assert!(svg.contains("stroke=\"#ff0000\""));
    assert!(svg.contains("stroke=\"#0000ff\""));
    assert!(!svg.contains("stroke=\"#000000\""));
}

// ═══════════════════════════════════════════════════════════════════════
// Export
// ═══════════════════════════════════════════════════════════════════════

#[rstest]
#[case::empty(Audiogram::default())]
#[case::single(parse_audiogram_json(r#"{"left": {"air": {"2000": 40}}}"#).unwrap())]
#[case::full(mixed_loss())]
fn png_matches_template_size(#[case] audiogram: Audiogram) {
    let scene = render(&audiogram, ColorScheme::Dual);
    let raster = export_png(&scene).unwrap();
    assert_eq!((raster.width, raster.height), (1060, 674));

    let decoded = image::load_from_memory(&raster.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1060, 674));
}

#[test]
fn png_declares_template_resolution() {
    let scene = render(&mixed_loss(), ColorScheme::Dual);
    let raster = export_png(&scene).unwrap();

    let decoder = png::Decoder::new(raster.bytes.as_slice());
    let reader = decoder.read_info().unwrap();
    let dims = reader.info().pixel_dims.expect("pHYs chunk");
    assert_eq!(dims.unit, png::Unit::Meter);
    assert_eq!((dims.xppu, dims.yppu), (3780, 3780)); // 96 dpi

    std::fs::write(output_dir().join("mixed_loss.png"), &raster.bytes).unwrap();
}

#[test]
fn png_pixels_match_scene_canvas() {
    let scene = render(&mixed_loss(), ColorScheme::Dual);
    let raster = export_png(&scene).unwrap();
    let decoded = image::load_from_memory(&raster.bytes).unwrap().to_rgba8();
    assert!(decoded.as_raw() == scene.canvas().as_raw());
}

#[test]
fn svg_box_is_tight_around_plotted_points() {
    let scene = render(&mixed_loss(), ColorScheme::Dual);
    let svg = export_svg(&scene).unwrap();
    assert!(svg.starts_with("<svg"), "Output should be SVG");
    assert!(svg.contains("</svg>"), "SVG should be closed");

    let (x, y, w, h) = view_box(&svg);
    let view = renderer::BoundingBox { min_x: x, min_y: y, max_x: x + w, max_y: y + h };
    for element in scene.elements() {
        let points: Vec<renderer::Point> = match element {
            SceneElement::AirLine { points, .. } => points.clone(),
            SceneElement::AirMarker { center, .. } => vec![*center],
            SceneElement::BoneGlyph { anchor, center, .. } => vec![*anchor, *center],
        };
        for p in points {
            assert!(view.contains(p), "{p:?} outside {view:?}");
        }
    }

    // Ink runs from the right-ear 250 Hz circle to the left-ear 8000 Hz cross,
    // and from the 0 dB symbols (y 76) down to 70 dB (y 239); the blank
    // margins are cropped away.
    assert!(x > 200.0 && x < 218.0, "min x {x}");
    assert!(x + w > 1029.0 && x + w < 1045.0, "max x {}", x + w);
    assert!(y > 60.0, "min y {y}");
    assert!(y + h > 239.0 && y + h < 250.0, "max y {}", y + h);
    assert!(w < 1060.0 && h < 674.0);

    std::fs::write(output_dir().join("mixed_loss.svg"), &svg).unwrap();
}

#[test]
fn svg_box_follows_the_ink() {
    let svg = render_json_to_svg(r#"{"right": {"air": {"1000": 60}}}"#, ColorScheme::Dual).unwrap();
    let (x, y, w, h) = view_box(&svg);
    // One circle at (317, 216): radius 5.3 + half stroke 0.8, snapped out to whole pixels.
    assert_eq!((x, y, w, h), (310.0, 209.0, 14.0, 14.0));
    assert!(svg.contains("width=\"0.1458in\""));
}

/// Decode the embedded `data:image/png;base64,...` background of an SVG.
fn embedded_background(svg: &str) -> RgbaImage {
    let prefix = "href=\"data:image/png;base64,";
    let start = svg.find(prefix).expect("SVG should embed the template") + prefix.len();
    let end = start + svg[start..].find('"').unwrap();
    let bytes = base64::engine::general_purpose::STANDARD.decode(&svg[start..end]).unwrap();
    image::load_from_memory(&bytes).unwrap().to_rgba8()
}

#[test]
fn svg_embeds_the_chart_template() {
    let profile = CalibrationProfile::dual_grid_1060x674();
    let green = ChartTemplate::from_image(RgbaImage::from_pixel(1060, 674, Rgba([0, 160, 0, 255])), &profile);
    let blank = ChartTemplate::blank(&profile);
    let audiogram = mixed_loss();

    let on_green = render_audiogram(&audiogram, &profile, ColorScheme::Dual, &green).unwrap();
    let on_blank = render_audiogram(&audiogram, &profile, ColorScheme::Dual, &blank).unwrap();
    let green_svg = export_svg(&on_green).unwrap();
    let blank_svg = export_svg(&on_blank).unwrap();
    assert_ne!(green_svg, blank_svg);
    assert_eq!(view_box(&green_svg), view_box(&blank_svg));

    // Full template in template pixel space, drawn before the symbols, with no
    // symbols baked into it.
    assert!(green_svg.contains(r#"<image class="template" x="0" y="0" width="1060" height="674""#));
    assert!(green_svg.find("<image").unwrap() < green_svg.find("class=\"ac-line-right\"").unwrap());
    let background = embedded_background(&green_svg);
    assert_eq!(background.dimensions(), (1060, 674));
    assert!(background.pixels().all(|p| *p == Rgba([0, 160, 0, 255])));
    assert!(embedded_background(&blank_svg).pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
}

#[test]
fn empty_chart_gives_placeholder_svg() {
    let svg = export_svg(&render(&Audiogram::default(), ColorScheme::Dual)).unwrap();
    assert!(svg.contains("No measurements plotted"));
}

#[test]
fn svg_marks_symbol_kinds() {
    let svg = export_svg(&render(&mixed_loss(), ColorScheme::Dual)).unwrap();
    for class in [
        "ac-line-right",
        "ac-line-left",
        "ac-marker-right",
        "ac-marker-left",
        "bc-masked-right",
        "bc-masked-left",
        "bc-unmasked-right",
        "bc-unmasked-left",
    ] {
        assert!(svg.contains(&format!("class=\"{class}\"")), "missing {class}");
    }
    // Bone conduction is never joined: exactly two connecting lines.
    assert_eq!(svg.matches("class=\"ac-line-").count(), 2);
}
