//! The rendered scene — canvas plus the display list it was painted from.

use image::RgbaImage;

use super::constants::*;
use crate::model::{Color, EarSide, Frequency};
use crate::resolver::BoneGlyph;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in template pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn around(p: Point, pad: f64) -> Self {
        Self { min_x: p.x - pad, min_y: p.y - pad, max_x: p.x + pad, max_y: p.y + pad }
    }

    pub fn union(self, other: BoundingBox) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirMarkerShape {
    /// Right ear.
    Circle,
    /// Left ear.
    Cross,
}

impl AirMarkerShape {
    pub fn for_ear(ear: EarSide) -> Self {
        match ear {
            EarSide::Right => AirMarkerShape::Circle,
            EarSide::Left => AirMarkerShape::Cross,
        }
    }
}

/// One drawn item.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneElement {
    /// Line joining an ear's present air-conduction points.
    AirLine { ear: EarSide, points: Vec<Point>, color: Color },
    AirMarker {
        ear: EarSide,
        frequency: Frequency,
        center: Point,
        shape: AirMarkerShape,
        color: Color,
    },
    /// `anchor` is the calibrated (frequency, level) position; `center` is
    /// where the glyph is drawn after the bracket offset.
    BoneGlyph {
        ear: EarSide,
        frequency: Frequency,
        anchor: Point,
        center: Point,
        glyph: BoneGlyph,
        color: Color,
    },
}

/// Outline primitive shared by the raster painter and the SVG writer, so both
/// exports draw exactly the same geometry.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Stroke {
    Path { points: Vec<Point>, closed: bool },
    Circle { center: Point, radius: f64 },
}

impl SceneElement {
    pub fn ear(&self) -> EarSide {
        match self {
            SceneElement::AirLine { ear, .. }
            | SceneElement::AirMarker { ear, .. }
            | SceneElement::BoneGlyph { ear, .. } => *ear,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            SceneElement::AirLine { color, .. }
            | SceneElement::AirMarker { color, .. }
            | SceneElement::BoneGlyph { color, .. } => *color,
        }
    }

    /// SVG class name, e.g. `ac-line-right`.
    pub(super) fn class(&self) -> String {
        let kind = match self {
            SceneElement::AirLine { .. } => "ac-line",
            SceneElement::AirMarker { .. } => "ac-marker",
            SceneElement::BoneGlyph { glyph: BoneGlyph::MaskedBracket, .. } => "bc-masked",
            SceneElement::BoneGlyph { glyph: BoneGlyph::UnmaskedTriangle, .. } => "bc-unmasked",
        };
        format!("{kind}-{}", self.ear())
    }

    pub(super) fn stroke_width(&self) -> f64 {
        match self {
            SceneElement::AirLine { .. } => AC_LINE_WIDTH,
            SceneElement::AirMarker { .. } => AC_MARKER_STROKE,
            SceneElement::BoneGlyph { glyph: BoneGlyph::MaskedBracket, .. } => BC_BRACKET_STROKE,
            SceneElement::BoneGlyph { glyph: BoneGlyph::UnmaskedTriangle, .. } => BC_TRIANGLE_STROKE,
        }
    }

    pub(super) fn strokes(&self) -> Vec<Stroke> {
        match self {
            SceneElement::AirLine { points, .. } => {
                vec![Stroke::Path { points: points.clone(), closed: false }]
            }
            SceneElement::AirMarker { center, shape: AirMarkerShape::Circle, .. } => {
                vec![Stroke::Circle { center: *center, radius: AC_CIRCLE_RADIUS }]
            }
            SceneElement::AirMarker { center: c, shape: AirMarkerShape::Cross, .. } => {
                let h = AC_CROSS_HALF;
                vec![
                    Stroke::Path {
                        points: vec![Point::new(c.x - h, c.y - h), Point::new(c.x + h, c.y + h)],
                        closed: false,
                    },
                    Stroke::Path {
                        points: vec![Point::new(c.x - h, c.y + h), Point::new(c.x + h, c.y - h)],
                        closed: false,
                    },
                ]
            }
            SceneElement::BoneGlyph { center: c, glyph: BoneGlyph::UnmaskedTriangle, .. } => {
                let r = BC_TRIANGLE_RADIUS;
                let half_base = r * 3f64.sqrt() / 2.0;
                vec![Stroke::Path {
                    points: vec![
                        Point::new(c.x, c.y - r),
                        Point::new(c.x + half_base, c.y + r / 2.0),
                        Point::new(c.x - half_base, c.y + r / 2.0),
                    ],
                    closed: true,
                }]
            }
            SceneElement::BoneGlyph { ear, center: c, glyph: BoneGlyph::MaskedBracket, .. } => {
                // Spine on the outer side, arms reaching back toward the frequency line.
                let arm = match ear {
                    EarSide::Right => BC_BRACKET_ARM,
                    EarSide::Left => -BC_BRACKET_ARM,
                };
                let spine = c.x - arm / 2.0;
                let h = BC_BRACKET_HALF_HEIGHT;
                vec![Stroke::Path {
                    points: vec![
                        Point::new(spine + arm, c.y - h),
                        Point::new(spine, c.y - h),
                        Point::new(spine, c.y + h),
                        Point::new(spine + arm, c.y + h),
                    ],
                    closed: false,
                }]
            }
        }
    }

    /// Extent of the element's ink, stroke width included.
    pub fn bounds(&self) -> BoundingBox {
        let pad = self.stroke_width() / 2.0;
        self.strokes()
            .iter()
            .map(|stroke| match stroke {
                Stroke::Circle { center, radius } => BoundingBox::around(*center, radius + pad),
                Stroke::Path { points, .. } => points
                    .iter()
                    .map(|p| BoundingBox::around(*p, pad))
                    .reduce(BoundingBox::union)
                    .unwrap_or_else(|| BoundingBox::around(Point::new(0.0, 0.0), 0.0)),
            })
            .reduce(BoundingBox::union)
            .unwrap_or_else(|| BoundingBox::around(Point::new(0.0, 0.0), 0.0))
    }
}

/// A finished render: the background with every element painted on, and the
/// display list itself for vector export. Built once, never modified.
#[derive(Debug, Clone)]
pub struct RenderedScene {
    background: RgbaImage,
    canvas: RgbaImage,
    dpi: f64,
    elements: Vec<SceneElement>,
}

impl RenderedScene {
    pub(super) fn new(background: RgbaImage, canvas: RgbaImage, dpi: f64, elements: Vec<SceneElement>) -> Self {
        Self { background, canvas, dpi, elements }
    }

    /// The template as it was before any symbol was painted.
    pub fn background(&self) -> &RgbaImage {
        &self.background
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    pub fn elements(&self) -> &[SceneElement] {
        &self.elements
    }

    /// Tight extent of everything drawn, or `None` for an empty chart.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.elements.iter().map(SceneElement::bounds).reduce(BoundingBox::union)
    }
}
