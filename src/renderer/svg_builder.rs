//! SVG builder — accumulates SVG elements and produces the final string.

use super::scene::{BoundingBox, Point, SceneElement, Stroke};

// ═══════════════════════════════════════════════════════════════════════
// SvgBuilder
// ═══════════════════════════════════════════════════════════════════════

pub(super) struct SvgBuilder {
    pub(super) elements: Vec<String>,
    view: BoundingBox,
    dpi: f64,
}

impl SvgBuilder {
    /// `view` is in template pixels; the document's physical size is that
    /// extent at `dpi`, so it prints at the same scale as the raster export.
    pub(super) fn new(view: BoundingBox, dpi: f64) -> Self {
        Self {
            elements: Vec::new(),
            view,
            dpi,
        }
    }

    pub(super) fn build(self) -> String {
        let v = self.view;
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.1} {:.1} {:.1} {:.1}" width="{:.4}in" height="{:.4}in">"#,
            v.min_x,
            v.min_y,
            v.width(),
            v.height(),
            v.width() / self.dpi,
            v.height() / self.dpi
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    /// Place a base64 PNG over the whole template, origin at (0, 0).
    pub(super) fn background(&mut self, png_base64: &str, width: u32, height: u32) {
        self.elements.push(format!(
            r#"<image class="template" x="0" y="0" width="{}" height="{}" preserveAspectRatio="none" href="data:image/png;base64,{}"/>"#,
            width, height, png_base64
        ));
    }

    pub(super) fn element(&mut self, element: &SceneElement) {
        let class = element.class();
        let color = element.color().hex();
        let width = element.stroke_width();
        let strokes = element.strokes();
        if strokes.len() == 1 {
            self.stroke(&strokes[0], &class, &color, width);
            return;
        }
        self.elements.push(format!(r#"<g class="{}">"#, class));
        for stroke in &strokes {
            self.stroke(stroke, "", &color, width);
        }
        self.elements.push("</g>".to_string());
    }

    fn stroke(&mut self, stroke: &Stroke, class: &str, color: &str, width: f64) {
        let class_attr = if class.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, class)
        };
        match stroke {
            Stroke::Circle { center, radius } => self.elements.push(format!(
                r#"<circle{} cx="{:.2}" cy="{:.2}" r="{:.2}" fill="none" stroke="{}" stroke-width="{:.2}"/>"#,
                class_attr, center.x, center.y, radius, color, width
            )),
            Stroke::Path { points, closed } => {
                let tag = if *closed { "polygon" } else { "polyline" };
                self.elements.push(format!(
                    r#"<{}{} points="{}" fill="none" stroke="{}" stroke-width="{:.2}" stroke-linejoin="round" stroke-linecap="round"/>"#,
                    tag,
                    class_attr,
                    points_attr(points),
                    color,
                    width
                ));
            }
        }
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

// ═══════════════════════════════════════════════════════════════════════
// Empty SVG fallback
// ═══════════════════════════════════════════════════════════════════════

pub(super) fn empty_svg(message: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 400 100\">\
         <text x=\"200\" y=\"50\" text-anchor=\"middle\" font-size=\"14\" fill=\"gray\">{}</text>\
         </svg>",
        message
    )
}
