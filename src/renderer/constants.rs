//! Symbol dimensions for the chart renderer (all in template pixels at the
//! template's native resolution).

// ── Air conduction ──────────────────────────────────────────────────
pub(super) const AC_LINE_WIDTH: f64 = 1.3; // connecting line
pub(super) const AC_MARKER_STROKE: f64 = 1.6;
pub(super) const AC_CIRCLE_RADIUS: f64 = 5.3; // right ear "O"
pub(super) const AC_CROSS_HALF: f64 = 4.6; // left ear "X", half the arm span

// ── Bone conduction ─────────────────────────────────────────────────
pub(super) const BC_TRIANGLE_RADIUS: f64 = 6.0; // centre to vertex
pub(super) const BC_TRIANGLE_STROKE: f64 = 2.0;
pub(super) const BC_BRACKET_HALF_HEIGHT: f64 = 7.0;
pub(super) const BC_BRACKET_ARM: f64 = 4.0;
pub(super) const BC_BRACKET_STROKE: f64 = 1.6;

// ── Raster ──────────────────────────────────────────────────────────
pub(super) const MIN_RASTER_HALF_WIDTH: f64 = 0.5; // every stroke covers at least one pixel
