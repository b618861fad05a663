//! Bone-conduction resolution: which of the masked/unmasked thresholds is
//! charted at a frequency, and with which symbol.

use crate::model::{BoneConductionEntry, EarSide, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoneGlyph {
    /// Masked threshold: a bracket set beside the frequency line, `[` to the
    /// left of it for the right ear, `]` to the right of it for the left ear.
    MaskedBracket,
    /// Unmasked threshold: an open triangle centred on the frequency line.
    UnmaskedTriangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBone {
    pub level: i32,
    pub glyph: BoneGlyph,
}

/// Pick the displayed bone-conduction value.
///
/// A present masked threshold always wins, including 0 dB. Otherwise the
/// unmasked threshold is shown. With neither, nothing is drawn.
pub fn resolve_bone(entry: &BoneConductionEntry) -> Option<ResolvedBone> {
    match (entry.masked, entry.unmasked) {
        (Level::Present(level), _) => Some(ResolvedBone { level, glyph: BoneGlyph::MaskedBracket }),
        (Level::Absent, Level::Present(level)) => {
            Some(ResolvedBone { level, glyph: BoneGlyph::UnmaskedTriangle })
        }
        (Level::Absent, Level::Absent) => None,
    }
}

/// Signed horizontal offset of a glyph from its frequency line.
pub fn glyph_offset(glyph: BoneGlyph, ear: EarSide, magnitude: f64) -> f64 {
    match (glyph, ear) {
        (BoneGlyph::UnmaskedTriangle, _) => 0.0,
        (BoneGlyph::MaskedBracket, EarSide::Right) => -magnitude,
        (BoneGlyph::MaskedBracket, EarSide::Left) => magnitude,
    }
}
