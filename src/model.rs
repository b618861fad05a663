//! Data model for audiogram measurements.
//!
//! These structures capture the clinical values a chart is drawn from.
//! They carry no pixel information; see [`crate::calibration`] for that.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// Frequencies and ears
// ═══════════════════════════════════════════════════════════════════════

/// Standard audiometric test frequency.
///
/// Ordering follows pitch, so iterating a `BTreeMap<Frequency, _>` walks the
/// chart from left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Frequency {
    Hz250,
    Hz500,
    Hz1000,
    Hz2000,
    Hz3000,
    Hz4000,
    Hz6000,
    Hz8000,
}

impl Frequency {
    /// Frequencies tested by air conduction, ascending.
    pub const AIR_CONDUCTION: [Frequency; 8] = [
        Frequency::Hz250,
        Frequency::Hz500,
        Frequency::Hz1000,
        Frequency::Hz2000,
        Frequency::Hz3000,
        Frequency::Hz4000,
        Frequency::Hz6000,
        Frequency::Hz8000,
    ];

    /// Frequencies tested by bone conduction, ascending. A subset of
    /// [`Frequency::AIR_CONDUCTION`].
    pub const BONE_CONDUCTION: [Frequency; 4] = [
        Frequency::Hz500,
        Frequency::Hz1000,
        Frequency::Hz2000,
        Frequency::Hz4000,
    ];

    pub fn hz(self) -> u32 {
        match self {
            Frequency::Hz250 => 250,
            Frequency::Hz500 => 500,
            Frequency::Hz1000 => 1000,
            Frequency::Hz2000 => 2000,
            Frequency::Hz3000 => 3000,
            Frequency::Hz4000 => 4000,
            Frequency::Hz6000 => 6000,
            Frequency::Hz8000 => 8000,
        }
    }

    pub fn is_bone_conduction(self) -> bool {
        Frequency::BONE_CONDUCTION.contains(&self)
    }
}

impl TryFrom<u32> for Frequency {
    type Error = String;

    fn try_from(hz: u32) -> Result<Self, Self::Error> {
        Frequency::AIR_CONDUCTION
            .into_iter()
            .find(|f| f.hz() == hz)
            .ok_or_else(|| format!("{hz} Hz is not a standard audiometric frequency"))
    }
}

impl From<Frequency> for u32 {
    fn from(f: Frequency) -> u32 {
        f.hz()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.hz())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarSide {
    Right,
    Left,
}

impl EarSide {
    pub const BOTH: [EarSide; 2] = [EarSide::Right, EarSide::Left];
}

impl fmt::Display for EarSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EarSide::Right => f.write_str("right"),
            EarSide::Left => f.write_str("left"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Levels
// ═══════════════════════════════════════════════════════════════════════

/// Lowest charted hearing level (dB HL).
pub const MIN_LEVEL_DB: i32 = -10;
/// Highest charted hearing level (dB HL).
pub const MAX_LEVEL_DB: i32 = 120;
/// Audiometer step size (dB).
pub const LEVEL_STEP_DB: i32 = 5;

/// A hearing threshold in dB HL, or the absence of one.
///
/// `Present(0)` is a normal, valid threshold and is never treated as absent.
/// Serialized as an integer or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<i32>", into = "Option<i32>")]
pub enum Level {
    Present(i32),
    #[default]
    Absent,
}

impl Level {
    pub fn db(self) -> Option<i32> {
        match self {
            Level::Present(db) => Some(db),
            Level::Absent => None,
        }
    }

    /// Whether `db` lies on the -10..=120 dB grid in 5 dB steps.
    pub fn is_on_grid(db: i32) -> bool {
        (MIN_LEVEL_DB..=MAX_LEVEL_DB).contains(&db) && (db - MIN_LEVEL_DB) % LEVEL_STEP_DB == 0
    }

    /// Every valid level, ascending.
    pub fn grid() -> impl Iterator<Item = i32> {
        (MIN_LEVEL_DB..=MAX_LEVEL_DB).step_by(LEVEL_STEP_DB as usize)
    }
}

impl From<Option<i32>> for Level {
    fn from(value: Option<i32>) -> Self {
        match value {
            Some(db) => Level::Present(db),
            None => Level::Absent,
        }
    }
}

impl From<Level> for Option<i32> {
    fn from(level: Level) -> Self {
        level.db()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Measurements
// ═══════════════════════════════════════════════════════════════════════

/// Air-conduction thresholds for one ear.
pub type AirConduction = BTreeMap<Frequency, Level>;

/// Bone-conduction thresholds for one ear.
pub type BoneConduction = BTreeMap<Frequency, BoneConductionEntry>;

/// Bone-conduction result at one frequency: the unmasked and masked runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoneConductionEntry {
    #[serde(default)]
    pub unmasked: Level,
    #[serde(default)]
    pub masked: Level,
}

impl BoneConductionEntry {
    pub fn unmasked(db: i32) -> Self {
        Self { unmasked: Level::Present(db), masked: Level::Absent }
    }

    pub fn masked(db: i32) -> Self {
        Self { unmasked: Level::Absent, masked: Level::Present(db) }
    }
}

/// Everything measured for one ear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EarMeasurements {
    #[serde(default)]
    pub air: AirConduction,
    #[serde(default)]
    pub bone: BoneConduction,
}

impl EarMeasurements {
    /// Present air-conduction points in ascending frequency order.
    pub fn present_air(&self) -> impl Iterator<Item = (Frequency, i32)> + '_ {
        self.air
            .iter()
            .filter_map(|(&f, level)| level.db().map(|db| (f, db)))
    }
}

/// A complete two-ear measurement set, as handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Audiogram {
    #[serde(default)]
    pub right: EarMeasurements,
    #[serde(default)]
    pub left: EarMeasurements,
}

impl Audiogram {
    pub fn ear(&self, side: EarSide) -> &EarMeasurements {
        match side {
            EarSide::Right => &self.right,
            EarSide::Left => &self.left,
        }
    }

    pub fn ear_mut(&mut self, side: EarSide) -> &mut EarMeasurements {
        match side {
            EarSide::Right => &mut self.right,
            EarSide::Left => &mut self.left,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Colours
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// How ears are distinguished by colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Right ear red, left ear blue.
    #[default]
    Dual,
    /// Both ears black.
    Monochrome,
}

impl ColorScheme {
    pub fn color_for(self, ear: EarSide) -> Color {
        match (self, ear) {
            (ColorScheme::Monochrome, _) => Color::BLACK,
            (ColorScheme::Dual, EarSide::Right) => Color::RED,
            (ColorScheme::Dual, EarSide::Left) => Color::BLUE,
        }
    }
}
