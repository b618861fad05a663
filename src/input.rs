//! Editing-layer helpers.
//!
//! Nothing here is used by the renderer; it only ever sees the final
//! [`BoneConduction`] maps produced from this state.

use std::collections::BTreeMap;

use crate::error::{LookupMiss, Result};
use crate::model::{BoneConduction, BoneConductionEntry, EarSide, Frequency, Level};

/// Starting default for every unmasked bone-conduction field.
pub const DEFAULT_UNMASKED_DB: i32 = 10;

/// Cross-ear defaults for unmasked bone conduction.
///
/// Unmasked bone conduction is often identical for both ears, so the value
/// last typed for either ear at a frequency becomes the proposed value for
/// the other ear. An ear that has been edited at a frequency keeps its own
/// value from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedUnmaskedDefaults {
    shared: BTreeMap<Frequency, i32>,
    explicit: BTreeMap<(EarSide, Frequency), i32>,
}

impl Default for SharedUnmaskedDefaults {
    fn default() -> Self {
        Self {
            shared: Frequency::BONE_CONDUCTION
                .into_iter()
                .map(|f| (f, DEFAULT_UNMASKED_DB))
                .collect(),
            explicit: BTreeMap::new(),
        }
    }
}

impl SharedUnmaskedDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edit of `ear`'s unmasked value at `frequency` and propagate
    /// it as the shared default. Off-grid levels are rejected and leave the
    /// store untouched.
    pub fn edit(&mut self, ear: EarSide, frequency: Frequency, db: i32) -> Result<()> {
        if !Level::is_on_grid(db) {
            return Err(LookupMiss::Level(db).into());
        }
        self.explicit.insert((ear, frequency), db);
        self.shared.insert(frequency, db);
        Ok(())
    }

    /// Forget `ear`'s own value so it follows the shared default again.
    pub fn reset(&mut self, ear: EarSide, frequency: Frequency) {
        self.explicit.remove(&(ear, frequency));
    }

    /// Value to show in `ear`'s field at `frequency`.
    pub fn value_for(&self, ear: EarSide, frequency: Frequency) -> Option<i32> {
        self.explicit
            .get(&(ear, frequency))
            .or_else(|| self.shared.get(&frequency))
            .copied()
    }

    /// Unmasked entries for every bone-conduction frequency of `ear`, merged
    /// with the masked levels the caller collected separately.
    pub fn bone_conduction(&self, ear: EarSide, masked: &BTreeMap<Frequency, Level>) -> BoneConduction {
        Frequency::BONE_CONDUCTION
            .into_iter()
            .map(|f| {
                let entry = BoneConductionEntry {
                    unmasked: self.value_for(ear, f).into(),
                    masked: masked.get(&f).copied().unwrap_or_default(),
                };
                (f, entry)
            })
            .collect()
    }
}
