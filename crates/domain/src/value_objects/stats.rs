//! StatBlock - the optional six-ability stat block carried by a character.
//!
//! Every value is clamped to the playable range on the way in, so a
//! `StatBlock` read back out of the model is always valid.

use serde::{Deserialize, Serialize};

/// Inclusive bounds for every stat and for level.
pub const STAT_MIN: i32 = 1;
pub const STAT_MAX: i32 = 20;

fn clamp(value: i32) -> i32 {
    value.clamp(STAT_MIN, STAT_MAX)
}

/// Character ability scores plus level.
///
/// Defaults to 10 in every ability and level 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub level: i32,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
            level: 1,
        }
    }
}

impl StatBlock {
    /// Build a stat block from raw form input, clamping each value into
    /// `[STAT_MIN, STAT_MAX]`.
    pub fn from_raw(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
        level: i32,
    ) -> Self {
        Self {
            strength: clamp(strength),
            dexterity: clamp(dexterity),
            constitution: clamp(constitution),
            intelligence: clamp(intelligence),
            wisdom: clamp(wisdom),
            charisma: clamp(charisma),
            level: clamp(level),
        }
    }

    /// Re-apply clamping after deserializing from an untrusted source.
    pub fn clamped(self) -> Self {
        Self::from_raw(
            self.strength,
            self.dexterity,
            self.constitution,
            self.intelligence,
            self.wisdom,
            self.charisma,
            self.level,
        )
    }
}
