//! Per-cell material classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Surface material of one terrain patch. Serializes as its texture name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialTag {
    Water,
    Sand,
    Grass,
    Dirt,
    Stone,
    Snow,
}

impl MaterialTag {
    /// Every tag, in declaration order.
    pub const ALL: [MaterialTag; 6] = [
        MaterialTag::Water,
        MaterialTag::Sand,
        MaterialTag::Grass,
        MaterialTag::Dirt,
        MaterialTag::Stone,
        MaterialTag::Snow,
    ];

    /// Name of the texture resource the renderer binds for this tag.
    pub fn texture_name(self) -> &'static str {
        match self {
            MaterialTag::Water => "water",
            MaterialTag::Sand => "sand",
            MaterialTag::Grass => "grass",
            MaterialTag::Dirt => "dirt",
            MaterialTag::Stone => "stone",
            MaterialTag::Snow => "snow",
        }
    }

    /// Dense index in `0..6`, matching [`MaterialTag::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MaterialTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.texture_name())
    }
}

/// Classify a cell from its four corner heights. First matching rule wins:
///
/// 1. `max == 0` → water
/// 2. `max <= 1` → sand
/// 3. `max - min <= 2 && max <= 5` → grass
/// 4. `max - min <= 1 && max <= 6` → dirt
/// 5. `max - min > max - 6 && max <= 8` → stone
/// 6. otherwise snow
///
/// Rule 5 is kept in this literal form even though it reduces to `min < 6`.
pub fn classify(corners: [f64; 4]) -> MaterialTag {
    let min = corners.iter().copied().fold(f64::INFINITY, f64::min);
    let max = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if max == 0.0 {
        MaterialTag::Water
    } else if max <= 1.0 {
        MaterialTag::Sand
    } else if range <= 2.0 && max <= 5.0 {
        MaterialTag::Grass
    } else if range <= 1.0 && max <= 6.0 {
        MaterialTag::Dirt
    } else if range > max - 6.0 && max <= 8.0 {
        MaterialTag::Stone
    } else {
        MaterialTag::Snow
    }
}
