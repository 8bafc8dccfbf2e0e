//! Biome categories and their constant shaping/color definitions.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One of the twelve biome categories.
///
/// The discriminant indexes [`BIOME_TABLE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    TropicalJungle,
    TemperateForest,
    BorealTaiga,
    Grasslands,
    Savanna,
    Desert,
    Tundra,
    ArcticSnow,
    Mountains,
    VolcanicWasteland,
    Swampland,
    RockyBadlands,
}

/// Static description of a biome.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeDef {
    /// Human-readable name.
    pub name: &'static str,
    /// Stable snake_case key used in config files and on the command line.
    pub key: &'static str,
    /// Multiplier applied to the fBm height.
    pub height_multiplier: f64,
    /// Constant added after the multiplier, in world units.
    pub base_offset: f64,
    /// Values above `1.0` add high-frequency roughness noise.
    pub roughness: f64,
    /// Linear RGB tint, components in `[0, 1]`.
    pub tint: Vec3,
}

/// The constant biome table, indexed by `Biome as usize`.
pub static BIOME_TABLE: [BiomeDef; Biome::COUNT] = [
    BiomeDef {
        name: "Tropical Jungle",
        key: "tropical_jungle",
        height_multiplier: 1.5,
        base_offset: 0.0,
        roughness: 2.0,
        tint: Vec3::new(0.1, 0.6, 0.2),
    },
    BiomeDef {
        name: "Temperate Forest",
        key: "temperate_forest",
        height_multiplier: 1.2,
        base_offset: 0.0,
        roughness: 1.5,
        tint: Vec3::new(0.3, 0.7, 0.3),
    },
    BiomeDef {
        name: "Boreal Taiga",
        key: "boreal_taiga",
        height_multiplier: 1.0,
        base_offset: 0.0,
        roughness: 1.3,
        tint: Vec3::new(0.2, 0.5, 0.3),
    },
    BiomeDef {
        name: "Grasslands",
        key: "grasslands",
        height_multiplier: 0.5,
        base_offset: 0.0,
        roughness: 0.5,
        tint: Vec3::new(0.4, 0.8, 0.3),
    },
    BiomeDef {
        name: "Savanna",
        key: "savanna",
        height_multiplier: 0.8,
        base_offset: 0.0,
        roughness: 1.0,
        tint: Vec3::new(0.7, 0.7, 0.3),
    },
    BiomeDef {
        name: "Desert",
        key: "desert",
        height_multiplier: 1.2,
        base_offset: 0.0,
        roughness: 1.8,
        tint: Vec3::new(0.9, 0.8, 0.5),
    },
    BiomeDef {
        name: "Tundra",
        key: "tundra",
        height_multiplier: 0.6,
        base_offset: 0.0,
        roughness: 0.8,
        tint: Vec3::new(0.6, 0.7, 0.7),
    },
    BiomeDef {
        name: "Arctic Snow",
        key: "arctic_snow",
        height_multiplier: 1.5,
        base_offset: 50.0,
        roughness: 2.0,
        tint: Vec3::new(0.9, 0.95, 1.0),
    },
    BiomeDef {
        name: "Mountains",
        key: "mountains",
        height_multiplier: 3.0,
        base_offset: 100.0,
        roughness: 3.0,
        tint: Vec3::new(0.5, 0.5, 0.5),
    },
    BiomeDef {
        name: "Volcanic Wasteland",
        key: "volcanic_wasteland",
        height_multiplier: 2.5,
        base_offset: 20.0,
        roughness: 2.5,
        tint: Vec3::new(0.4, 0.2, 0.1),
    },
    BiomeDef {
        name: "Swampland",
        key: "swampland",
        height_multiplier: 0.4,
        base_offset: -20.0,
        roughness: 1.2,
        tint: Vec3::new(0.3, 0.4, 0.3),
    },
    BiomeDef {
        name: "Rocky Badlands",
        key: "rocky_badlands",
        height_multiplier: 2.0,
        base_offset: 30.0,
        roughness: 2.2,
        tint: Vec3::new(0.6, 0.4, 0.3),
    },
];

impl Biome {
    /// Number of biome categories.
    pub const COUNT: usize = 12;

    /// Every biome, in table order.
    pub const ALL: [Biome; Biome::COUNT] = [
        Biome::TropicalJungle,
        Biome::TemperateForest,
        Biome::BorealTaiga,
        Biome::Grasslands,
        Biome::Savanna,
        Biome::Desert,
        Biome::Tundra,
        Biome::ArcticSnow,
        Biome::Mountains,
        Biome::VolcanicWasteland,
        Biome::Swampland,
        Biome::RockyBadlands,
    ];

    /// The constant definition for this biome.
    #[inline]
    pub fn def(self) -> &'static BiomeDef {
        &BIOME_TABLE[self as usize]
    }

    /// Human-readable name, e.g. `"Rocky Badlands"`.
    pub fn name(self) -> &'static str {
        self.def().name
    }

    /// Stable snake_case key, e.g. `"rocky_badlands"`.
    pub fn key(self) -> &'static str {
        self.def().key
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no biome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown biome: {0}")]
pub struct ParseBiomeError(pub String);

impl FromStr for Biome {
    type Err = ParseBiomeError;

    /// Accepts the snake_case key or the display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Biome::ALL
            .into_iter()
            .find(|b| b.key().eq_ignore_ascii_case(wanted) || b.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseBiomeError(s.to_string()))
    }
}
