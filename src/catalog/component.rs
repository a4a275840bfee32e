//! Component specifications for the per-empire catalog
//!
//! Every entry is immutable once unlocked: a tech level, per-hull
//! space/cost/power tables, and capability flags. Catalogs hold these in
//! ascending level order; "best" always means highest index that fits.

use serde::{Deserialize, Serialize};

use crate::core::types::HullSize;

/// Per-hull-size table of a scalar property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerHull(pub [f32; 4]);

impl PerHull {
    pub fn get(&self, hull: HullSize) -> f32 {
        self.0[hull.index()]
    }

    /// Same value for every hull tier
    pub fn uniform(value: f32) -> Self {
        Self([value; 4])
    }

    /// Base value scaled by the standard hull growth curve
    pub fn hull_scaled(base: f32) -> Self {
        Self([base, base * 3.0, base * 7.0, base * 16.0])
    }
}

/// Common interface over every installable component kind
pub trait Module {
    fn level(&self) -> u8;
    fn space(&self, hull: HullSize) -> f32;
    fn cost(&self, hull: HullSize) -> f32;
    fn power(&self, hull: HullSize) -> f32;
}

macro_rules! impl_module {
    ($($spec:ty),* $(,)?) => {$(
        impl Module for $spec {
            fn level(&self) -> u8 {
                self.level
            }
            fn space(&self, hull: HullSize) -> f32 {
                self.space.get(hull)
            }
            fn cost(&self, hull: HullSize) -> f32 {
                self.cost.get(hull)
            }
            fn power(&self, hull: HullSize) -> f32 {
                self.power.get(hull)
            }
        }
    )*};
}

/// Stardrive: sets warp (combat) speed for the whole design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSpec {
    pub name: String,
    pub level: u8,
    /// Combat speed granted by this drive
    pub warp: u8,
    pub space: PerHull,
    pub cost: PerHull,
    pub power: PerHull,
}

/// Battle computer: multiplies weapon damage by (1 + bonus * mark)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputerSpec {
    pub name: String,
    pub level: u8,
    pub mark: u8,
    pub space: PerHull,
    pub cost: PerHull,
    pub power: PerHull,
}

/// Armor plating variant flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorVariant {
    Standard,
    /// Double-layered plating; some races refuse the space it eats
    Reinforced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorSpec {
    pub name: String,
    pub level: u8,
    pub variant: ArmorVariant,
    /// Hull-point multiplier read by the tactical combat layer
    pub hp_factor: f32,
    pub space: PerHull,
    pub cost: PerHull,
    pub power: PerHull,
}

/// Deflector shield: absorbs this many points per incoming volley
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShieldSpec {
    pub name: String,
    pub level: u8,
    pub absorb: u8,
    pub space: PerHull,
    pub cost: PerHull,
    pub power: PerHull,
}

/// ECM jammer: degrades incoming missile accuracy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcmSpec {
    pub name: String,
    pub level: u8,
    pub jamming: u8,
    pub space: PerHull,
    pub cost: PerHull,
    pub power: PerHull,
}

/// Maneuver thrusters: add to the drive's combat speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManeuverSpec {
    pub name: String,
    pub level: u8,
    pub boost: u8,
    pub space: PerHull,
    pub cost: PerHull,
    pub power: PerHull,
}

/// Special system capability flags
///
/// A special grants exactly the capabilities flagged here; the design
/// engine only reads flags, never names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpecialFlags {
    pub cloaking: bool,
    pub teleporter: bool,
    /// Extra effective beam range granted (0 = none)
    pub range_bonus: u8,
    pub colony_pod: bool,
    pub scanner: bool,
    pub repulsor: bool,
    pub interdictor: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialSpec {
    pub name: String,
    pub level: u8,
    pub flags: SpecialFlags,
    pub space: PerHull,
    pub cost: PerHull,
    pub power: PerHull,
}

impl SpecialSpec {
    /// True if this special is worth pairing with a weapon battery
    /// (cloak, teleporter, or a range bonus of at least 2)
    pub fn pairs_with_weapons(&self) -> bool {
        self.flags.cloaking || self.flags.teleporter || self.flags.range_bonus >= 2
    }
}

impl_module!(
    EngineSpec,
    ComputerSpec,
    ArmorSpec,
    ShieldSpec,
    EcmSpec,
    ManeuverSpec,
    SpecialSpec,
);
