//! Per-empire component catalog
//!
//! Lists are ordered ascending by tech level. Index 0 of the computer,
//! armor, shield, ECM, and maneuver lists is a zero-space baseline entry,
//! so an unfitted slot is a real no-op module rather than a hole.
//!
//! The fitting scans walk each list from the highest index down and take
//! the first entry that fits, with the hull passed explicitly as the
//! comparison context.

use serde::{Deserialize, Serialize};

use crate::core::types::HullSize;

use super::component::{
    ArmorSpec, ArmorVariant, ComputerSpec, EcmSpec, EngineSpec, ManeuverSpec, Module, PerHull,
    ShieldSpec, SpecialFlags, SpecialSpec,
};
use super::weapon::{WeaponCategory, WeaponSpec};

/// Summary of a tech tree, used to build enemy combat profiles
///
/// Rival snapshots arrive from the diplomacy collaborator; an empire's own
/// snapshot pads the rival list when fewer than the assessed count are
/// known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TechSnapshot {
    pub shield_level: u8,
    pub planet_shield_level: u8,
    pub has_repulsor: bool,
    pub has_interdictor: bool,
}

/// Ordered lists of every unlocked component, one catalog per empire
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentCatalog {
    pub engines: Vec<EngineSpec>,
    pub computers: Vec<ComputerSpec>,
    pub armors: Vec<ArmorSpec>,
    pub shields: Vec<ShieldSpec>,
    pub ecm: Vec<EcmSpec>,
    pub maneuvers: Vec<ManeuverSpec>,
    pub specials: Vec<SpecialSpec>,
    pub weapons: Vec<WeaponSpec>,
}

/// Scan a list from the highest tech level down and return the index of
/// the first entry whose space fits within `budget` on this hull
pub fn best_fitting<M: Module>(entries: &[M], hull: HullSize, budget: f32) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .rev()
        .find(|(_, m)| m.space(hull) <= budget)
        .map(|(i, _)| i)
}

impl ComponentCatalog {
    /// Index of the fastest unlocked drive (always the last entry)
    pub fn fastest_engine(&self) -> usize {
        debug_assert!(!self.engines.is_empty(), "catalog must hold at least one drive");
        self.engines.len() - 1
    }

    /// Best deflector class this tech tree can field on a ship
    pub fn best_shield_level(&self) -> u8 {
        self.shields.iter().map(|s| s.absorb).max().unwrap_or(0)
    }

    pub fn has_special(&self, pred: impl Fn(&SpecialFlags) -> bool) -> bool {
        self.specials.iter().any(|s| pred(&s.flags))
    }

    /// Summarize this tech tree for target assessment
    ///
    /// Ground installations mount doubled deflector banks, so the colony
    /// shield level is twice the ship class.
    pub fn snapshot(&self) -> TechSnapshot {
        let shield_level = self.best_shield_level();
        TechSnapshot {
            shield_level,
            planet_shield_level: shield_level.saturating_mul(2),
            has_repulsor: self.has_special(|f| f.repulsor),
            has_interdictor: self.has_special(|f| f.interdictor),
        }
    }

    /// Check catalog invariants: ascending levels, zero-space baselines
    pub fn validate(&self) -> Result<(), String> {
        if self.engines.is_empty() {
            return Err("engine list is empty".into());
        }

        fn ascending<M: Module>(name: &str, entries: &[M]) -> Result<(), String> {
            for pair in entries.windows(2) {
                if pair[1].level() < pair[0].level() {
                    return Err(format!("{} list is not ordered by level", name));
                }
            }
            Ok(())
        }

        ascending("engine", &self.engines)?;
        ascending("computer", &self.computers)?;
        ascending("armor", &self.armors)?;
        ascending("shield", &self.shields)?;
        ascending("ecm", &self.ecm)?;
        ascending("maneuver", &self.maneuvers)?;
        ascending("special", &self.specials)?;
        ascending("weapon", &self.weapons)?;

        for (name, space) in [
            ("computer", self.computers.first().map(|m| m.space)),
            ("shield", self.shields.first().map(|m| m.space)),
            ("ecm", self.ecm.first().map(|m| m.space)),
            ("maneuver", self.maneuvers.first().map(|m| m.space)),
        ] {
            match space {
                Some(s) if s.0.iter().all(|v| *v == 0.0) => {}
                Some(_) => return Err(format!("{} baseline entry must take no space", name)),
                None => return Err(format!("{} list is missing its baseline entry", name)),
            }
        }

        Ok(())
    }

    /// Full catalog with every component unlocked
    pub fn with_defaults() -> Self {
        Self::with_era(u8::MAX)
    }

    /// Catalog restricted to components of `max_level` or below
    ///
    /// Baseline entries are level 0 and always survive, so a higher-era
    /// catalog is a strict superset of a lower-era one.
    pub fn with_era(max_level: u8) -> Self {
        let mut catalog = master_catalog();
        catalog.engines.retain(|e| e.level <= max_level);
        catalog.computers.retain(|e| e.level <= max_level);
        catalog.armors.retain(|e| e.level <= max_level);
        catalog.shields.retain(|e| e.level <= max_level);
        catalog.ecm.retain(|e| e.level <= max_level);
        catalog.maneuvers.retain(|e| e.level <= max_level);
        catalog.specials.retain(|e| e.level <= max_level);
        catalog.weapons.retain(|e| e.level <= max_level);
        if catalog.engines.is_empty() {
            // The era-1 drive is the floor; no empire flies without one
            catalog.engines.push(engine("Chemical Drive", 1, 1));
        }
        catalog
    }
}

// Component bays are standardized per category: a newer drive or
// deflector is denser, not bigger, so space tables stay flat along a
// tech line while cost climbs with level.

fn engine(name: &str, level: u8, warp: u8) -> EngineSpec {
    let price = 1.0 + f32::from(warp) * 0.6;
    EngineSpec {
        name: name.into(),
        level,
        warp,
        space: PerHull([6.0, 25.0, 60.0, 140.0]),
        cost: PerHull([5.0 * price, 20.0 * price, 50.0 * price, 115.0 * price]),
        power: PerHull([2.0, 8.0, 20.0, 45.0]),
    }
}

fn computer(name: &str, level: u8, mark: u8) -> ComputerSpec {
    let price = 1.0 + f32::from(mark) * 0.5;
    let space = if mark == 0 {
        PerHull::uniform(0.0)
    } else {
        PerHull([2.0, 6.0, 18.0, 40.0])
    };
    ComputerSpec {
        name: name.into(),
        level,
        mark,
        space,
        cost: PerHull([2.0 * price, 8.0 * price, 24.0 * price, 60.0 * price]),
        power: PerHull([1.0, 2.0, 5.0, 10.0]),
    }
}

fn armor(name: &str, level: u8, variant: ArmorVariant, hp_factor: f32) -> ArmorSpec {
    let space = if level == 0 {
        PerHull::uniform(0.0)
    } else {
        match variant {
            ArmorVariant::Standard => PerHull([2.0, 8.0, 20.0, 50.0]),
            ArmorVariant::Reinforced => PerHull([6.0, 24.0, 60.0, 150.0]),
        }
    };
    let price = 1.0 + f32::from(level) * 0.15;
    ArmorSpec {
        name: name.into(),
        level,
        variant,
        hp_factor,
        space,
        cost: PerHull([3.0 * price, 12.0 * price, 30.0 * price, 75.0 * price]),
        power: PerHull::uniform(0.0),
    }
}

fn shield(name: &str, level: u8, absorb: u8) -> ShieldSpec {
    let price = 1.0 + f32::from(absorb) * 0.25;
    let space = if absorb == 0 {
        PerHull::uniform(0.0)
    } else {
        PerHull([3.0, 12.0, 35.0, 90.0])
    };
    ShieldSpec {
        name: name.into(),
        level,
        absorb,
        space,
        cost: PerHull([5.0 * price, 20.0 * price, 60.0 * price, 150.0 * price]),
        power: PerHull([2.0, 5.0, 12.0, 30.0]),
    }
}

fn ecm(name: &str, level: u8, jamming: u8) -> EcmSpec {
    let price = 1.0 + f32::from(jamming) * 0.25;
    let space = if jamming == 0 {
        PerHull::uniform(0.0)
    } else {
        PerHull([2.0, 8.0, 20.0, 50.0])
    };
    EcmSpec {
        name: name.into(),
        level,
        jamming,
        space,
        cost: PerHull([3.0 * price, 12.0 * price, 30.0 * price, 75.0 * price]),
        power: PerHull([1.0, 3.0, 8.0, 18.0]),
    }
}

fn maneuver(name: &str, level: u8, boost: u8) -> ManeuverSpec {
    let price = 1.0 + f32::from(boost) * 0.4;
    let space = if boost == 0 {
        PerHull::uniform(0.0)
    } else {
        PerHull([2.0, 8.0, 25.0, 60.0])
    };
    ManeuverSpec {
        name: name.into(),
        level,
        boost,
        space,
        cost: PerHull([2.0 * price, 8.0 * price, 25.0 * price, 60.0 * price]),
        power: PerHull([1.0, 4.0, 10.0, 24.0]),
    }
}

fn special(name: &str, level: u8, flags: SpecialFlags, space: PerHull) -> SpecialSpec {
    SpecialSpec {
        name: name.into(),
        level,
        flags,
        cost: space,
        power: PerHull([1.0, 2.0, 5.0, 10.0]),
        space,
    }
}

#[allow(clippy::too_many_arguments)]
fn weapon(
    name: &str,
    level: u8,
    category: WeaponCategory,
    dmg: (u32, u32),
    range: u8,
    shots: Option<u8>,
    bulk: f32,
) -> WeaponSpec {
    WeaponSpec {
        name: name.into(),
        level,
        category,
        dmg_lo: dmg.0,
        dmg_hi: dmg.1,
        range,
        shots,
        turns_to_fire: 1,
        bio: false,
        ground_only: false,
        space: PerHull::uniform(bulk),
        cost: PerHull::uniform(bulk * 1.2),
        power: PerHull::uniform(bulk * 0.3),
    }
}

fn bomb(name: &str, level: u8, dmg: (u32, u32), bio: bool, bulk: f32) -> WeaponSpec {
    let mut w = weapon(name, level, WeaponCategory::Missile, dmg, 1, Some(10), bulk);
    w.bio = bio;
    w.ground_only = true;
    w
}

/// The complete component roster, shared by fixtures, the demo binary,
/// and the benches
fn master_catalog() -> ComponentCatalog {
    use WeaponCategory::{Beam, Missile, Streaming};

    let flags = SpecialFlags::default;

    ComponentCatalog {
        engines: vec![
            engine("Chemical Drive", 1, 1),
            engine("Ion Drive", 6, 2),
            engine("Nuclear Pulse Drive", 12, 3),
            engine("Fusion Torch", 18, 4),
            engine("Antimatter Drive", 24, 5),
            engine("Graviton Drive", 30, 6),
            engine("Hyper Drive", 36, 7),
            engine("Singularity Drive", 42, 8),
        ],
        computers: vec![
            computer("Manual Targeting", 0, 0),
            computer("Targeting Relay I", 5, 1),
            computer("Targeting Relay II", 10, 2),
            computer("Battle Matrix III", 15, 3),
            computer("Battle Matrix IV", 20, 4),
            computer("Oracle Core V", 25, 5),
            computer("Oracle Core VI", 30, 6),
            computer("Precog Array VII", 35, 7),
            computer("Precog Array VIII", 40, 8),
        ],
        armors: vec![
            armor("Titanium Hull", 0, ArmorVariant::Standard, 1.0),
            armor("Duralloy Plate", 8, ArmorVariant::Standard, 1.5),
            armor("Duralloy Lattice", 8, ArmorVariant::Reinforced, 2.25),
            armor("Zortrium Plate", 16, ArmorVariant::Standard, 2.0),
            armor("Zortrium Lattice", 16, ArmorVariant::Reinforced, 3.0),
            armor("Andrium Plate", 26, ArmorVariant::Standard, 2.5),
            armor("Andrium Lattice", 26, ArmorVariant::Reinforced, 3.75),
            armor("Neutronium Plate", 38, ArmorVariant::Standard, 3.0),
            armor("Neutronium Lattice", 38, ArmorVariant::Reinforced, 4.5),
        ],
        shields: vec![
            shield("No Deflectors", 0, 0),
            shield("Deflector Class I", 4, 1),
            shield("Deflector Class II", 9, 2),
            shield("Deflector Class III", 14, 3),
            shield("Deflector Class IV", 19, 4),
            shield("Deflector Class V", 23, 5),
            shield("Barrier Class VI", 28, 6),
            shield("Barrier Class VII", 32, 7),
            shield("Aegis Class IX", 41, 9),
        ],
        ecm: vec![
            ecm("No Jammer", 0, 0),
            ecm("Scrambler I", 6, 1),
            ecm("Scrambler II", 11, 2),
            ecm("Scrambler III", 17, 3),
            ecm("Ghostfield IV", 22, 4),
            ecm("Ghostfield V", 27, 5),
            ecm("Ghostfield VI", 33, 6),
            ecm("Mirage Web VII", 39, 7),
        ],
        maneuvers: vec![
            maneuver("Standard Thrusters", 0, 0),
            maneuver("Vector Thrusters", 4, 1),
            maneuver("Gyro Array", 11, 2),
            maneuver("Inertial Dampers", 18, 3),
            maneuver("Inertial Nullifier", 25, 4),
            maneuver("Phase Skidders", 32, 5),
            maneuver("Null Inertia Core", 39, 6),
        ],
        specials: vec![
            special(
                "Colony Pod",
                1,
                SpecialFlags { colony_pod: true, ..flags() },
                PerHull::uniform(150.0),
            ),
            special(
                "Deep Scanner",
                4,
                SpecialFlags { scanner: true, ..flags() },
                PerHull::uniform(8.0),
            ),
            special(
                "Beam Focuser",
                18,
                SpecialFlags { range_bonus: 2, ..flags() },
                PerHull([8.0, 20.0, 50.0, 110.0]),
            ),
            special(
                "Battle Cloak",
                22,
                SpecialFlags { cloaking: true, ..flags() },
                PerHull([8.0, 20.0, 50.0, 110.0]),
            ),
            special(
                "Repulsor Field",
                28,
                SpecialFlags { repulsor: true, ..flags() },
                PerHull([8.0, 20.0, 50.0, 110.0]),
            ),
            special(
                "Warp Interdictor",
                31,
                SpecialFlags { interdictor: true, ..flags() },
                PerHull([8.0, 20.0, 50.0, 110.0]),
            ),
            special(
                "Wave Projector",
                33,
                SpecialFlags { range_bonus: 3, ..flags() },
                PerHull([8.0, 20.0, 50.0, 110.0]),
            ),
            special(
                "Phase Teleporter",
                34,
                SpecialFlags { teleporter: true, ..flags() },
                PerHull([8.0, 20.0, 50.0, 110.0]),
            ),
        ],
        weapons: vec![
            weapon("Laser Cannon", 1, Beam, (1, 4), 1, None, 10.0),
            bomb("Fission Bomb", 2, (3, 12), false, 10.0),
            weapon("Nuke Rack", 3, Missile, (4, 10), 4, Some(5), 18.0),
            weapon("Fusion Beam", 8, Beam, (2, 6), 1, None, 12.0),
            bomb("Spore Pod", 10, (2, 8), true, 8.0),
            weapon("Ion Pulse", 14, Beam, (3, 8), 1, None, 13.0),
            weapon("Merculite Rack", 16, Missile, (6, 15), 5, Some(5), 22.0),
            bomb("Anti-Matter Bomb", 19, (6, 24), false, 14.0),
            weapon("Graviton Lance", 20, Beam, (4, 12), 2, None, 16.0),
            weapon("Plasma Stream", 24, Streaming, (6, 18), 1, None, 24.0),
            weapon("Phasor Array", 27, Beam, (5, 16), 2, None, 18.0),
            weapon("Pulson Rack", 29, Missile, (10, 24), 6, Some(5), 28.0),
            weapon("Disruptor Cannon", 35, Beam, (8, 24), 2, None, 22.0),
            bomb("Omega Bomb", 37, (10, 40), false, 20.0),
            weapon("Tachyon Stream", 38, Streaming, (10, 28), 1, None, 30.0),
            weapon("Zeon Rack", 40, Missile, (15, 35), 7, Some(5), 34.0),
            weapon("Stellar Converter", 44, Beam, (12, 40), 3, None, 35.0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_validates() {
        assert!(ComponentCatalog::with_defaults().validate().is_ok());
    }

    #[test]
    fn test_era_catalogs_validate() {
        for era in [1, 5, 10, 20, 30, 45] {
            let catalog = ComponentCatalog::with_era(era);
            assert!(catalog.validate().is_ok(), "era {} catalog invalid", era);
        }
    }

    #[test]
    fn test_era_filters_levels() {
        let catalog = ComponentCatalog::with_era(10);
        assert!(catalog.weapons.iter().all(|w| w.level <= 10));
        assert!(catalog.engines.iter().all(|e| e.level <= 10));
        // Baselines survive any era
        assert_eq!(catalog.computers[0].mark, 0);
        assert_eq!(catalog.shields[0].absorb, 0);
    }

    #[test]
    fn test_higher_era_is_superset() {
        let low = ComponentCatalog::with_era(10);
        let high = ComponentCatalog::with_era(30);
        assert!(high.weapons.len() > low.weapons.len());
        assert_eq!(&high.weapons[..low.weapons.len()], &low.weapons[..]);
        assert_eq!(&high.engines[..low.engines.len()], &low.engines[..]);
    }

    #[test]
    fn test_fastest_engine_is_last() {
        let catalog = ComponentCatalog::with_defaults();
        let idx = catalog.fastest_engine();
        let top_warp = catalog.engines.iter().map(|e| e.warp).max().unwrap();
        assert_eq!(catalog.engines[idx].warp, top_warp);
    }

    #[test]
    fn test_best_fitting_scans_top_down() {
        let catalog = ComponentCatalog::with_defaults();
        // A huge budget lands on the last entry
        let idx = best_fitting(&catalog.shields, HullSize::Large, 1.0e9).unwrap();
        assert_eq!(idx, catalog.shields.len() - 1);

        // A zero budget still fits the zero-space baseline
        let idx = best_fitting(&catalog.shields, HullSize::Large, 0.0).unwrap();
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_snapshot_reads_capabilities() {
        let full = ComponentCatalog::with_defaults().snapshot();
        assert!(full.has_repulsor);
        assert!(full.has_interdictor);
        assert!(full.shield_level >= 9);
        assert_eq!(full.planet_shield_level, full.shield_level * 2);

        let early = ComponentCatalog::with_era(10).snapshot();
        assert!(!early.has_repulsor);
        assert_eq!(early.shield_level, 2);
    }
}
