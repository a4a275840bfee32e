//! Race design-modifier vectors
//!
//! Each race carries a read-only vector of shipyard tunables: hull cost
//! multipliers, the module/weapon space split, base pool weights, and
//! doctrine flags. The design engine never mutates these.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::HullSize;

/// Playable and NPC races
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Terran,
    Vakkar,
    Sythid,
    Aurelian,
    Quellix,
}

impl Race {
    pub const ALL: [Race; 5] = [
        Race::Terran,
        Race::Vakkar,
        Race::Sythid,
        Race::Aurelian,
        Race::Quellix,
    ];

    /// Design-modifier vector for this race
    pub fn design_weights(self) -> RaceDesignWeights {
        match self {
            Race::Terran => RaceDesignWeights::terran(),
            Race::Vakkar => RaceDesignWeights::vakkar(),
            Race::Sythid => RaceDesignWeights::sythid(),
            Race::Aurelian => RaceDesignWeights::aurelian(),
            Race::Quellix => RaceDesignWeights::quellix(),
        }
    }
}

/// Base space-pool weights per module category
///
/// Role profiles add deltas on top of these before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolWeights {
    pub shield: u32,
    pub ecm: u32,
    pub maneuver: u32,
    pub armor: u32,
    pub specials: u32,
}

impl PoolWeights {
    /// Order: shield, ECM, maneuver, armor, specials
    pub fn as_array(self) -> [u32; 5] {
        [self.shield, self.ecm, self.maneuver, self.armor, self.specials]
    }
}

/// Per-race shipyard tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceDesignWeights {
    /// Hull cost multiplier per size tier
    pub cost_mult: [f32; 4],
    /// Fraction of hull space reserved for defensive modules and specials;
    /// the remainder goes to weapons
    pub module_space_ratio: f32,
    /// Base pool weights, before role deltas
    pub pool_weights: PoolWeights,
    /// Will the race's yards fit reinforced armor lattices
    pub reinforced_armor: bool,
    /// Accept maneuver swaps that leave combat speed unchanged
    pub same_speed_maneuver: bool,
    /// Doctrine permits biological bombardment
    pub bio_weapons: bool,
}

impl RaceDesignWeights {
    /// Baseline: balanced pools, standard costs
    pub fn terran() -> Self {
        Self {
            cost_mult: [1.0, 1.0, 1.0, 1.0],
            module_space_ratio: 0.5,
            pool_weights: PoolWeights { shield: 2, ecm: 2, maneuver: 2, armor: 2, specials: 1 },
            reinforced_armor: true,
            same_speed_maneuver: false,
            bio_weapons: false,
        }
    }

    /// War-forged: heavy armor doctrine, cheap big hulls
    pub fn vakkar() -> Self {
        Self {
            cost_mult: [1.1, 1.0, 0.9, 0.85],
            module_space_ratio: 0.55,
            pool_weights: PoolWeights { shield: 2, ecm: 1, maneuver: 1, armor: 4, specials: 1 },
            reinforced_armor: true,
            same_speed_maneuver: false,
            bio_weapons: false,
        }
    }

    /// Hive broods: biological weapons, disposable light hulls
    pub fn sythid() -> Self {
        Self {
            cost_mult: [0.8, 0.9, 1.1, 1.25],
            module_space_ratio: 0.45,
            pool_weights: PoolWeights { shield: 1, ecm: 2, maneuver: 3, armor: 1, specials: 1 },
            reinforced_armor: false,
            same_speed_maneuver: true,
            bio_weapons: true,
        }
    }

    /// Shieldwrights: deflector-first doctrine
    pub fn aurelian() -> Self {
        Self {
            cost_mult: [1.0, 1.0, 1.0, 1.1],
            module_space_ratio: 0.55,
            pool_weights: PoolWeights { shield: 4, ecm: 2, maneuver: 1, armor: 2, specials: 1 },
            reinforced_armor: true,
            same_speed_maneuver: false,
            bio_weapons: false,
        }
    }

    /// Veilborn: evasion and jamming over plate
    pub fn quellix() -> Self {
        Self {
            cost_mult: [0.9, 0.95, 1.05, 1.2],
            module_space_ratio: 0.5,
            pool_weights: PoolWeights { shield: 1, ecm: 3, maneuver: 3, armor: 1, specials: 2 },
            reinforced_armor: false,
            same_speed_maneuver: true,
            bio_weapons: false,
        }
    }

    pub fn cost_multiplier(&self, hull: HullSize) -> f32 {
        self.cost_mult[hull.index()]
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(0.0..=1.0).contains(&self.module_space_ratio) {
            return Err(format!(
                "module_space_ratio ({}) must be in [0, 1]",
                self.module_space_ratio
            ));
        }
        if self.cost_mult.iter().any(|m| *m <= 0.0) {
            return Err("cost multipliers must be positive".into());
        }
        if self.pool_weights.as_array().iter().sum::<u32>() == 0 {
            return Err("pool weights must not all be zero".into());
        }
        Ok(())
    }
}

/// Named race tables loaded from TOML, for modded or scripted races
///
/// ```toml
/// [races.raider]
/// cost_mult = [0.9, 0.9, 1.0, 1.2]
/// module_space_ratio = 0.4
/// pool_weights = { shield = 1, ecm = 2, maneuver = 4, armor = 1, specials = 1 }
/// reinforced_armor = false
/// same_speed_maneuver = true
/// bio_weapons = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceBook {
    pub races: AHashMap<String, RaceDesignWeights>,
}

impl RaceBook {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn get(&self, name: &str) -> Option<&RaceDesignWeights> {
        self.races.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_validate() {
        for race in Race::ALL {
            assert!(
                race.design_weights().validate().is_ok(),
                "{:?} weights invalid",
                race
            );
        }
    }

    #[test]
    fn test_vakkar_favors_armor() {
        let w = RaceDesignWeights::vakkar();
        assert!(w.pool_weights.armor > w.pool_weights.maneuver);
        assert!(w.reinforced_armor);
    }

    #[test]
    fn test_sythid_allows_bio() {
        assert!(RaceDesignWeights::sythid().bio_weapons);
        assert!(!RaceDesignWeights::terran().bio_weapons);
    }

    #[test]
    fn test_race_book_from_toml() {
        let book = RaceBook::from_toml_str(
            r#"
            [races.raider]
            cost_mult = [0.9, 0.9, 1.0, 1.2]
            module_space_ratio = 0.4
            pool_weights = { shield = 1, ecm = 2, maneuver = 4, armor = 1, specials = 1 }
            reinforced_armor = false
            same_speed_maneuver = true
            bio_weapons = false
            "#,
        )
        .unwrap();

        let raider = book.get("raider").unwrap();
        assert_eq!(raider.pool_weights.maneuver, 4);
        assert!(raider.validate().is_ok());
    }

    #[test]
    fn test_race_book_rejects_garbage() {
        assert!(RaceBook::from_toml_str("races = 3").is_err());
    }
}
