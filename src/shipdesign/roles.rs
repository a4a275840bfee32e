//! Role configuration table
//!
//! One data-driven profile per mission: pool-weight deltas over the race
//! base, pool fitting order, weapon-slot strategy, and the replacement
//! tunables the upgrade engine reads. Keeping these in one table means a
//! role tweak is a row edit, not a scavenger hunt through branches.

use crate::core::types::{HullSize, Mission};
use crate::race::RaceDesignWeights;

/// The five defensive/utility space pools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pool {
    Shield,
    Ecm,
    Maneuver,
    Armor,
    Specials,
}

impl Pool {
    /// Index into weight arrays: shield, ECM, maneuver, armor, specials
    pub fn index(self) -> usize {
        match self {
            Pool::Shield => 0,
            Pool::Ecm => 1,
            Pool::Maneuver => 2,
            Pool::Armor => 3,
            Pool::Specials => 4,
        }
    }
}

/// How a role spends its weapon space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponPlan {
    /// No weapons (scouts, colony ships)
    Unarmed,
    /// One weapon type spread across up to `slots` batteries
    SingleBattery { slots: usize },
    /// Primary type in up to `primary_slots` batteries on the primary
    /// space share, a second type in up to `secondary_slots` with the rest
    DualBattery { primary_slots: usize, secondary_slots: usize },
    /// Bombardment battery on the primary share, anti-ship with the rest
    Bombard,
}

#[derive(Debug, Clone)]
pub struct RoleProfile {
    pub mission: Mission,
    /// Added to the race's base pool weights (shield, ECM, maneuver,
    /// armor, specials)
    pub pool_deltas: [u32; 5],
    /// Pools claim space in this order; unspent budget carries forward
    pub fit_order: [Pool; 5],
    pub weapon_plan: WeaponPlan,
    /// Turns an obsoleted design of this role stays fielded
    pub obsolete_countdown: i32,
    /// Committed-value ceiling under which the active design is replaced
    /// without ratio checks
    pub cheap_threshold: f32,
}

static SCOUT: RoleProfile = RoleProfile {
    mission: Mission::Scout,
    pool_deltas: [0, 0, 0, 0, 1],
    fit_order: [Pool::Maneuver, Pool::Ecm, Pool::Shield, Pool::Armor, Pool::Specials],
    weapon_plan: WeaponPlan::Unarmed,
    obsolete_countdown: 0,
    cheap_threshold: 0.0,
};

static COLONY: RoleProfile = RoleProfile {
    mission: Mission::ColonyShip,
    pool_deltas: [1, 0, 0, 0, 0],
    fit_order: [Pool::Shield, Pool::Ecm, Pool::Armor, Pool::Maneuver, Pool::Specials],
    weapon_plan: WeaponPlan::Unarmed,
    obsolete_countdown: 8,
    cheap_threshold: 0.0,
};

static FIGHTER: RoleProfile = RoleProfile {
    mission: Mission::Fighter,
    pool_deltas: [0, 2, 2, 0, 0],
    fit_order: [Pool::Maneuver, Pool::Ecm, Pool::Shield, Pool::Armor, Pool::Specials],
    weapon_plan: WeaponPlan::SingleBattery { slots: 4 },
    obsolete_countdown: 16,
    cheap_threshold: 100.0,
};

static BOMBER: RoleProfile = RoleProfile {
    mission: Mission::Bomber,
    pool_deltas: [0, 2, 2, 0, 0],
    fit_order: [Pool::Ecm, Pool::Maneuver, Pool::Shield, Pool::Armor, Pool::Specials],
    weapon_plan: WeaponPlan::Bombard,
    obsolete_countdown: 12,
    cheap_threshold: 100.0,
};

static DESTROYER: RoleProfile = RoleProfile {
    mission: Mission::Destroyer,
    pool_deltas: [2, 0, 0, 2, 0],
    fit_order: [Pool::Armor, Pool::Shield, Pool::Ecm, Pool::Maneuver, Pool::Specials],
    weapon_plan: WeaponPlan::DualBattery { primary_slots: 2, secondary_slots: 2 },
    obsolete_countdown: 20,
    cheap_threshold: 1000.0,
};

/// Profile row for a mission
pub fn profile(mission: Mission) -> &'static RoleProfile {
    match mission {
        Mission::Scout => &SCOUT,
        Mission::ColonyShip => &COLONY,
        Mission::Fighter => &FIGHTER,
        Mission::Bomber => &BOMBER,
        Mission::Destroyer => &DESTROYER,
    }
}

/// Race base weights plus role deltas, with the big-hull specials bump
pub fn resolve_pool_weights(race: &RaceDesignWeights, mission: Mission, hull: HullSize) -> [u32; 5] {
    let base = race.pool_weights.as_array();
    let deltas = profile(mission).pool_deltas;
    let mut resolved = [0u32; 5];
    for i in 0..5 {
        resolved[i] = base[i] + deltas[i];
    }
    // Large hulls have room for toys
    if hull >= HullSize::Large {
        resolved[Pool::Specials.index()] += 1;
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Mission;
    use crate::race::RaceDesignWeights;

    #[test]
    fn test_every_mission_has_a_profile() {
        for mission in Mission::ALL {
            assert_eq!(profile(mission).mission, mission);
        }
    }

    #[test]
    fn test_destroyer_weights_plate_and_shields() {
        let race = RaceDesignWeights::terran();
        let fighter = resolve_pool_weights(&race, Mission::Fighter, HullSize::Small);
        let destroyer = resolve_pool_weights(&race, Mission::Destroyer, HullSize::Small);
        assert!(destroyer[Pool::Armor.index()] > fighter[Pool::Armor.index()]);
        assert!(fighter[Pool::Maneuver.index()] > destroyer[Pool::Maneuver.index()]);
    }

    #[test]
    fn test_large_hull_specials_bump() {
        let race = RaceDesignWeights::terran();
        let small = resolve_pool_weights(&race, Mission::Fighter, HullSize::Small);
        let large = resolve_pool_weights(&race, Mission::Fighter, HullSize::Large);
        let huge = resolve_pool_weights(&race, Mission::Fighter, HullSize::Huge);
        assert_eq!(large[Pool::Specials.index()], small[Pool::Specials.index()] + 1);
        assert_eq!(huge[Pool::Specials.index()], small[Pool::Specials.index()] + 1);
    }

    #[test]
    fn test_role_countdowns() {
        assert_eq!(profile(Mission::Fighter).obsolete_countdown, 16);
        assert_eq!(profile(Mission::Bomber).obsolete_countdown, 12);
        assert_eq!(profile(Mission::Destroyer).obsolete_countdown, 20);
        assert_eq!(profile(Mission::ColonyShip).obsolete_countdown, 8);
    }
}
