//! Warship blueprints
//!
//! A design references catalog entries by index (catalogs are append-only,
//! so indices stay valid for the life of a game). All fitting goes through
//! methods that refuse to overflow the hull's space budget; the invariant
//! is re-checked with a debug assertion after every mutation.

use serde::{Deserialize, Serialize};

use crate::catalog::{ComponentCatalog, Module, SpecialFlags, WeaponCategory};
use crate::core::error::{ForgeError, Result};
use crate::core::types::{DesignId, HullSize, Mission};

pub const WEAPON_SLOTS: usize = 4;
pub const SPECIAL_SLOTS: usize = 3;

/// Slack tolerance for space arithmetic on f32 budgets
const SPACE_EPS: f32 = 1.0e-3;

/// One armed weapon mount: a catalog weapon index and how many are fitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponBattery {
    pub weapon: usize,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipDesign {
    pub id: DesignId,
    pub name: String,
    pub mission: Mission,
    pub hull: HullSize,
    pub engine: usize,
    pub computer: usize,
    pub maneuver: usize,
    pub armor: usize,
    pub shield: usize,
    pub ecm: usize,
    pub weapons: [Option<WeaponBattery>; WEAPON_SLOTS],
    pub specials: [Option<usize>; SPECIAL_SLOTS],
    space_used: f32,
    /// Worst-case damage per combat turn, set by the last synthesis pass
    pub per_turn_damage: f32,
    /// Flagged for eventual replacement; kept fielded until the countdown
    /// expires or replacement conditions are met
    pub obsolete: bool,
    /// Countdown turns while obsolete; doubles as a stability counter for
    /// active designs the guard has decided to leave alone
    pub remaining_life: i32,
}

impl ShipDesign {
    /// Bare hull with baseline modules and the entry-level drive
    pub fn new(name: impl Into<String>, mission: Mission, hull: HullSize, catalog: &ComponentCatalog) -> Self {
        let mut design = Self {
            id: DesignId::new(),
            name: name.into(),
            mission,
            hull,
            engine: 0,
            computer: 0,
            maneuver: 0,
            armor: 0,
            shield: 0,
            ecm: 0,
            weapons: [None; WEAPON_SLOTS],
            specials: [None; SPECIAL_SLOTS],
            space_used: 0.0,
            per_turn_damage: 0.0,
            obsolete: false,
            remaining_life: 0,
        };
        design.space_used = catalog.engines[0].space(hull);
        design
    }

    pub fn total_space(&self) -> f32 {
        self.hull.total_space()
    }

    pub fn space_used(&self) -> f32 {
        self.space_used
    }

    pub fn available_space(&self) -> f32 {
        self.total_space() - self.space_used
    }

    /// Claim `delta` space (negative frees space); refuses to overflow
    fn claim(&mut self, delta: f32) -> Result<()> {
        let available = self.available_space();
        if delta > available + SPACE_EPS {
            return Err(ForgeError::InsufficientSpace { needed: delta, available });
        }
        self.space_used += delta;
        debug_assert!(
            self.space_used <= self.total_space() + SPACE_EPS,
            "space invariant violated: {} used of {}",
            self.space_used,
            self.total_space()
        );
        Ok(())
    }

    pub fn install_engine(&mut self, catalog: &ComponentCatalog, idx: usize) -> Result<()> {
        let delta = catalog.engines[idx].space(self.hull) - catalog.engines[self.engine].space(self.hull);
        self.claim(delta)?;
        self.engine = idx;
        Ok(())
    }

    pub fn install_computer(&mut self, catalog: &ComponentCatalog, idx: usize) -> Result<()> {
        let delta =
            catalog.computers[idx].space(self.hull) - catalog.computers[self.computer].space(self.hull);
        self.claim(delta)?;
        self.computer = idx;
        Ok(())
    }

    pub fn install_shield(&mut self, catalog: &ComponentCatalog, idx: usize) -> Result<()> {
        let delta = catalog.shields[idx].space(self.hull) - catalog.shields[self.shield].space(self.hull);
        self.claim(delta)?;
        self.shield = idx;
        Ok(())
    }

    pub fn install_ecm(&mut self, catalog: &ComponentCatalog, idx: usize) -> Result<()> {
        let delta = catalog.ecm[idx].space(self.hull) - catalog.ecm[self.ecm].space(self.hull);
        self.claim(delta)?;
        self.ecm = idx;
        Ok(())
    }

    pub fn install_maneuver(&mut self, catalog: &ComponentCatalog, idx: usize) -> Result<()> {
        let delta =
            catalog.maneuvers[idx].space(self.hull) - catalog.maneuvers[self.maneuver].space(self.hull);
        self.claim(delta)?;
        self.maneuver = idx;
        Ok(())
    }

    pub fn install_armor(&mut self, catalog: &ComponentCatalog, idx: usize) -> Result<()> {
        let delta = catalog.armors[idx].space(self.hull) - catalog.armors[self.armor].space(self.hull);
        self.claim(delta)?;
        self.armor = idx;
        Ok(())
    }

    /// Fit a special into the first free slot; returns the slot used
    pub fn install_special(&mut self, catalog: &ComponentCatalog, idx: usize) -> Result<usize> {
        let slot = self
            .free_special_slot()
            .ok_or(ForgeError::NoFreeSpecialSlot)?;
        self.claim(catalog.specials[idx].space(self.hull))?;
        self.specials[slot] = Some(idx);
        Ok(slot)
    }

    /// Arm a weapon slot; the slot must be empty
    pub fn install_weapon(
        &mut self,
        catalog: &ComponentCatalog,
        slot: usize,
        weapon: usize,
        count: u32,
    ) -> Result<()> {
        if self.weapons[slot].is_some() {
            return Err(ForgeError::WeaponSlotOccupied(slot));
        }
        self.claim(catalog.weapons[weapon].space(self.hull) * count as f32)?;
        self.weapons[slot] = Some(WeaponBattery { weapon, count });
        Ok(())
    }

    /// Resize an armed battery; count 0 empties the slot
    pub fn set_weapon_count(&mut self, catalog: &ComponentCatalog, slot: usize, count: u32) -> Result<()> {
        let battery = match self.weapons[slot] {
            Some(b) => b,
            None => return Ok(()),
        };
        let unit = catalog.weapons[battery.weapon].space(self.hull);
        let delta = (count as f32 - battery.count as f32) * unit;
        self.claim(delta)?;
        self.weapons[slot] = if count == 0 {
            None
        } else {
            Some(WeaponBattery { weapon: battery.weapon, count })
        };
        Ok(())
    }

    pub fn free_weapon_slot(&self) -> Option<usize> {
        self.weapons.iter().position(|w| w.is_none())
    }

    pub fn free_special_slot(&self) -> Option<usize> {
        self.specials.iter().position(|s| s.is_none())
    }

    /// Combat speed: drive warp plus thruster boost
    pub fn combat_speed(&self, catalog: &ComponentCatalog) -> u32 {
        u32::from(catalog.engines[self.engine].warp) + u32::from(catalog.maneuvers[self.maneuver].boost)
    }

    pub fn has_special(&self, catalog: &ComponentCatalog, pred: impl Fn(&SpecialFlags) -> bool) -> bool {
        self.specials
            .iter()
            .flatten()
            .any(|&idx| pred(&catalog.specials[idx].flags))
    }

    /// Best effective beam-range bonus among installed specials
    pub fn range_bonus(&self, catalog: &ComponentCatalog) -> u8 {
        self.specials
            .iter()
            .flatten()
            .map(|&idx| catalog.specials[idx].flags.range_bonus)
            .max()
            .unwrap_or(0)
    }

    /// Weapon categories already represented by anti-ship batteries
    ///
    /// Bombardment weapons sit outside the variety rule; they never block
    /// an anti-ship pick.
    pub fn used_categories(&self, catalog: &ComponentCatalog) -> Vec<WeaponCategory> {
        self.weapons
            .iter()
            .flatten()
            .filter(|b| !catalog.weapons[b.weapon].is_bombard())
            .map(|b| catalog.weapons[b.weapon].category)
            .collect()
    }

    /// Raw unit cost before the race cost multiplier
    pub fn unit_cost(&self, catalog: &ComponentCatalog) -> f32 {
        let hull = self.hull;
        let mut cost = hull.base_cost();
        cost += catalog.engines[self.engine].cost(hull);
        cost += catalog.computers[self.computer].cost(hull);
        cost += catalog.maneuvers[self.maneuver].cost(hull);
        cost += catalog.armors[self.armor].cost(hull);
        cost += catalog.shields[self.shield].cost(hull);
        cost += catalog.ecm[self.ecm].cost(hull);
        for battery in self.weapons.iter().flatten() {
            cost += catalog.weapons[battery.weapon].cost(hull) * battery.count as f32;
        }
        for &idx in self.specials.iter().flatten() {
            cost += catalog.specials[idx].cost(hull);
        }
        cost
    }

    /// Module-for-module comparison, ignoring identity, damage cache, and
    /// obsolescence state
    pub fn same_loadout(&self, other: &ShipDesign) -> bool {
        self.hull == other.hull
            && self.engine == other.engine
            && self.computer == other.computer
            && self.maneuver == other.maneuver
            && self.armor == other.armor
            && self.shield == other.shield
            && self.ecm == other.ecm
            && self.weapons == other.weapons
            && self.specials == other.specials
    }

    pub fn mark_obsolete(&mut self, countdown: i32) {
        self.obsolete = true;
        self.remaining_life = countdown;
    }
}
