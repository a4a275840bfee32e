//! Weapon specifications
//!
//! Weapons carry a damage roll, a firing cadence, and category flags.
//! The design engine scores them pessimistically against assessed rival
//! profiles; the tactical combat layer reads the same fields when
//! resolving battles.

use serde::{Deserialize, Serialize};

use crate::core::types::HullSize;

use super::component::{Module, PerHull};

/// Delivery category - at most one weapon type of each category is
/// installed across a design's four batteries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponCategory {
    /// Direct-fire energy mounts
    Beam,
    /// Self-propelled ordnance with limited magazines
    Missile,
    /// Continuous-fire projectors that bleed through shields
    Streaming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSpec {
    pub name: String,
    pub level: u8,
    pub category: WeaponCategory,
    /// Damage roll bounds, inclusive
    pub dmg_lo: u32,
    pub dmg_hi: u32,
    /// Effective firing range in combat hexes
    pub range: u8,
    /// Magazine size for limited-ammunition weapons; None = unlimited
    pub shots: Option<u8>,
    /// Turns between volleys (1 = fires every turn)
    pub turns_to_fire: u8,
    /// Bombardment weapon that attacks populations, not hulls
    pub bio: bool,
    /// Can only strike planetary targets (bombs)
    pub ground_only: bool,
    pub space: PerHull,
    pub cost: PerHull,
    pub power: PerHull,
}

impl WeaponSpec {
    /// Mean damage per volley against a target behind `shield` points
    ///
    /// Streaming weapons bleed through, so only half the shield (rounded
    /// down) applies to them.
    pub fn firepower(&self, shield: u8) -> f32 {
        let effective = if self.category == WeaponCategory::Streaming {
            u32::from(shield) / 2
        } else {
            u32::from(shield)
        };

        let mut total = 0u32;
        for roll in self.dmg_lo..=self.dmg_hi {
            total += roll.saturating_sub(effective);
        }
        let rolls = self.dmg_hi - self.dmg_lo + 1;
        total as f32 / rolls as f32
    }

    /// Bombardment weapons are only considered for the bomber's ground
    /// battery
    pub fn is_bombard(&self) -> bool {
        self.ground_only || self.bio
    }
}

impl Module for WeaponSpec {
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
