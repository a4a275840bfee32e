//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for ship designs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DesignId(pub Uuid);

impl DesignId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DesignId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for empires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmpireId(pub u32);

impl EmpireId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Index into an empire's fixed design-slot array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(pub usize);

/// Game turn counter (simulation time unit)
pub type Turn = u32;

/// Ship hull size tiers, each with a fixed space and cost budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum HullSize {
    Small = 0,
    Medium = 1,
    Large = 2,
    Huge = 3,
}

impl HullSize {
    pub const ALL: [HullSize; 4] = [
        HullSize::Small,
        HullSize::Medium,
        HullSize::Large,
        HullSize::Huge,
    ];

    /// Zero-based tier index, used to key per-hull tables
    pub fn index(self) -> usize {
        self as usize
    }

    /// Total module space available on this hull
    pub fn total_space(self) -> f32 {
        match self {
            HullSize::Small => 40.0,
            HullSize::Medium => 200.0,
            HullSize::Large => 600.0,
            HullSize::Huge => 1500.0,
        }
    }

    /// Base credit cost of the bare hull, before the race cost multiplier
    pub fn base_cost(self) -> f32 {
        match self {
            HullSize::Small => 6.0,
            HullSize::Medium => 36.0,
            HullSize::Large => 200.0,
            HullSize::Huge => 1000.0,
        }
    }

    /// Next larger tier, saturating at Huge
    pub fn next_larger(self) -> HullSize {
        match self {
            HullSize::Small => HullSize::Medium,
            HullSize::Medium => HullSize::Large,
            HullSize::Large => HullSize::Huge,
            HullSize::Huge => HullSize::Huge,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HullSize::Small => "Small",
            HullSize::Medium => "Medium",
            HullSize::Large => "Large",
            HullSize::Huge => "Huge",
        }
    }
}

/// Ship role a design is synthesized for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mission {
    Scout,
    ColonyShip,
    Fighter,
    Bomber,
    Destroyer,
}

impl Mission {
    pub const ALL: [Mission; 5] = [
        Mission::Scout,
        Mission::ColonyShip,
        Mission::Fighter,
        Mission::Bomber,
        Mission::Destroyer,
    ];

    /// Roles whose designs carry weapons and compete on damage output
    pub fn is_combat(self) -> bool {
        matches!(self, Mission::Fighter | Mission::Bomber | Mission::Destroyer)
    }

    pub fn label(self) -> &'static str {
        match self {
            Mission::Scout => "Scout",
            Mission::ColonyShip => "Colony Ship",
            Mission::Fighter => "Fighter",
            Mission::Bomber => "Bomber",
            Mission::Destroyer => "Destroyer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empire_id_equality() {
        let a = EmpireId(1);
        let b = EmpireId(1);
        let c = EmpireId(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_hull_size_ordering() {
        assert!(HullSize::Huge > HullSize::Large);
        assert!(HullSize::Large > HullSize::Medium);
        assert!(HullSize::Medium > HullSize::Small);
    }

    #[test]
    fn test_hull_next_larger_saturates() {
        assert_eq!(HullSize::Small.next_larger(), HullSize::Medium);
        assert_eq!(HullSize::Huge.next_larger(), HullSize::Huge);
    }

    #[test]
    fn test_hull_budgets_grow_with_tier() {
        for pair in HullSize::ALL.windows(2) {
            assert!(pair[1].total_space() > pair[0].total_space());
            assert!(pair[1].base_cost() > pair[0].base_cost());
        }
    }

    #[test]
    fn test_combat_missions() {
        assert!(Mission::Fighter.is_combat());
        assert!(Mission::Destroyer.is_combat());
        assert!(!Mission::Scout.is_combat());
        assert!(!Mission::ColonyShip.is_combat());
    }
}
