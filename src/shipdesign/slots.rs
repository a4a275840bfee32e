//! Design-slot store
//!
//! Each empire owns a fixed array of design slots plus a role-to-slot map
//! naming the design currently in production for each role. Obsoleted
//! designs parked in non-active slots count down here and are scrapped on
//! expiry, freeing the slot.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{ForgeError, Result};
use crate::core::types::Mission;

use super::design::ShipDesign;

pub const DESIGN_SLOTS: usize = 6;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignSlots {
    slots: [Option<ShipDesign>; DESIGN_SLOTS],
    active: AHashMap<Mission, usize>,
}

impl DesignSlots {
    pub fn get(&self, slot: usize) -> Option<&ShipDesign> {
        self.slots[slot].as_ref()
    }

    pub fn active_slot(&self, mission: Mission) -> Option<usize> {
        self.active.get(&mission).copied()
    }

    pub fn active(&self, mission: Mission) -> Option<&ShipDesign> {
        self.active_slot(mission).and_then(|s| self.get(s))
    }

    pub fn active_mut(&mut self, mission: Mission) -> Option<&mut ShipDesign> {
        match self.active_slot(mission) {
            Some(s) => self.slots[s].as_mut(),
            None => None,
        }
    }

    pub fn free_slot(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_none())
    }

    /// Put a design into an empty slot and make it the role's active one
    pub fn install_active(&mut self, slot: usize, design: ShipDesign) -> Result<()> {
        if self.slots[slot].is_some() {
            return Err(ForgeError::SlotOccupied(slot));
        }
        self.active.insert(design.mission, slot);
        self.slots[slot] = Some(design);
        Ok(())
    }

    /// Scrap whatever occupies the slot and install the design in its
    /// place as the role's active one; returns the scrapped design
    pub fn replace_active(&mut self, slot: usize, design: ShipDesign) -> Option<ShipDesign> {
        let old = self.slots[slot].take();
        self.active.insert(design.mission, slot);
        self.slots[slot] = Some(design);
        old
    }

    /// Clear a slot outright; the active map entry goes with it if it
    /// pointed here
    pub fn scrap(&mut self, slot: usize) -> Option<ShipDesign> {
        let old = self.slots[slot].take();
        self.active.retain(|_, s| *s != slot);
        old
    }

    /// Age every obsolete design one turn and scrap the expired ones that
    /// are no longer active for their role; active expired designs are
    /// left for the upgrade engine's unconditional-replace path.
    /// Returns (slot, name) for each scrapped design.
    pub fn tick_countdowns(&mut self) -> Vec<(usize, String)> {
        let mut scrapped = Vec::new();
        let active_slots: Vec<usize> = self.active.values().copied().collect();

        for slot in 0..DESIGN_SLOTS {
            let expired = match &mut self.slots[slot] {
                Some(design) if design.obsolete => {
                    design.remaining_life -= 1;
                    design.remaining_life < 0 && !active_slots.contains(&slot)
                }
                _ => false,
            };
            if expired {
                if let Some(old) = self.scrap(slot) {
                    scrapped.push((slot, old.name));
                }
            }
        }
        scrapped
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &ShipDesign)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|d| (i, d)))
    }
}
