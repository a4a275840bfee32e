//! Fleet ledger: hull counts per design slot
//!
//! The economy collaborator keeps these current; the design engine reads
//! them to weigh disruption cost and clears a slot's counts on scrap.

use serde::{Deserialize, Serialize};

use crate::shipdesign::slots::DESIGN_SLOTS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetLedger {
    /// Hulls fielded per design slot
    built: [u32; DESIGN_SLOTS],
    /// Colony ships in transit toward a target and not retreating,
    /// per design slot
    outbound: [u32; DESIGN_SLOTS],
}

impl FleetLedger {
    pub fn built(&self, slot: usize) -> u32 {
        self.built[slot]
    }

    pub fn outbound(&self, slot: usize) -> u32 {
        self.outbound[slot]
    }

    pub fn set_built(&mut self, slot: usize, count: u32) {
        self.built[slot] = count;
    }

    pub fn set_outbound(&mut self, slot: usize, count: u32) {
        self.outbound[slot] = count;
    }

    /// A scrapped design takes its fielded hulls with it
    pub fn clear_slot(&mut self, slot: usize) {
        self.built[slot] = 0;
        self.outbound[slot] = 0;
    }
}
