//! Resource ledger — the authoritative wallet and item pools.
//!
//! One resource owns the money balance and the three per-flower pools
//! (seeds, harvested flowers, finished bouquets). All mutation goes through
//! the methods here; a failed spend never touches the balance it checked.
//! The ledger pushes no notifications — domain systems emit the shared
//! events after mutating it, so presentation refresh stays the caller's
//! problem.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::shared::*;

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub money: u32,
    seeds: HashMap<FlowerId, u32>,
    flowers: HashMap<FlowerId, u32>,
    bouquets: HashMap<FlowerId, u32>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            money: STARTING_MONEY,
            seeds: HashMap::new(),
            flowers: HashMap::new(),
            bouquets: HashMap::new(),
        }
    }
}

impl Ledger {
    fn pool(&self, pool: Pool) -> &HashMap<FlowerId, u32> {
        match pool {
            Pool::Seeds => &self.seeds,
            Pool::Flowers => &self.flowers,
            Pool::Bouquets => &self.bouquets,
        }
    }

    fn pool_mut(&mut self, pool: Pool) -> &mut HashMap<FlowerId, u32> {
        match pool {
            Pool::Seeds => &mut self.seeds,
            Pool::Flowers => &mut self.flowers,
            Pool::Bouquets => &mut self.bouquets,
        }
    }

    /// Adjust a pool count by `amount` (may be negative). The result is
    /// floored at zero; overdraw is not an error here. Callers that need
    /// spend-or-fail semantics use [`Ledger::try_spend`] instead.
    pub fn add(&mut self, pool: Pool, id: &str, amount: i64) {
        let entry = self.pool_mut(pool).entry(id.to_string()).or_insert(0);
        let next = (*entry as i64).saturating_add(amount);
        *entry = next.clamp(0, u32::MAX as i64) as u32;
    }

    /// Spend `amount` of an item if the pool holds at least that much.
    /// Returns false and mutates nothing otherwise.
    pub fn try_spend(&mut self, pool: Pool, id: &str, amount: u32) -> bool {
        match self.pool_mut(pool).get_mut(id) {
            Some(count) if *count >= amount => {
                *count -= amount;
                true
            }
            _ => amount == 0,
        }
    }

    /// Read-only count. Unknown ids are 0, never an error.
    pub fn count(&self, pool: Pool, id: &str) -> u32 {
        self.pool(pool).get(id).copied().unwrap_or(0)
    }

    /// Sum across all item kinds in a pool — the "Flowers: N" aggregate.
    pub fn total(&self, pool: Pool) -> u32 {
        self.pool(pool).values().sum()
    }

    /// Flower kinds with at least one seed in stock. Used by the planting
    /// fallback when nothing is selected.
    pub fn first_stocked(&self, pool: Pool) -> Option<&FlowerId> {
        self.pool(pool).iter().find(|(_, &n)| n > 0).map(|(id, _)| id)
    }

    pub fn add_money(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    /// Spend money if the balance covers it; returns false and leaves the
    /// balance untouched otherwise.
    pub fn try_spend_money(&mut self, amount: u32) -> bool {
        if self.money >= amount {
            self.money -= amount;
            true
        } else {
            false
        }
    }
}

pub struct LedgerPlugin;

impl Plugin for LedgerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Ledger>();
    }
}
