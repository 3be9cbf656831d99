//! Pot lifecycle state machine.
//!
//! One record per planting site, kept for the life of the session: a pot is
//! reset to `Empty` after harvest or wilt, never destroyed. Every operation
//! takes `now` explicitly and derives everything from `started_at` +
//! `duration`, so an arbitrarily long gap between polls (room switches,
//! minimized app) needs no special-case code — the first poll after the gap
//! simply observes the deadline has passed.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ledger::Ledger;
use crate::shared::*;

/// A single planting site.
///
/// The grow duration is copied out of the catalog at planting time, so a
/// later catalog change never retroactively alters an in-flight grow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pot {
    Empty,
    Growing {
        flower_id: FlowerId,
        started_at: f64,
        duration: f64,
    },
    Ready {
        flower_id: FlowerId,
        /// `started_at + duration` of the grow that finished. Wilt windows
        /// count from here, not from when the transition was observed.
        ready_at: f64,
    },
    Withered {
        flower_id: FlowerId,
    },
}

/// All pots in the shop, keyed by stable id.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrowingArea {
    pots: HashMap<PotId, Pot>,
    next_id: PotId,
}

impl GrowingArea {
    /// Add one empty pot and return its id. Ids are never reused.
    pub fn register_pot(&mut self) -> PotId {
        let id = self.next_id;
        self.next_id += 1;
        self.pots.insert(id, Pot::Empty);
        id
    }

    pub fn pot(&self, id: PotId) -> Option<&Pot> {
        self.pots.get(&id)
    }

    pub fn pot_ids(&self) -> impl Iterator<Item = PotId> + '_ {
        self.pots.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.pots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pots.is_empty()
    }

    /// Begin growing `def` in an empty pot. Seed consumption is the
    /// caller's explicit prior step (see `plant_flower` in the growth
    /// plugin) — this method only owns the state transition.
    pub fn plant(&mut self, id: PotId, def: &FlowerDef, now: f64) -> Result<(), CoreError> {
        let pot = self.pots.get_mut(&id).ok_or(CoreError::UnknownId)?;
        if !matches!(pot, Pot::Empty) {
            return Err(CoreError::InvalidState);
        }
        *pot = Pot::Growing {
            flower_id: def.id.clone(),
            started_at: now,
            duration: def.grow_secs,
        };
        Ok(())
    }

    /// Seconds until the current grow finishes. `None` unless growing.
    /// Pure query — callable every frame without mutating anything.
    pub fn remaining(&self, id: PotId, now: f64) -> Option<f64> {
        match self.pots.get(&id)? {
            Pot::Growing {
                started_at,
                duration,
                ..
            } => Some((started_at + duration - now).max(0.0)),
            _ => None,
        }
    }

    /// Growth progress in [0, 1]. `None` for empty pots; ready and wilted
    /// pots report 1.0.
    pub fn progress(&self, id: PotId, now: f64) -> Option<f32> {
        match self.pots.get(&id)? {
            Pot::Empty => None,
            Pot::Growing {
                started_at,
                duration,
                ..
            } => {
                if *duration <= 0.0 {
                    return Some(1.0);
                }
                Some((((now - started_at) / duration) as f32).clamp(0.0, 1.0))
            }
            Pot::Ready { .. } | Pot::Withered { .. } => Some(1.0),
        }
    }

    /// Idempotent completion — the sole mutating checkpoint for maturation.
    ///
    /// The first call that observes `now` at or past the deadline moves the
    /// pot to `Ready` and credits the harvest into the flower pool exactly
    /// once. Every later call (from the sweep, the foreground poll, or
    /// both) returns false and mutates nothing, so the two paths can race
    /// freely without double-crediting.
    pub fn try_complete(
        &mut self,
        id: PotId,
        now: f64,
        ledger: &mut Ledger,
        registry: &FlowerRegistry,
    ) -> bool {
        let Some(pot) = self.pots.get_mut(&id) else {
            return false;
        };
        let Pot::Growing {
            flower_id,
            started_at,
            duration,
        } = pot
        else {
            return false;
        };
        let deadline = *started_at + *duration;
        if now < deadline {
            return false;
        }

        let flower_id = flower_id.clone();
        let yield_count = registry.get(&flower_id).map_or(1, |def| def.harvest_yield);
        *pot = Pot::Ready {
            flower_id: flower_id.clone(),
            ready_at: deadline,
        };
        ledger.add(Pool::Flowers, &flower_id, yield_count as i64);
        true
    }

    /// Collect a ready flower: `Ready → Empty`, returning the flower kind
    /// for the presentation layer. Credits nothing further — the harvest
    /// was banked when the grow completed. Independent of `try_complete`.
    pub fn harvest(&mut self, id: PotId) -> Option<FlowerId> {
        let pot = self.pots.get_mut(&id)?;
        let Pot::Ready { flower_id, .. } = pot else {
            return None;
        };
        let flower_id = flower_id.clone();
        *pot = Pot::Empty;
        Some(flower_id)
    }

    /// Wilt a ready flower whose per-kind wither window has lapsed.
    /// Idempotent; flowers with no window never wilt.
    pub fn try_wither(&mut self, id: PotId, now: f64, registry: &FlowerRegistry) -> bool {
        let Some(pot) = self.pots.get_mut(&id) else {
            return false;
        };
        let Pot::Ready { flower_id, ready_at } = pot else {
            return false;
        };
        let Some(window) = registry.get(flower_id).and_then(|def| def.wither_secs) else {
            return false;
        };
        if now < *ready_at + window {
            return false;
        }
        *pot = Pot::Withered {
            flower_id: flower_id.clone(),
        };
        true
    }

    /// Clear a wilted pot back to empty. No yield.
    pub fn reset(&mut self, id: PotId) -> bool {
        match self.pots.get_mut(&id) {
            Some(pot @ Pot::Withered { .. }) => {
                *pot = Pot::Empty;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rose() -> FlowerDef {
        FlowerDef {
            id: "rose".to_string(),
            name: "Rose".to_string(),
            description: String::new(),
            grow_secs: 20.0,
            seed_cost: 2,
            sell_price: 5,
            bouquet_price: 20,
            harvest_yield: 1,
            stage_count: 4,
            wither_secs: None,
        }
    }

    fn registry_with_rose() -> FlowerRegistry {
        let mut registry = FlowerRegistry::default();
        registry.flowers.insert("rose".to_string(), rose());
        registry
    }

    #[test]
    fn test_plant_requires_empty_pot() {
        let mut area = GrowingArea::default();
        let id = area.register_pot();

        assert_eq!(area.plant(id, &rose(), 0.0), Ok(()));
        assert_eq!(area.plant(id, &rose(), 1.0), Err(CoreError::InvalidState));
        assert_eq!(area.plant(99, &rose(), 0.0), Err(CoreError::UnknownId));
    }

    #[test]
    fn test_remaining_counts_down_without_mutating() {
        let mut area = GrowingArea::default();
        let id = area.register_pot();
        area.plant(id, &rose(), 0.0).unwrap();

        assert_eq!(area.remaining(id, 0.0), Some(20.0));
        assert_eq!(area.remaining(id, 10.0), Some(10.0));
        // Past the deadline the query floors at zero; the state transition
        // belongs to try_complete alone.
        assert_eq!(area.remaining(id, 25.0), Some(0.0));
        assert!(matches!(area.pot(id), Some(Pot::Growing { .. })));
    }

    #[test]
    fn test_try_complete_is_idempotent() {
        let mut area = GrowingArea::default();
        let mut ledger = Ledger::default();
        let registry = registry_with_rose();
        let id = area.register_pot();
        area.plant(id, &rose(), 0.0).unwrap();

        assert!(!area.try_complete(id, 19.9, &mut ledger, &registry));
        assert_eq!(ledger.count(Pool::Flowers, "rose"), 0);

        assert!(area.try_complete(id, 25.0, &mut ledger, &registry));
        assert_eq!(ledger.count(Pool::Flowers, "rose"), 1);

        // Second and later calls with any now' >= now credit nothing.
        assert!(!area.try_complete(id, 25.0, &mut ledger, &registry));
        assert!(!area.try_complete(id, 1000.0, &mut ledger, &registry));
        assert_eq!(ledger.count(Pool::Flowers, "rose"), 1);
    }

    #[test]
    fn test_offline_gap_completes_normally() {
        let mut area = GrowingArea::default();
        let mut ledger = Ledger::default();
        let registry = registry_with_rose();
        let id = area.register_pot();
        area.plant(id, &rose(), 100.0).unwrap();

        // First poll after three hours away.
        assert!(area.try_complete(id, 100.0 + 3.0 * 3600.0, &mut ledger, &registry));
        assert_eq!(ledger.count(Pool::Flowers, "rose"), 1);
        assert_eq!(area.remaining(id, 100.0 + 3.0 * 3600.0), None);
    }

    #[test]
    fn test_harvest_only_from_ready() {
        let mut area = GrowingArea::default();
        let mut ledger = Ledger::default();
        let registry = registry_with_rose();
        let id = area.register_pot();

        assert_eq!(area.harvest(id), None);

        area.plant(id, &rose(), 0.0).unwrap();
        assert_eq!(area.harvest(id), None);

        area.try_complete(id, 20.0, &mut ledger, &registry);
        assert_eq!(area.harvest(id), Some("rose".to_string()));
        assert!(matches!(area.pot(id), Some(Pot::Empty)));

        // Harvest does not credit a second flower.
        assert_eq!(ledger.count(Pool::Flowers, "rose"), 1);
    }

    #[test]
    fn test_wither_window() {
        let mut def = rose();
        def.wither_secs = Some(30.0);
        let mut registry = FlowerRegistry::default();
        registry.flowers.insert("rose".to_string(), def.clone());

        let mut area = GrowingArea::default();
        let mut ledger = Ledger::default();
        let id = area.register_pot();
        area.plant(id, &def, 0.0).unwrap();
        area.try_complete(id, 20.0, &mut ledger, &registry);

        // Window counts from the deadline, not the observation time.
        assert!(!area.try_wither(id, 49.9, &registry));
        assert!(area.try_wither(id, 50.0, &registry));
        assert!(!area.try_wither(id, 60.0, &registry));

        assert_eq!(area.harvest(id), None);
        assert!(area.reset(id));
        assert!(matches!(area.pot(id), Some(Pot::Empty)));
        // Wilting and clearing yielded nothing beyond the completion credit.
        assert_eq!(ledger.count(Pool::Flowers, "rose"), 1);
    }

    #[test]
    fn test_flower_without_window_never_wilts() {
        let mut area = GrowingArea::default();
        let mut ledger = Ledger::default();
        let registry = registry_with_rose();
        let id = area.register_pot();
        area.plant(id, &rose(), 0.0).unwrap();
        area.try_complete(id, 20.0, &mut ledger, &registry);

        assert!(!area.try_wither(id, 1.0e9, &registry));
        assert!(matches!(area.pot(id), Some(Pot::Ready { .. })));
    }

    #[test]
    fn test_duration_snapshot_survives_catalog_change() {
        let mut area = GrowingArea::default();
        let mut ledger = Ledger::default();
        let id = area.register_pot();
        area.plant(id, &rose(), 0.0).unwrap();

        // The catalog entry changes mid-grow; the in-flight deadline does not.
        let mut registry = FlowerRegistry::default();
        let mut slow = rose();
        slow.grow_secs = 500.0;
        registry.flowers.insert("rose".to_string(), slow);

        assert_eq!(area.remaining(id, 10.0), Some(10.0));
        assert!(area.try_complete(id, 20.0, &mut ledger, &registry));
    }
}
