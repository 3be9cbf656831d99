//! Growth domain — pot registration, planting, maturation, harvest.
//!
//! Communicates with other domains exclusively through crate::shared
//! events/resources. The pot state machine itself lives in [`pots`];
//! this module wires it to the request events and runs the background
//! sweep that catches growth finishing while no presentation is looking.

use bevy::prelude::*;

use crate::clock::GameClock;
use crate::ledger::Ledger;
use crate::shared::*;

pub mod pots;
pub mod stages;

pub use pots::{GrowingArea, Pot};
pub use stages::stage_index;

pub struct GrowthPlugin;

impl Plugin for GrowthPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GrowingArea>().add_systems(
            Update,
            (
                handle_plant_request,
                handle_harvest_request,
                handle_reset_request,
                // Runs every frame regardless of what the player is
                // doing elsewhere; idempotent completion makes it safe
                // alongside any foreground poll.
                sweep_growth,
            )
                .run_if(in_state(GameState::Ready)),
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Planting
// ─────────────────────────────────────────────────────────────────────────────

/// Pick which flower a plant request means: the explicit kind if its seed
/// is in stock, else the current selection, else any kind with seed stock.
fn resolve_plantable(
    requested: Option<&str>,
    selection: &Selection,
    ledger: &Ledger,
) -> Option<FlowerId> {
    if let Some(id) = requested {
        if ledger.count(Pool::Seeds, id) > 0 {
            return Some(id.to_string());
        }
    }
    if let Some(id) = selection.flower_id.as_deref() {
        if ledger.count(Pool::Seeds, id) > 0 {
            return Some(id.to_string());
        }
    }
    ledger.first_stocked(Pool::Seeds).cloned()
}

/// The composed planting operation: verify the pot is empty, spend one
/// seed, then start the grow. Seed-spend and grow-start stay two explicit
/// steps; a failure at any step leaves both the ledger and the pot exactly
/// as they were.
pub fn plant_flower(
    area: &mut GrowingArea,
    ledger: &mut Ledger,
    registry: &FlowerRegistry,
    selection: &Selection,
    pot_id: PotId,
    requested: Option<&str>,
    now: f64,
) -> Result<FlowerId, CoreError> {
    match area.pot(pot_id) {
        None => return Err(CoreError::UnknownId),
        Some(Pot::Empty) => {}
        Some(_) => return Err(CoreError::InvalidState),
    }

    let flower_id =
        resolve_plantable(requested, selection, ledger).ok_or(CoreError::InsufficientResource)?;
    let def = registry.get(&flower_id).ok_or(CoreError::UnknownId)?;

    if !ledger.try_spend(Pool::Seeds, &flower_id, 1) {
        return Err(CoreError::InsufficientResource);
    }
    // Cannot fail now — the pot was checked empty above and nothing else
    // mutated it in between (single-writer schedule).
    area.plant(pot_id, def, now)?;
    Ok(flower_id)
}

fn handle_plant_request(
    mut plant_events: EventReader<PlantRequestEvent>,
    mut area: ResMut<GrowingArea>,
    mut ledger: ResMut<Ledger>,
    registry: Res<FlowerRegistry>,
    selection: Res<Selection>,
    clock: Res<GameClock>,
    mut planted_events: EventWriter<FlowerPlantedEvent>,
) {
    for event in plant_events.read() {
        match plant_flower(
            &mut area,
            &mut ledger,
            &registry,
            &selection,
            event.pot_id,
            event.flower_id.as_deref(),
            clock.now(),
        ) {
            Ok(flower_id) => {
                info!(
                    "[Growth] Planted {} in pot {} ({} seeds left)",
                    flower_id,
                    event.pot_id,
                    ledger.count(Pool::Seeds, &flower_id)
                );
                planted_events.send(FlowerPlantedEvent {
                    pot_id: event.pot_id,
                    flower_id,
                });
            }
            Err(err) => {
                warn!("[Growth] Plant request for pot {} failed: {:?}", event.pot_id, err);
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Harvest / reset
// ─────────────────────────────────────────────────────────────────────────────

fn handle_harvest_request(
    mut harvest_events: EventReader<HarvestRequestEvent>,
    mut area: ResMut<GrowingArea>,
    ledger: Res<Ledger>,
    mut harvested_events: EventWriter<FlowerHarvestedEvent>,
) {
    for event in harvest_events.read() {
        match area.harvest(event.pot_id) {
            Some(flower_id) => {
                info!(
                    "[Growth] Harvested {} from pot {}, total now: {}",
                    flower_id,
                    event.pot_id,
                    ledger.count(Pool::Flowers, &flower_id)
                );
                harvested_events.send(FlowerHarvestedEvent {
                    pot_id: event.pot_id,
                    flower_id,
                });
            }
            None => {
                warn!("[Growth] Pot {}: nothing to harvest", event.pot_id);
            }
        }
    }
}

fn handle_reset_request(
    mut reset_events: EventReader<ResetPotRequestEvent>,
    mut area: ResMut<GrowingArea>,
) {
    for event in reset_events.read() {
        if area.reset(event.pot_id) {
            info!("[Growth] Pot {} cleared", event.pot_id);
        } else {
            warn!("[Growth] Pot {}: nothing to clear", event.pot_id);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Background sweep
// ─────────────────────────────────────────────────────────────────────────────

/// Drive maturation and wilting for every pot, independent of any
/// presentation poll. Both this sweep and a foreground caller end at
/// `try_complete`/`try_wither`, which are idempotent, so whichever path
/// observes a deadline first wins and the other is a no-op.
fn sweep_growth(
    mut area: ResMut<GrowingArea>,
    mut ledger: ResMut<Ledger>,
    registry: Res<FlowerRegistry>,
    clock: Res<GameClock>,
    mut matured_events: EventWriter<FlowerMaturedEvent>,
    mut withered_events: EventWriter<PotWitheredEvent>,
) {
    let now = clock.now();
    let ids: Vec<PotId> = area.pot_ids().collect();
    for pot_id in ids {
        if area.try_complete(pot_id, now, &mut ledger, &registry) {
            if let Some(Pot::Ready { flower_id, .. }) = area.pot(pot_id) {
                info!("[Growth] Pot {}: {} is ready", pot_id, flower_id);
                matured_events.send(FlowerMaturedEvent {
                    pot_id,
                    flower_id: flower_id.clone(),
                });
            }
        }
        if area.try_wither(pot_id, now, &registry) {
            if let Some(Pot::Withered { flower_id }) = area.pot(pot_id) {
                warn!("[Growth] Pot {}: {} wilted unharvested", pot_id, flower_id);
                withered_events.send(PotWitheredEvent {
                    pot_id,
                    flower_id: flower_id.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_registry() -> FlowerRegistry {
        let mut registry = FlowerRegistry::default();
        for (id, name) in [("rose", "Rose"), ("tulip", "Tulip")] {
            registry.flowers.insert(
                id.to_string(),
                FlowerDef {
                    id: id.to_string(),
                    name: name.to_string(),
                    description: String::new(),
                    grow_secs: 20.0,
                    seed_cost: 2,
                    sell_price: 5,
                    bouquet_price: 20,
                    harvest_yield: 1,
                    stage_count: 4,
                    wither_secs: None,
                },
            );
        }
        registry
    }

    #[test]
    fn test_plant_flower_spends_exactly_one_seed() {
        let mut area = GrowingArea::default();
        let mut ledger = Ledger::default();
        let registry = test_registry();
        let selection = Selection::default();
        let pot = area.register_pot();
        ledger.add(Pool::Seeds, "rose", 2);

        let planted = plant_flower(
            &mut area,
            &mut ledger,
            &registry,
            &selection,
            pot,
            Some("rose"),
            0.0,
        );
        assert_eq!(planted, Ok("rose".to_string()));
        assert_eq!(ledger.count(Pool::Seeds, "rose"), 1);
    }

    #[test]
    fn test_plant_flower_without_seed_leaves_pot_empty() {
        let mut area = GrowingArea::default();
        let mut ledger = Ledger::default();
        let registry = test_registry();
        let selection = Selection::default();
        let pot = area.register_pot();

        let planted = plant_flower(
            &mut area,
            &mut ledger,
            &registry,
            &selection,
            pot,
            Some("rose"),
            0.0,
        );
        assert_eq!(planted, Err(CoreError::InsufficientResource));
        assert!(matches!(area.pot(pot), Some(Pot::Empty)));
    }

    #[test]
    fn test_plant_occupied_pot_keeps_seed() {
        let mut area = GrowingArea::default();
        let mut ledger = Ledger::default();
        let registry = test_registry();
        let selection = Selection::default();
        let pot = area.register_pot();
        ledger.add(Pool::Seeds, "rose", 2);

        plant_flower(&mut area, &mut ledger, &registry, &selection, pot, Some("rose"), 0.0)
            .unwrap();
        let again =
            plant_flower(&mut area, &mut ledger, &registry, &selection, pot, Some("rose"), 1.0);

        // The state check runs before the spend, so the second seed survives.
        assert_eq!(again, Err(CoreError::InvalidState));
        assert_eq!(ledger.count(Pool::Seeds, "rose"), 1);
    }

    #[test]
    fn test_resolve_prefers_request_then_selection_then_stock() {
        let mut ledger = Ledger::default();
        ledger.add(Pool::Seeds, "tulip", 1);

        // Requested kind out of stock → fall through to selection.
        let selection = Selection {
            flower_id: Some("tulip".to_string()),
        };
        assert_eq!(
            resolve_plantable(Some("rose"), &selection, &ledger),
            Some("tulip".to_string())
        );

        // No request, no selection → any stocked kind.
        let selection = Selection::default();
        assert_eq!(
            resolve_plantable(None, &selection, &ledger),
            Some("tulip".to_string())
        );

        // Nothing stocked at all.
        let empty = Ledger::default();
        assert_eq!(resolve_plantable(Some("rose"), &selection, &empty), None);
    }
}
