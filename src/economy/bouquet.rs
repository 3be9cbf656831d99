//! Bouquet desk — assembly and multi-sell.
//!
//! The cut/wrap/ribbon staging the player clicks through is pure
//! presentation; the core transaction is one flower in, one bouquet out.

use bevy::prelude::*;

use crate::ledger::Ledger;
use crate::shared::*;

/// Assemble one bouquet from one harvested flower of the given kind.
pub fn handle_craft_bouquet(
    mut craft_events: EventReader<CraftBouquetRequestEvent>,
    mut ledger: ResMut<Ledger>,
    registry: Res<FlowerRegistry>,
    mut crafted_events: EventWriter<BouquetCraftedEvent>,
) {
    for event in craft_events.read() {
        let Some(def) = registry.get(&event.flower_id) else {
            warn!("[Bouquet] Unknown flower {:?}", event.flower_id);
            continue;
        };
        if !ledger.try_spend(Pool::Flowers, &def.id, 1) {
            warn!("[Bouquet] No {} in stock to arrange", def.name);
            continue;
        }
        ledger.add(Pool::Bouquets, &def.id, 1);
        info!(
            "[Bouquet] Arranged a {} bouquet. Total: {}",
            def.name,
            ledger.count(Pool::Bouquets, &def.id)
        );
        crafted_events.send(BouquetCraftedEvent {
            flower_id: def.id.clone(),
        });
    }
}

/// Sell a batch of shelf bouquets in one go. Each bouquet that actually
/// sells earns its own catalog price and counts as its own meaningful
/// action; entries the shelf was wrong about (no such bouquet banked) are
/// skipped rather than failing the batch.
pub fn handle_sell_bouquets(
    mut sell_events: EventReader<SellBouquetsRequestEvent>,
    mut ledger: ResMut<Ledger>,
    registry: Res<FlowerRegistry>,
    mut sale_events: EventWriter<SaleCompletedEvent>,
) {
    for event in sell_events.read() {
        if event.flower_ids.is_empty() {
            warn!("[Bouquet] No bouquets selected");
            continue;
        }
        let mut total_earned = 0u32;
        let mut sold = 0u32;
        for flower_id in &event.flower_ids {
            let Some(def) = registry.get(flower_id) else {
                warn!("[Bouquet] Unknown flower {:?}", flower_id);
                continue;
            };
            if !ledger.try_spend(Pool::Bouquets, &def.id, 1) {
                warn!("[Bouquet] No {} bouquet banked; skipping", def.name);
                continue;
            }
            ledger.add_money(def.bouquet_price);
            total_earned += def.bouquet_price;
            sold += 1;
            sale_events.send(SaleCompletedEvent {
                item: def.id.clone(),
                kind: SaleKind::Bouquet,
                earned: def.bouquet_price,
            });
        }
        if sold > 0 {
            info!(
                "[Bouquet] Sold {} bouquets for {}. Balance: {}",
                sold, total_earned, ledger.money
            );
        }
    }
}
