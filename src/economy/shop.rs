//! Seed shop and pot shop transactions.

use bevy::prelude::*;

use crate::growth::GrowingArea;
use crate::ledger::Ledger;
use crate::shared::*;

/// Buy one seed packet: money out, seed in. Insufficient funds is a
/// recoverable no-op the presentation layer reports as feedback text.
pub fn handle_buy_seed(
    mut buy_events: EventReader<BuySeedRequestEvent>,
    mut ledger: ResMut<Ledger>,
    registry: Res<FlowerRegistry>,
    mut purchased_events: EventWriter<PurchaseCompletedEvent>,
) {
    for event in buy_events.read() {
        let Some(def) = registry.get(&event.flower_id) else {
            warn!("[Shop] Unknown flower {:?}", event.flower_id);
            continue;
        };
        if !ledger.try_spend_money(def.seed_cost) {
            warn!(
                "[Shop] Not enough money for {} seed ({} < {})",
                def.name, ledger.money, def.seed_cost
            );
            continue;
        }
        ledger.add(Pool::Seeds, &def.id, 1);
        info!(
            "[Shop] Bought 1 {} seed for {}. Balance: {}",
            def.name, def.seed_cost, ledger.money
        );
        purchased_events.send(PurchaseCompletedEvent {
            item: def.id.clone(),
            quantity: 1,
            cost: def.seed_cost,
        });
    }
}

/// Sell one loose flower at its catalog price. Counts as a meaningful
/// action for the bill countdowns.
pub fn handle_sell_flower(
    mut sell_events: EventReader<SellFlowerRequestEvent>,
    mut ledger: ResMut<Ledger>,
    registry: Res<FlowerRegistry>,
    mut sale_events: EventWriter<SaleCompletedEvent>,
) {
    for event in sell_events.read() {
        let Some(def) = registry.get(&event.flower_id) else {
            warn!("[Shop] Unknown flower {:?}", event.flower_id);
            continue;
        };
        if !ledger.try_spend(Pool::Flowers, &def.id, 1) {
            warn!("[Shop] No {} to sell", def.name);
            continue;
        }
        ledger.add_money(def.sell_price);
        info!(
            "[Shop] Sold 1 {} for {}. Balance: {}",
            def.name, def.sell_price, ledger.money
        );
        sale_events.send(SaleCompletedEvent {
            item: def.id.clone(),
            kind: SaleKind::Flower,
            earned: def.sell_price,
        });
    }
}

/// Buy a pot bundle: one spend for the whole bundle, then register that
/// many new empty pots in the growing area.
pub fn handle_buy_pots(
    mut buy_events: EventReader<BuyPotsRequestEvent>,
    mut ledger: ResMut<Ledger>,
    mut area: ResMut<GrowingArea>,
    catalog: Res<PotCatalog>,
    mut purchased_events: EventWriter<PurchaseCompletedEvent>,
    mut pots_events: EventWriter<PotsPurchasedEvent>,
) {
    for event in buy_events.read() {
        let Some(bundle) = catalog.bundles.get(event.bundle_index) else {
            warn!("[Shop] Unknown pot bundle index {}", event.bundle_index);
            continue;
        };
        if !ledger.try_spend_money(bundle.price) {
            warn!(
                "[Shop] Not enough money for {} ({} < {})",
                bundle.name, ledger.money, bundle.price
            );
            continue;
        }
        let pot_ids: Vec<PotId> = (0..bundle.count).map(|_| area.register_pot()).collect();
        info!(
            "[Shop] Bought {} ({} pots) for {}. {} pots total",
            bundle.name,
            bundle.count,
            bundle.price,
            area.len()
        );
        purchased_events.send(PurchaseCompletedEvent {
            item: bundle.name.clone(),
            quantity: bundle.count,
            cost: bundle.price,
        });
        pots_events.send(PotsPurchasedEvent { pot_ids });
    }
}
