//! Petalhouse core — the durable state of a small flower shop.
//!
//! Everything with a correctness contract lives here: the pot growth
//! timers, the seed/flower/bouquet ledger, the action-driven bill cycles,
//! and the real-time clock they all read. Presentation (sprites, panels,
//! audio, rooms) is an external layer that adds its own plugins on top,
//! polls the queries each frame, and sends the request events; it owns no
//! state and may be absent for any stretch of time without the core
//! noticing.

pub mod billing;
pub mod clock;
pub mod data;
pub mod economy;
pub mod growth;
pub mod ledger;
pub mod save;
pub mod shared;

use bevy::prelude::*;

use shared::*;

/// The composition root: one plugin that wires the whole core into an
/// `App`. Constructed exactly once at process start and handed to Bevy —
/// there are no global singletons to reach for.
///
/// Requires `StatesPlugin` (part of `DefaultPlugins`; add it explicitly on
/// a `MinimalPlugins` app).
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Game state
            .init_state::<GameState>()
            // Command events from the presentation layer
            .add_event::<PlantRequestEvent>()
            .add_event::<HarvestRequestEvent>()
            .add_event::<ResetPotRequestEvent>()
            .add_event::<BuySeedRequestEvent>()
            .add_event::<SellFlowerRequestEvent>()
            .add_event::<CraftBouquetRequestEvent>()
            .add_event::<SellBouquetsRequestEvent>()
            .add_event::<BuyPotsRequestEvent>()
            .add_event::<PayBillRequestEvent>()
            // Notification events to the presentation layer
            .add_event::<FlowerPlantedEvent>()
            .add_event::<FlowerMaturedEvent>()
            .add_event::<FlowerHarvestedEvent>()
            .add_event::<PotWitheredEvent>()
            .add_event::<SaleCompletedEvent>()
            .add_event::<PurchaseCompletedEvent>()
            .add_event::<BouquetCraftedEvent>()
            .add_event::<PotsPurchasedEvent>()
            .add_event::<BillDueSoonEvent>()
            .add_event::<BillOverdueEvent>()
            .add_event::<BillPaidEvent>()
            // Domain plugins
            .add_plugins(clock::ClockPlugin)
            .add_plugins(ledger::LedgerPlugin)
            .add_plugins(growth::GrowthPlugin)
            .add_plugins(billing::BillingPlugin)
            .add_plugins(economy::EconomyPlugin)
            .add_plugins(save::SavePlugin)
            // Catalog loading
            .add_plugins(data::DataPlugin);
    }
}
