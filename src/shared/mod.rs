//! Shared types, resources, events, and states for Petalhouse.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Ready,
}

// ═══════════════════════════════════════════════════════════════════════
// IDENTIFIERS
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every flower kind in the game.
/// Using string IDs for data-driven flexibility; stable across catalog
/// reloads, so maps never key on definition object identity.
pub type FlowerId = String;

/// Stable identifier for a single planting site. Assigned once when the
/// pot is registered and never reused for a different pot.
pub type PotId = u32;

/// Identifier for a recurring bill.
pub type BillId = String;

// ═══════════════════════════════════════════════════════════════════════
// ERRORS — recoverable domain failures
// ═══════════════════════════════════════════════════════════════════════

/// Every fallible core operation reports one of these and leaves state
/// untouched. Nothing here terminates the process; "not yet due" and
/// "still growing" are ordinary query results, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// Operation attempted from a state that forbids it
    /// (planting an occupied pot, harvesting an empty one).
    InvalidState,
    /// Money spend attempted against too small a balance.
    InsufficientFunds,
    /// Item spend attempted against too small a pool count
    /// (e.g. planting with no seed in stock).
    InsufficientResource,
    /// Operation referencing a pot, bill, or flower never registered.
    UnknownId,
}

// ═══════════════════════════════════════════════════════════════════════
// FLOWER CATALOG
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowerDef {
    pub id: FlowerId,
    pub name: String,
    pub description: String,
    /// Real seconds from planting to ready.
    pub grow_secs: f64,
    pub seed_cost: u32,
    pub sell_price: u32,
    pub bouquet_price: u32,
    /// Flowers credited per completed grow.
    pub harvest_yield: u32,
    /// Number of visual growth stages the presentation layer has for this
    /// flower. Only used by the pure stage-index mapping.
    pub stage_count: u8,
    /// Seconds a ready flower survives unharvested before wilting.
    /// None = never wilts.
    pub wither_secs: Option<f64>,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct FlowerRegistry {
    pub flowers: HashMap<FlowerId, FlowerDef>,
}

impl FlowerRegistry {
    pub fn get(&self, id: &str) -> Option<&FlowerDef> {
        self.flowers.get(id)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RESOURCE LEDGER
// ═══════════════════════════════════════════════════════════════════════

/// The three independent item pools tracked by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pool {
    Seeds,
    Flowers,
    Bouquets,
}

// ═══════════════════════════════════════════════════════════════════════
// BILLS
// ═══════════════════════════════════════════════════════════════════════

/// Immutable configuration for one recurring bill, defined in the data
/// layer. The live countdown state lives in `Bills` (billing domain).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillDef {
    pub id: BillId,
    pub name: String,
    pub base_amount: u32,
    /// How much the amount grows each cycle.
    pub recurring_increase: u32,
    /// Sales until the bill comes due.
    pub actions_per_cycle: u32,
}

/// A bill shows its warning once this few actions remain.
pub const BILL_WARNING_ACTIONS: u32 = 3;

// ═══════════════════════════════════════════════════════════════════════
// POT SHOP
// ═══════════════════════════════════════════════════════════════════════

/// A purchasable bundle of pots. Priced per bundle, not per pot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PotBundle {
    pub name: String,
    pub count: u32,
    pub price: u32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct PotCatalog {
    pub bundles: Vec<PotBundle>,
}

// ═══════════════════════════════════════════════════════════════════════
// SELECTION
// ═══════════════════════════════════════════════════════════════════════

/// The flower kind the player currently has selected for planting.
/// Presentation writes this; planting falls back to it when no explicit
/// flower accompanies the request.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Selection {
    pub flower_id: Option<FlowerId>,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — commands from the presentation layer
// ═══════════════════════════════════════════════════════════════════════

/// Plant a flower in a pot. With `flower_id = None` the growth domain
/// resolves the kind from the current selection, then any flower with
/// seed stock.
#[derive(Event, Debug, Clone)]
pub struct PlantRequestEvent {
    pub pot_id: PotId,
    pub flower_id: Option<FlowerId>,
}

/// Collect a ready flower out of a pot.
#[derive(Event, Debug, Clone)]
pub struct HarvestRequestEvent {
    pub pot_id: PotId,
}

/// Clear a wilted pot back to empty. Yields nothing.
#[derive(Event, Debug, Clone)]
pub struct ResetPotRequestEvent {
    pub pot_id: PotId,
}

#[derive(Event, Debug, Clone)]
pub struct BuySeedRequestEvent {
    pub flower_id: FlowerId,
}

#[derive(Event, Debug, Clone)]
pub struct SellFlowerRequestEvent {
    pub flower_id: FlowerId,
}

#[derive(Event, Debug, Clone)]
pub struct CraftBouquetRequestEvent {
    pub flower_id: FlowerId,
}

/// Multi-sell: one entry per shelf bouquet the player ticked.
#[derive(Event, Debug, Clone)]
pub struct SellBouquetsRequestEvent {
    pub flower_ids: Vec<FlowerId>,
}

#[derive(Event, Debug, Clone)]
pub struct BuyPotsRequestEvent {
    pub bundle_index: usize,
}

#[derive(Event, Debug, Clone)]
pub struct PayBillRequestEvent {
    pub bill_id: BillId,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — notifications to the presentation layer
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone)]
pub struct FlowerPlantedEvent {
    pub pot_id: PotId,
    pub flower_id: FlowerId,
}

/// A grow finished and the harvest was credited. Fired exactly once per
/// grow, by whichever path (sweep or foreground poll) observed the
/// deadline first.
#[derive(Event, Debug, Clone)]
pub struct FlowerMaturedEvent {
    pub pot_id: PotId,
    pub flower_id: FlowerId,
}

#[derive(Event, Debug, Clone)]
pub struct FlowerHarvestedEvent {
    pub pot_id: PotId,
    pub flower_id: FlowerId,
}

/// A ready flower sat unharvested past its wither window.
#[derive(Event, Debug, Clone)]
pub struct PotWitheredEvent {
    pub pot_id: PotId,
    pub flower_id: FlowerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleKind {
    Flower,
    Bouquet,
}

/// Something was sold for money. Billing counts each of these as one
/// meaningful player action.
#[derive(Event, Debug, Clone)]
pub struct SaleCompletedEvent {
    pub item: FlowerId,
    pub kind: SaleKind,
    pub earned: u32,
}

#[derive(Event, Debug, Clone)]
pub struct PurchaseCompletedEvent {
    pub item: String,
    pub quantity: u32,
    pub cost: u32,
}

#[derive(Event, Debug, Clone)]
pub struct BouquetCraftedEvent {
    pub flower_id: FlowerId,
}

#[derive(Event, Debug, Clone)]
pub struct PotsPurchasedEvent {
    pub pot_ids: Vec<PotId>,
}

#[derive(Event, Debug, Clone)]
pub struct BillDueSoonEvent {
    pub bill_id: BillId,
    pub actions_remaining: u32,
}

/// The countdown hit zero. Queryable condition, never fatal; presentation
/// decides how loudly to nag.
#[derive(Event, Debug, Clone)]
pub struct BillOverdueEvent {
    pub bill_id: BillId,
}

#[derive(Event, Debug, Clone)]
pub struct BillPaidEvent {
    pub bill_id: BillId,
    pub amount_paid: u32,
    /// What the next cycle will cost.
    pub next_amount: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const STARTING_MONEY: u32 = 100;
pub const STARTING_POTS: u32 = 4;

/// Fraction of a grow spent in the sprout stage before the remaining
/// visual stages spread over the rest of the time.
pub const SPROUT_FRACTION: f32 = 0.2;
