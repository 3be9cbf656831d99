//! Data layer — populates all catalogs at startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills the flower
//! catalog, the bill table, and the pot-shop listings from the hard-coded
//! game-design data defined in submodules, registers the starting pots,
//! then transitions the game into GameState::Ready.
//!
//! No other domain needs to seed these resources. All domain plugins can
//! safely read them once GameState has advanced past Loading.

mod bills;
mod flowers;

use bevy::prelude::*;

use crate::billing::Bills;
use crate::growth::GrowingArea;
use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FlowerRegistry>()
            .init_resource::<PotCatalog>()
            .add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Single system that populates every catalog and then transitions to Ready.
fn load_all_data(
    mut flower_registry: ResMut<FlowerRegistry>,
    mut pot_catalog: ResMut<PotCatalog>,
    mut bills: ResMut<Bills>,
    mut area: ResMut<GrowingArea>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("DataPlugin: populating catalogs…");

    flowers::populate_flowers(&mut flower_registry);
    info!("  Flowers loaded: {}", flower_registry.flowers.len());

    flowers::populate_pot_bundles(&mut pot_catalog);
    info!("  Pot bundles loaded: {}", pot_catalog.bundles.len());

    bills::populate_bills(&mut bills);
    info!("  Bills loaded: {}", bills.bills.len());

    for _ in 0..STARTING_POTS {
        area.register_pot();
    }
    info!("  Pots registered: {}", area.len());

    info!("DataPlugin: all catalogs populated. Transitioning to Ready.");
    next_state.set(GameState::Ready);
}
