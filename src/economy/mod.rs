//! Economy domain — seed shop, flower sales, bouquet desk, pot shop.
//!
//! All cross-domain communication goes through `crate::shared::*` events
//! and resources. Every transaction mutates the one `Ledger` and announces
//! itself with a shared event; billing counts the sales, presentation
//! renders the receipts.

use bevy::prelude::*;

use crate::shared::*;

pub mod bouquet;
pub mod shop;

use bouquet::{handle_craft_bouquet, handle_sell_bouquets};
use shop::{handle_buy_pots, handle_buy_seed, handle_sell_flower};

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Selection>().add_systems(
            Update,
            (
                handle_buy_seed,
                handle_sell_flower,
                handle_buy_pots,
                handle_craft_bouquet,
                handle_sell_bouquets,
            )
                .run_if(in_state(GameState::Ready)),
        );
    }
}
