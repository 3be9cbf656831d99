use crate::shared::*;

/// Populate the FlowerRegistry with the shop's catalog.
///
/// Grow times are real seconds — pots keep maturing through pauses and
/// room switches, so these stay short enough to watch. Wither windows are
/// per-kind: hardy stock never wilts, the premium kinds punish a shelf
/// left unattended.
pub fn populate_flowers(registry: &mut FlowerRegistry) {
    let flowers: Vec<FlowerDef> = vec![
        FlowerDef {
            id: "daisy".into(),
            name: "Daisy".into(),
            description: "Cheap, cheerful, and quick to the shelf.".into(),
            grow_secs: 8.0,
            seed_cost: 1,
            sell_price: 2,
            bouquet_price: 10,
            harvest_yield: 1,
            stage_count: 3,
            wither_secs: None,
        },
        FlowerDef {
            id: "tulip".into(),
            name: "Tulip".into(),
            description: "A spring staple. Grows fast, sells steady.".into(),
            grow_secs: 12.0,
            seed_cost: 1,
            sell_price: 3,
            bouquet_price: 12,
            harvest_yield: 1,
            stage_count: 3,
            wither_secs: None,
        },
        FlowerDef {
            id: "rose".into(),
            name: "Rose".into(),
            description: "The shop's signature flower.".into(),
            grow_secs: 20.0,
            seed_cost: 2,
            sell_price: 5,
            bouquet_price: 20,
            harvest_yield: 1,
            stage_count: 4,
            wither_secs: None,
        },
        FlowerDef {
            id: "sunflower".into(),
            name: "Sunflower".into(),
            description: "Takes its time and takes the window spot.".into(),
            grow_secs: 25.0,
            seed_cost: 2,
            sell_price: 6,
            bouquet_price: 22,
            harvest_yield: 1,
            stage_count: 4,
            wither_secs: None,
        },
        FlowerDef {
            id: "lily".into(),
            name: "Lily".into(),
            description: "Delicate. Harvest promptly once it opens.".into(),
            grow_secs: 30.0,
            seed_cost: 3,
            sell_price: 8,
            bouquet_price: 28,
            harvest_yield: 1,
            stage_count: 5,
            wither_secs: Some(60.0),
        },
        FlowerDef {
            id: "orchid".into(),
            name: "Orchid".into(),
            description: "Slow, fussy, and worth every minute.".into(),
            grow_secs: 45.0,
            seed_cost: 5,
            sell_price: 12,
            bouquet_price: 40,
            harvest_yield: 1,
            stage_count: 5,
            wither_secs: Some(45.0),
        },
    ];

    for flower in flowers {
        registry.flowers.insert(flower.id.clone(), flower);
    }
}

/// Pot-shop listings. Priced per bundle, not per pot.
pub fn populate_pot_bundles(catalog: &mut PotCatalog) {
    catalog.bundles = vec![
        PotBundle {
            name: "Clay Pot".into(),
            count: 1,
            price: 25,
        },
        PotBundle {
            name: "Pot Shelf (3)".into(),
            count: 3,
            price: 60,
        },
    ];
}
