#![allow(dead_code)]

use std::collections::HashMap;

use seira_catalog::catalog::{Catalog, CollectionKind};
use serde_json::{Value, json};

pub fn creatures() -> Value {
    json!([
        { "id": 1, "name": "Bulbasaur", "types": ["Grass", "Poison"], "rarity": "Common",
          "is_starter": true, "in_seira_pokedex": true,
          "moveset_by_level": [{ "level": 1, "move": "Tackle" }, { "level": 7, "move": "vine whip" }],
          "abilities": { "normal": "Overgrow", "hidden": "Chlorophyll" },
          "evolution_chain": [
              { "stage": 1, "pokemon": "Bulbasaur", "evolutions": [{ "to": "Ivysaur", "method": "level", "condition": 16 }] },
              { "stage": 2, "pokemon": "Ivysaur" }
          ] },
        { "id": 5, "name": "Charmeleon", "types": ["Fire"], "rarity": "Rare",
          "held_items": [{ "item_id": 3, "rarity": 5 }] },
        { "id": 37, "name": "Vulpix", "types": ["Fire"] },
        { "id": 10001, "name": "Mega Charmeleon", "types": ["Fire", "Dragon"],
          "base_form": false, "form_type": "mega", "form_of": 5 },
        { "id": 10103, "name": "Alolan Vulpix", "types": ["Ice"],
          "base_form": false, "form_type": "regional", "form_of": 37 },
        { "id": 129, "name": "Magikarp", "types": ["Water"], "is_producer": true,
          "production": [{ "item_id": 1, "description": "scales" }] }
    ])
}

pub fn moves() -> Value {
    json!([
        { "id": 33, "name": "Tackle", "type": "Normal", "category": "Physical", "power": 40 },
        { "id": 22, "name": "Vine Whip", "type": "Grass", "category": "Physical", "power": 45 }
    ])
}

pub fn abilities() -> Value {
    json!([
        { "id": 65, "name": "Overgrow" },
        { "id": 34, "name": "Chlorophyll" }
    ])
}

pub fn items() -> Value {
    json!([
        { "id": 1, "name": "Potion", "category": "medicine", "rarity": "comum",
          "price": { "buy": 300, "casino": 50 } },
        { "id": 2, "name": "Master Ball", "category": "pokeball", "rarity": "epico" },
        { "id": 3, "name": "Charcoal", "category": "held-item", "forageable": true,
          "posts_to_collect": 2, "price": { "mile": 20 } },
        { "id": 4, "name": "Fire Kit", "category": "other", "is_craftable": true,
          "craft_recipe": [{ "item_id": 3, "quantity": 2 }, { "item_id": 1 }] },
        { "id": 5, "name": "Crafting Book", "category": "key-item", "is_book": true,
          "book_category": "Receitas", "unlocks_recipes": [4],
          "description": "Ensina a montar um Fire Kit." },
        { "id": 6, "name": "Fire Stone", "category": "evolution-item", "linked_pokemon": [37] }
    ])
}

pub fn maps() -> Value {
    json!([
        { "id": "route-1", "name": "Route 1", "type": "route", "biome": "forest",
          "spawns": { "common": [1, 129], "rare": [5], "epic": [1] },
          "description": "Trilha entre a cidade e o lago.",
          "accesses": {
              "west": { "name": "Seira Town" },
              "north": { "name": "Lake Shore", "posts_required": 3 }
          },
          "forageable_items": [{ "item_id": 3, "posts_to_collect": 1 }],
          "interaction_objects": ["oran-tree", "lake-spot"],
          "points_of_interest": [
              { "name": "Mart", "type": "shop", "description": "Loja da rota.",
                "shop_data": { "sells": [1, 2], "buys": [{ "item_id": 3, "price": 150 }] } }
          ] },
        { "id": "town", "name": "Seira Town", "type": "city", "spawns": null },
        { "id": "debug-room", "name": "Debug Room", "type": "landmark" }
    ])
}

pub fn objects() -> Value {
    json!([
        { "id": "oran-tree", "name": "Oran Tree", "type": "berry_tree", "cooldown_hours": 24,
          "loot": { "common": [{ "item_id": 1 }], "rare": [{ "item_id": 3 }] } },
        { "id": "lake-spot", "name": "Lake", "type": "fishing_spot",
          "loot": { "common": [{ "pokemon_id": 129, "rate": 70 }], "epic": [{ "pokemon_id": 5, "rate": 2.5 }],
                    "items": { "common": [{ "item_id": 3, "rate": 15 }], "rare": null } } },
        { "id": "fire-altar", "name": "Fire Altar", "type": "evolution_location",
          "loot": { "linked_pokemon": [37, 999] } }
    ])
}

pub fn documents() -> HashMap<CollectionKind, String> {
    [
        (CollectionKind::Creatures, creatures()),
        (CollectionKind::Moves, moves()),
        (CollectionKind::Abilities, abilities()),
        (CollectionKind::Items, items()),
        (CollectionKind::Maps, maps()),
        (CollectionKind::Objects, objects()),
    ]
    .into_iter()
    .map(|(kind, value)| (kind, value.to_string()))
    .collect()
}

pub fn document(kind: CollectionKind) -> Value {
    match kind {
        CollectionKind::Creatures => creatures(),
        CollectionKind::Moves => moves(),
        CollectionKind::Abilities => abilities(),
        CollectionKind::Items => items(),
        CollectionKind::Maps => maps(),
        CollectionKind::Objects => objects(),
    }
}

pub fn catalog() -> Catalog {
    Catalog::from_documents(&documents()).unwrap()
}
