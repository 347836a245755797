use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::Catalog;

/// Type options offered for creatures and moves.
pub const CREATURE_TYPES: [&str; 18] = [
    "Bug", "Dark", "Dragon", "Electric", "Fairy", "Fighting", "Fire", "Flying", "Ghost", "Grass",
    "Ground", "Ice", "Normal", "Poison", "Psychic", "Rock", "Steel", "Water",
];

/// Distinct values for the filter drop-downs, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub creature_types: Vec<String>,
    pub item_categories: Vec<String>,
    pub item_rarities: Vec<String>,
    pub move_categories: Vec<String>,
    pub move_classes: Vec<String>,
    pub map_types: Vec<String>,
    pub map_biomes: Vec<String>,
    pub object_types: Vec<String>,
}

impl Facets {
    pub fn collect(catalog: &Catalog) -> Self {
        Facets {
            creature_types: CREATURE_TYPES.iter().map(|t| t.to_string()).collect(),
            item_categories: distinct(catalog.items.iter().map(|i| i.category.as_str())),
            item_rarities: distinct(catalog.items.iter().map(|i| i.rarity_or_default())),
            move_categories: distinct(catalog.moves.iter().map(|m| m.category.as_str())),
            move_classes: distinct(catalog.moves.iter().map(|m| m.move_class.as_str())),
            map_types: distinct(catalog.maps.iter().map(|m| m.map_type.as_str())),
            map_biomes: distinct(catalog.maps.iter().filter_map(|m| m.biome.as_deref())),
            object_types: distinct(catalog.objects.iter().map(|o| o.object_type.as_str())),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
