use serde::Serialize;

use super::helpers::dex_number;
use super::resolve::{
    self, AbilityHolder, EvolutionPath, ForageItem, HeldItemRef, Ingredient, ItemHolder,
    LeveledMove, LootCreature, LootItem, LootSource, MoveLearner, ObjectEncounter, ProducedItem,
    RecipeUse, ShopOffer, ShopStock, Spawn, SpawnLocation,
};
use crate::catalog::{
    Ability, AbilitySlot, Catalog, CollectionKind, Creature, CreatureId, InteractiveObject, Item,
    MapArea, Move,
};

/// Everything a creature's detail view shows.
#[derive(Debug, Clone, Serialize)]
pub struct CreatureDetail<'a> {
    pub creature: &'a Creature,
    pub dex_number: CreatureId,
    pub base: Option<&'a Creature>,
    pub alternate_forms: Vec<&'a Creature>,
    pub regional_variants: Vec<&'a Creature>,
    pub abilities: Vec<(AbilitySlot, &'a Ability)>,
    pub level_moves: Vec<LeveledMove<'a>>,
    pub learnable_moves: Vec<&'a Move>,
    pub egg_moves: Vec<&'a Move>,
    pub locations: Vec<SpawnLocation<'a>>,
    pub objects: Vec<ObjectEncounter<'a>>,
    pub evolution: Vec<EvolutionPath<'a>>,
    pub evolution_items: Vec<&'a Item>,
    pub production: Vec<ProducedItem<'a>>,
    pub held_items: Vec<HeldItemRef<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemDetail<'a> {
    pub item: &'a Item,
    pub tm_move: Option<&'a Move>,
    pub linked_creatures: Vec<&'a Creature>,
    pub unlocked_recipes: Vec<&'a Item>,
    pub unlocked_by: Vec<&'a Item>,
    pub recipe: Vec<Ingredient<'a>>,
    pub used_in: Vec<RecipeUse<'a>>,
    pub forage_locations: Vec<&'a MapArea>,
    pub loot_sources: Vec<LootSource<'a>>,
    pub held_by: Vec<ItemHolder<'a>>,
    pub produced_by: Vec<&'a Creature>,
    pub shops: Vec<ShopOffer<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoveDetail<'a> {
    #[serde(rename = "move")]
    pub mv: &'a Move,
    pub learners: Vec<MoveLearner<'a>>,
    pub tms: Vec<&'a Item>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AbilityDetail<'a> {
    pub ability: &'a Ability,
    pub holders: Vec<AbilityHolder<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapDetail<'a> {
    pub map: &'a MapArea,
    pub spawns: Vec<Spawn<'a>>,
    pub forageable_items: Vec<ForageItem<'a>>,
    pub objects: Vec<&'a InteractiveObject>,
    pub shops: Vec<ShopStock<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectDetail<'a> {
    pub object: &'a InteractiveObject,
    pub loot_items: Vec<LootItem<'a>>,
    pub creatures: Vec<LootCreature<'a>>,
    pub locations: Vec<&'a MapArea>,
}

pub fn open_creature(catalog: &Catalog, id: CreatureId) -> Option<CreatureDetail<'_>> {
    let creature = catalog.creatures.get(&id)?;
    Some(CreatureDetail {
        creature,
        dex_number: dex_number(creature),
        base: resolve::base_form(catalog, creature),
        alternate_forms: resolve::alternate_forms(catalog, creature),
        regional_variants: resolve::regional_variants(catalog, creature),
        abilities: resolve::creature_abilities(catalog, creature),
        level_moves: resolve::level_moves(catalog, creature),
        learnable_moves: resolve::learnable_moves(catalog, creature),
        egg_moves: resolve::egg_moves(catalog, creature),
        locations: resolve::spawn_locations(catalog, creature),
        objects: resolve::creature_objects(catalog, creature),
        evolution: resolve::evolution_chain(catalog, creature),
        evolution_items: resolve::evolution_items(catalog, creature),
        production: resolve::produced_items(catalog, creature),
        held_items: resolve::held_items(catalog, creature),
    })
}

pub fn open_item(catalog: &Catalog, id: u32) -> Option<ItemDetail<'_>> {
    let item = catalog.items.get(&id)?;
    Some(ItemDetail {
        item,
        tm_move: resolve::tm_move(catalog, item),
        linked_creatures: resolve::linked_creatures(catalog, item),
        unlocked_recipes: resolve::unlocked_recipes(catalog, item),
        unlocked_by: resolve::unlocked_by(catalog, item),
        recipe: resolve::recipe(catalog, item),
        used_in: resolve::used_in(catalog, item),
        forage_locations: resolve::forage_locations(catalog, item),
        loot_sources: resolve::item_loot_sources(catalog, item),
        held_by: resolve::item_holders(catalog, item),
        produced_by: resolve::item_producers(catalog, item),
        shops: resolve::item_shops(catalog, item),
    })
}

pub fn open_move(catalog: &Catalog, id: u32) -> Option<MoveDetail<'_>> {
    let mv = catalog.moves.get(&id)?;
    Some(MoveDetail {
        mv,
        learners: resolve::move_learners(catalog, mv),
        tms: resolve::move_tms(catalog, mv),
    })
}

pub fn open_ability(catalog: &Catalog, id: u32) -> Option<AbilityDetail<'_>> {
    let ability = catalog.abilities.get(&id)?;
    Some(AbilityDetail {
        ability,
        holders: resolve::ability_holders(catalog, ability),
    })
}

pub fn open_map<'a>(catalog: &'a Catalog, id: &str) -> Option<MapDetail<'a>> {
    let map = catalog.maps.get(id)?;
    Some(MapDetail {
        map,
        spawns: resolve::map_spawns(catalog, map),
        forageable_items: resolve::forageable_items(catalog, map),
        objects: resolve::map_objects(catalog, map),
        shops: resolve::map_shops(catalog, map),
    })
}

pub fn open_object<'a>(catalog: &'a Catalog, id: &str) -> Option<ObjectDetail<'a>> {
    let object = catalog.objects.get(id)?;
    Some(ObjectDetail {
        object,
        loot_items: resolve::object_loot_items(catalog, object),
        creatures: resolve::object_creatures(catalog, object),
        locations: resolve::object_locations(catalog, object),
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Detail<'a> {
    Creature(CreatureDetail<'a>),
    Item(ItemDetail<'a>),
    Move(MoveDetail<'a>),
    Ability(AbilityDetail<'a>),
    Map(MapDetail<'a>),
    Object(ObjectDetail<'a>),
}

/// Open any record from an id given as text. Numeric collections also accept
/// an exact name.
pub fn open<'a>(catalog: &'a Catalog, kind: CollectionKind, id: &str) -> Option<Detail<'a>> {
    let id = id.trim();
    match kind {
        CollectionKind::Creatures => {
            let id = numeric_id(id).or_else(|| catalog.creatures.find_by_name(id).map(|c| c.id))?;
            open_creature(catalog, id).map(Detail::Creature)
        }
        CollectionKind::Items => {
            let id = numeric_id(id).or_else(|| catalog.items.find_by_name(id).map(|i| i.id))?;
            open_item(catalog, id).map(Detail::Item)
        }
        CollectionKind::Moves => {
            let id = numeric_id(id).or_else(|| catalog.moves.find_by_name(id).map(|m| m.id))?;
            open_move(catalog, id).map(Detail::Move)
        }
        CollectionKind::Abilities => {
            let id = numeric_id(id).or_else(|| catalog.abilities.find_by_name(id).map(|a| a.id))?;
            open_ability(catalog, id).map(Detail::Ability)
        }
        CollectionKind::Maps => open_map(catalog, id).map(Detail::Map),
        CollectionKind::Objects => open_object(catalog, id).map(Detail::Object),
    }
}

fn numeric_id(text: &str) -> Option<u32> {
    text.trim_start_matches('#').parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Collection;
    use serde_json::json;
    use std::sync::Arc;

    fn catalog() -> Catalog {
        let creatures: Vec<Creature> = serde_json::from_value(json!([
            { "id": 25, "name": "Pikachu", "types": ["Electric"] }
        ]))
        .unwrap();
        Catalog {
            creatures: Arc::new(Collection::from_records(creatures).unwrap()),
            ..Catalog::default()
        }
    }

    #[test]
    fn missing_ids_open_nothing() {
        let catalog = catalog();
        assert!(open_creature(&catalog, 26).is_none());
        assert!(open_map(&catalog, "nowhere").is_none());
        assert!(open(&catalog, CollectionKind::Items, "1").is_none());
    }

    #[test]
    fn open_accepts_ids_and_names() {
        let catalog = catalog();
        assert!(matches!(
            open(&catalog, CollectionKind::Creatures, "#25"),
            Some(Detail::Creature(d)) if d.dex_number == 25
        ));
        assert!(matches!(
            open(&catalog, CollectionKind::Creatures, "pikachu"),
            Some(Detail::Creature(_))
        ));
    }
}
