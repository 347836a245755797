//! Cross-collection lookups. Every function is a pure read of the catalog;
//! references that point at nothing are dropped from the result.

use std::collections::HashSet;

use serde::Serialize;

use super::helpers::eq_ci;
use crate::catalog::{
    Ability, AbilitySlot, Catalog, Creature, CreatureId, FormKind, InteractiveObject, Item,
    LootDrop, MapArea, Move, Tier,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeveledMove<'a> {
    pub level: u32,
    pub learned: &'a Move,
}

/// How one creature learns a given move. At least one flavour is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveLearner<'a> {
    pub creature: &'a Creature,
    pub level: Option<u32>,
    pub learnable: bool,
    pub egg: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbilityHolder<'a> {
    pub creature: &'a Creature,
    pub slot: AbilitySlot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeldItemRef<'a> {
    pub item: &'a Item,
    /// Drop chance in percent.
    pub chance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemHolder<'a> {
    pub creature: &'a Creature,
    pub chance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProducedItem<'a> {
    pub item: Option<&'a Item>,
    pub description: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpawnLocation<'a> {
    pub map: &'a MapArea,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spawn<'a> {
    pub creature: &'a Creature,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LootItem<'a> {
    pub item: &'a Item,
    pub tier: Tier,
    pub rate: Option<f32>,
}

/// An item gathered on a map; the map's post cost wins over the item's own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForageItem<'a> {
    pub item: &'a Item,
    pub posts_to_collect: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LootSource<'a> {
    pub object: &'a InteractiveObject,
    pub tier: Tier,
}

/// A creature tied to an object, tiered when it comes from a fishing table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LootCreature<'a> {
    pub creature: &'a Creature,
    pub tier: Option<Tier>,
    pub rate: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectEncounter<'a> {
    pub object: &'a InteractiveObject,
    pub tier: Option<Tier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient<'a> {
    pub item: &'a Item,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeUse<'a> {
    pub product: &'a Item,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionStep<'a> {
    pub to_name: &'a str,
    pub to: Option<&'a Creature>,
    pub method: &'a str,
    pub condition: &'a str,
    /// Set when the method is `item` and the condition names a known item.
    pub item: Option<&'a Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionPath<'a> {
    pub stage: u32,
    pub name: &'a str,
    pub creature: Option<&'a Creature>,
    pub evolutions: Vec<EvolutionStep<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuyListing<'a> {
    pub item: &'a Item,
    pub price: Option<u32>,
    pub requires_fame: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopStock<'a> {
    pub name: &'a str,
    pub sells: Vec<&'a Item>,
    pub buys: Vec<BuyListing<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopOffer<'a> {
    pub map: &'a MapArea,
    pub shop: &'a str,
    pub sells: bool,
    /// What the shop pays for the item, if it buys it.
    pub buys_for: Option<Option<u32>>,
}

////////////////////////////
/// CREATURE <-> MOVE    ///
////////////////////////////

pub fn level_moves<'a>(catalog: &'a Catalog, creature: &'a Creature) -> Vec<LeveledMove<'a>> {
    creature
        .moveset_by_level
        .iter()
        .filter_map(|lm| {
            catalog.moves.find_by_name(&lm.move_name).map(|m| LeveledMove {
                level: lm.level,
                learned: m,
            })
        })
        .collect()
}

pub fn learnable_moves<'a>(catalog: &'a Catalog, creature: &Creature) -> Vec<&'a Move> {
    moves_by_name(catalog, &creature.learnable_moves)
}

pub fn egg_moves<'a>(catalog: &'a Catalog, creature: &Creature) -> Vec<&'a Move> {
    moves_by_name(catalog, &creature.egg_moves)
}

fn moves_by_name<'a>(catalog: &'a Catalog, names: &[String]) -> Vec<&'a Move> {
    names
        .iter()
        .filter_map(|name| catalog.moves.find_by_name(name))
        .collect()
}

/// Every creature that learns `mv`, in creature order.
pub fn move_learners<'a>(catalog: &'a Catalog, mv: &Move) -> Vec<MoveLearner<'a>> {
    catalog
        .creatures
        .iter()
        .filter_map(|creature| {
            let level = creature
                .moveset_by_level
                .iter()
                .find(|lm| eq_ci(&lm.move_name, &mv.name))
                .map(|lm| lm.level);
            let learnable = creature.learnable_moves.iter().any(|n| eq_ci(n, &mv.name));
            let egg = creature.egg_moves.iter().any(|n| eq_ci(n, &mv.name));

            (level.is_some() || learnable || egg).then_some(MoveLearner {
                creature,
                level,
                learnable,
                egg,
            })
        })
        .collect()
}

////////////////////////////
/// CREATURE <-> ABILITY ///
////////////////////////////

pub fn creature_abilities<'a>(
    catalog: &'a Catalog,
    creature: &Creature,
) -> Vec<(AbilitySlot, &'a Ability)> {
    creature
        .abilities
        .iter()
        .filter_map(|(slot, name)| catalog.abilities.find_by_name(name).map(|a| (slot, a)))
        .collect()
}

pub fn ability_holders<'a>(catalog: &'a Catalog, ability: &Ability) -> Vec<AbilityHolder<'a>> {
    catalog
        .creatures
        .iter()
        .flat_map(|creature| {
            creature
                .abilities
                .iter()
                .filter(|(_, name)| eq_ci(name, &ability.name))
                .map(move |(slot, _)| AbilityHolder { creature, slot })
        })
        .collect()
}

////////////////////////////
/// CREATURE <-> ITEM    ///
////////////////////////////

/// Held items resolve by id, or by name when the entry has no id.
pub fn held_items<'a>(catalog: &'a Catalog, creature: &Creature) -> Vec<HeldItemRef<'a>> {
    creature
        .held_items
        .iter()
        .filter_map(|held| {
            let item = match (held.item_id, held.item_name.as_deref()) {
                (Some(id), _) => catalog.items.get(&id),
                (None, Some(name)) => catalog.items.find_by_name(name),
                (None, None) => None,
            }?;
            Some(HeldItemRef {
                item,
                chance: held.rarity,
            })
        })
        .collect()
}

pub fn item_holders<'a>(catalog: &'a Catalog, item: &Item) -> Vec<ItemHolder<'a>> {
    catalog
        .creatures
        .iter()
        .filter_map(|creature| {
            creature
                .held_items
                .iter()
                .find(|held| match (held.item_id, held.item_name.as_deref()) {
                    (Some(id), _) => id == item.id,
                    (None, Some(name)) => eq_ci(name, &item.name),
                    (None, None) => false,
                })
                .map(|held| ItemHolder {
                    creature,
                    chance: held.rarity,
                })
        })
        .collect()
}

/// Production entries of a producer. Entries without an item keep their
/// description; entries naming a missing item are dropped.
pub fn produced_items<'a>(catalog: &'a Catalog, creature: &'a Creature) -> Vec<ProducedItem<'a>> {
    if !creature.is_producer {
        return Vec::new();
    }
    creature
        .production
        .iter()
        .filter_map(|p| match p.item_id {
            Some(id) => catalog.items.get(&id).map(|item| ProducedItem {
                item: Some(item),
                description: &p.description,
            }),
            None => Some(ProducedItem {
                item: None,
                description: &p.description,
            }),
        })
        .collect()
}

pub fn item_producers<'a>(catalog: &'a Catalog, item: &Item) -> Vec<&'a Creature> {
    catalog
        .creatures
        .iter()
        .filter(|c| c.is_producer && c.production.iter().any(|p| p.item_id == Some(item.id)))
        .collect()
}

////////////////////////////
/// CREATURE <-> MAP     ///
////////////////////////////

/// Maps where `creature` spawns. Highest tier wins within one map.
pub fn spawn_locations<'a>(catalog: &'a Catalog, creature: &Creature) -> Vec<SpawnLocation<'a>> {
    catalog
        .maps
        .iter()
        .filter_map(|map| {
            map.spawns
                .tier_of(&creature.id)
                .map(|tier| SpawnLocation { map, tier })
        })
        .collect()
}

/// Creatures spawning on `map`, each once, in first-appearance order.
pub fn map_spawns<'a>(catalog: &'a Catalog, map: &MapArea) -> Vec<Spawn<'a>> {
    let mut seen: HashSet<CreatureId> = HashSet::new();
    map.spawns
        .iter()
        .filter(|(_, id)| seen.insert(**id))
        .filter_map(|(_, id)| {
            let tier = map.spawns.tier_of(id)?;
            catalog
                .creatures
                .get(id)
                .map(|creature| Spawn { creature, tier })
        })
        .collect()
}

////////////////////////////
/// MAP <-> ITEM, OBJECT ///
////////////////////////////

pub fn forageable_items<'a>(catalog: &'a Catalog, map: &MapArea) -> Vec<ForageItem<'a>> {
    map.forageable_items
        .iter()
        .filter_map(|f| {
            catalog.items.get(&f.item_id).map(|item| ForageItem {
                item,
                posts_to_collect: f.posts_to_collect.or(item.posts_to_collect),
            })
        })
        .collect()
}

pub fn forage_locations<'a>(catalog: &'a Catalog, item: &Item) -> Vec<&'a MapArea> {
    catalog
        .maps
        .iter()
        .filter(|m| m.forageable_items.iter().any(|f| f.item_id == item.id))
        .collect()
}

pub fn map_objects<'a>(catalog: &'a Catalog, map: &MapArea) -> Vec<&'a InteractiveObject> {
    map.interaction_objects
        .iter()
        .filter_map(|id| catalog.objects.get(id.as_str()))
        .collect()
}

pub fn object_locations<'a>(catalog: &'a Catalog, object: &InteractiveObject) -> Vec<&'a MapArea> {
    catalog
        .maps
        .iter()
        .filter(|m| m.interaction_objects.iter().any(|id| *id == object.id))
        .collect()
}

////////////////////////////
/// OBJECT <-> ITEM      ///
////////////////////////////

pub fn object_loot_items<'a>(catalog: &'a Catalog, object: &InteractiveObject) -> Vec<LootItem<'a>> {
    object
        .loot
        .item_drops()
        .into_iter()
        .filter_map(|(tier, drop)| {
            catalog.items.get(&drop.id).map(|item| LootItem {
                item,
                tier,
                rate: drop.rate,
            })
        })
        .collect()
}

/// Objects dropping `item`, each with the highest tier it drops in.
pub fn item_loot_sources<'a>(catalog: &'a Catalog, item: &Item) -> Vec<LootSource<'a>> {
    catalog
        .objects
        .iter()
        .filter_map(|object| {
            object
                .loot
                .items()
                .into_iter()
                .filter(|(_, id)| *id == item.id)
                .map(|(tier, _)| tier)
                .max()
                .map(|tier| LootSource { object, tier })
        })
        .collect()
}

////////////////////////////
/// OBJECT <-> CREATURE  ///
////////////////////////////

/// Fishing loot first, then creatures linked on the loot or on the object.
pub fn object_creatures<'a>(
    catalog: &'a Catalog,
    object: &InteractiveObject,
) -> Vec<LootCreature<'a>> {
    let mut seen: HashSet<CreatureId> = HashSet::new();
    let mut out = Vec::new();

    let linked = object
        .linked_pokemon
        .iter()
        .map(|id| (None, LootDrop::new(*id, None)));
    for (tier, drop) in object.loot.creature_drops().into_iter().chain(linked) {
        if !seen.insert(drop.id) {
            continue;
        }
        if let Some(creature) = catalog.creatures.get(&drop.id) {
            out.push(LootCreature {
                creature,
                tier,
                rate: drop.rate,
            });
        }
    }
    out
}

pub fn creature_objects<'a>(catalog: &'a Catalog, creature: &Creature) -> Vec<ObjectEncounter<'a>> {
    catalog
        .objects
        .iter()
        .filter_map(|object| {
            let tiers: Vec<Option<Tier>> = object
                .loot
                .creatures()
                .into_iter()
                .filter(|(_, id)| *id == creature.id)
                .map(|(tier, _)| tier)
                .collect();

            if let Some(tier) = tiers.iter().flatten().max() {
                Some(ObjectEncounter {
                    object,
                    tier: Some(*tier),
                })
            } else if !tiers.is_empty() || object.linked_pokemon.contains(&creature.id) {
                Some(ObjectEncounter { object, tier: None })
            } else {
                None
            }
        })
        .collect()
}

////////////////////////////
/// ITEM <-> ITEM        ///
////////////////////////////

/// Ingredients of a craftable item.
pub fn recipe<'a>(catalog: &'a Catalog, item: &Item) -> Vec<Ingredient<'a>> {
    if !item.is_craftable {
        return Vec::new();
    }
    item.craft_recipe
        .iter()
        .filter_map(|entry| {
            catalog.items.get(&entry.item_id).map(|ingredient| Ingredient {
                item: ingredient,
                quantity: entry.quantity,
            })
        })
        .collect()
}

/// Craftable items that consume `item`.
pub fn used_in<'a>(catalog: &'a Catalog, item: &Item) -> Vec<RecipeUse<'a>> {
    catalog
        .items
        .iter()
        .filter(|product| product.is_craftable)
        .filter_map(|product| {
            product
                .craft_recipe
                .iter()
                .find(|entry| entry.item_id == item.id)
                .map(|entry| RecipeUse {
                    product,
                    quantity: entry.quantity,
                })
        })
        .collect()
}

/// Recipes a book teaches.
pub fn unlocked_recipes<'a>(catalog: &'a Catalog, item: &Item) -> Vec<&'a Item> {
    if !item.is_book {
        return Vec::new();
    }
    item.unlocks_recipes
        .iter()
        .filter_map(|id| catalog.items.get(id))
        .collect()
}

/// Books that teach the recipe of `item`.
pub fn unlocked_by<'a>(catalog: &'a Catalog, item: &Item) -> Vec<&'a Item> {
    catalog
        .items
        .iter()
        .filter(|book| book.is_book && book.unlocks_recipes.contains(&item.id))
        .collect()
}

////////////////////////////
/// ITEM <-> CREATURE,MOVE ///
////////////////////////////

fn is_evolution_item(item: &Item) -> bool {
    eq_ci(&item.category, "evolution-item")
}

/// Creatures an evolution item unlocks; other categories link nothing.
pub fn linked_creatures<'a>(catalog: &'a Catalog, item: &Item) -> Vec<&'a Creature> {
    if !is_evolution_item(item) {
        return Vec::new();
    }
    item.linked_pokemon
        .iter()
        .filter_map(|id| catalog.creatures.get(id))
        .collect()
}

pub fn evolution_items<'a>(catalog: &'a Catalog, creature: &Creature) -> Vec<&'a Item> {
    catalog
        .items
        .iter()
        .filter(|item| is_evolution_item(item) && item.linked_pokemon.contains(&creature.id))
        .collect()
}

pub fn tm_move<'a>(catalog: &'a Catalog, item: &Item) -> Option<&'a Move> {
    item.linked_move.and_then(|id| catalog.moves.get(&id))
}

pub fn move_tms<'a>(catalog: &'a Catalog, mv: &Move) -> Vec<&'a Item> {
    catalog
        .items
        .iter()
        .filter(|item| item.linked_move == Some(mv.id))
        .collect()
}

////////////////////////////
/// CREATURE <-> CREATURE ///
////////////////////////////

fn forms_of<'a>(
    catalog: &'a Catalog,
    creature: &Creature,
    wanted: impl Fn(FormKind) -> bool,
) -> Vec<&'a Creature> {
    catalog
        .creatures
        .iter()
        .filter(|form| {
            form.form_of == Some(creature.id)
                && !form.base_form
                && form.form_kind().is_some_and(&wanted)
        })
        .collect()
}

/// Mega and gigantamax forms of a base creature.
pub fn alternate_forms<'a>(catalog: &'a Catalog, creature: &Creature) -> Vec<&'a Creature> {
    forms_of(catalog, creature, |k| {
        matches!(k, FormKind::Mega | FormKind::Gigantamax)
    })
}

pub fn regional_variants<'a>(catalog: &'a Catalog, creature: &Creature) -> Vec<&'a Creature> {
    forms_of(catalog, creature, |k| k == FormKind::Regional)
}

pub fn base_form<'a>(catalog: &'a Catalog, creature: &Creature) -> Option<&'a Creature> {
    creature.form_of.and_then(|id| catalog.creatures.get(&id))
}

/// Evolution chain ordered by stage. Names that match no creature are kept
/// as text with `creature: None`.
pub fn evolution_chain<'a>(catalog: &'a Catalog, creature: &'a Creature) -> Vec<EvolutionPath<'a>> {
    let mut stages: Vec<EvolutionPath<'a>> = creature
        .evolution_chain
        .iter()
        .map(|stage| EvolutionPath {
            stage: stage.stage,
            name: &stage.pokemon,
            creature: catalog.creatures.find_by_name(&stage.pokemon),
            evolutions: stage
                .evolutions
                .iter()
                .map(|evo| EvolutionStep {
                    to_name: &evo.to,
                    to: catalog.creatures.find_by_name(&evo.to),
                    method: &evo.method,
                    condition: &evo.condition,
                    item: if eq_ci(&evo.method, "item") {
                        catalog.items.find_by_name(&evo.condition)
                    } else {
                        None
                    },
                })
                .collect(),
        })
        .collect();

    stages.sort_by_key(|s| s.stage);
    stages
}

////////////////////////////
/// MAP SHOPS            ///
////////////////////////////

pub fn map_shops<'a>(catalog: &'a Catalog, map: &'a MapArea) -> Vec<ShopStock<'a>> {
    map.points_of_interest
        .iter()
        .filter_map(|poi| {
            let shop = poi.shop_data.as_ref()?;
            Some(ShopStock {
                name: &poi.name,
                sells: shop
                    .sells
                    .iter()
                    .filter_map(|id| catalog.items.get(id))
                    .collect(),
                buys: shop
                    .buys
                    .iter()
                    .filter_map(|offer| {
                        catalog.items.get(&offer.item_id).map(|item| BuyListing {
                            item,
                            price: offer.price,
                            requires_fame: offer.requires_fame,
                        })
                    })
                    .collect(),
            })
        })
        .collect()
}

/// Map shops that sell or buy `item`.
pub fn item_shops<'a>(catalog: &'a Catalog, item: &Item) -> Vec<ShopOffer<'a>> {
    catalog
        .maps
        .iter()
        .flat_map(|map| {
            map.points_of_interest.iter().filter_map(move |poi| {
                let shop = poi.shop_data.as_ref()?;
                let sells = shop.sells.contains(&item.id);
                let buys_for = shop
                    .buys
                    .iter()
                    .find(|b| b.item_id == item.id)
                    .map(|b| b.price);
                (sells || buys_for.is_some()).then_some(ShopOffer {
                    map,
                    shop: &poi.name,
                    sells,
                    buys_for,
                })
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Collection;
    use serde_json::json;
    use std::sync::Arc;

    fn collection<T>(value: serde_json::Value) -> Arc<Collection<T>>
    where
        T: crate::catalog::Record + serde::de::DeserializeOwned,
    {
        let records: Vec<T> = serde_json::from_value(value).unwrap();
        Arc::new(Collection::from_records(records).unwrap())
    }

    fn catalog() -> Catalog {
        Catalog {
            creatures: collection(json!([
                { "id": 7, "name": "Squirtle", "types": ["Water"],
                  "moveset_by_level": [{ "level": 1, "move": "Tackle" }, { "level": 9, "move": "Water Gun" }],
                  "egg_moves": ["Mirror Coat", "Ghost Move"],
                  "abilities": { "normal": "Torrent", "hidden": "Rain Dish" },
                  "held_items": [{ "item_name": "mystic water", "rarity": 5.0 }, { "item_id": 999, "rarity": 1.0 }] },
                { "id": 129, "name": "Magikarp", "types": ["Water"],
                  "learnable_moves": ["Tackle"], "abilities": { "normal": ["Swift Swim"], "hidden": "Rattled" } },
                { "id": 10010, "name": "Mega Squirtle", "types": ["Water"], "form_of": 7,
                  "base_form": false, "form_type": "mega" }
            ])),
            moves: collection(json!([
                { "id": 33, "name": "Tackle", "type": "Normal" },
                { "id": 55, "name": "Water Gun", "type": "Water" },
                { "id": 68, "name": "Mirror Coat", "type": "Psychic" }
            ])),
            abilities: collection(json!([
                { "id": 67, "name": "Torrent" },
                { "id": 44, "name": "Rain Dish" }
            ])),
            items: collection(json!([
                { "id": 1, "name": "Mystic Water" },
                { "id": 2, "name": "Old Rod", "is_craftable": true,
                  "craft_recipe": [{ "item_id": 3, "quantity": 2 }, { "item_id": 404 }] },
                { "id": 3, "name": "Stick", "forageable": true, "posts_to_collect": 2 },
                { "id": 4, "name": "TM Tackle", "category": "tm", "linked_move": 33 },
                { "id": 5, "name": "Water Stone", "category": "Evolution-Item", "linked_pokemon": [129] },
                { "id": 6, "name": "Lake Map", "category": "key-item", "linked_pokemon": [7] }
            ])),
            maps: collection(json!([
                { "id": "lake", "name": "Lake", "spawns": { "common": [129, 7], "epic": [7] },
                  "forageable_items": [{ "item_id": 3 }], "interaction_objects": ["pond", "ghost"] }
            ])),
            objects: collection(json!([
                { "id": "pond", "name": "Pond", "type": "fishing_spot",
                  "loot": { "common": [{ "pokemon_id": 129, "rate": 80 }], "rare": [{ "pokemon_id": 129 }],
                            "items": { "rare": [{ "item_id": 3, "rate": 12.5 }] } } }
            ])),
        }
    }

    #[test]
    fn moves_resolve_both_ways() {
        let catalog = catalog();
        let squirtle = catalog.creatures.get(&7).unwrap();

        let by_level: Vec<(u32, &str)> = level_moves(&catalog, squirtle)
            .iter()
            .map(|lm| (lm.level, lm.learned.name.as_str()))
            .collect();
        assert_eq!(by_level, vec![(1, "Tackle"), (9, "Water Gun")]);

        let eggs: Vec<u32> = egg_moves(&catalog, squirtle).iter().map(|m| m.id).collect();
        assert_eq!(eggs, vec![68], "unknown egg move is dropped");

        let tackle = catalog.moves.get(&33).unwrap();
        let learners = move_learners(&catalog, tackle);
        assert_eq!(learners.len(), 2);
        assert_eq!(learners[0].level, Some(1));
        assert!(learners[1].learnable && learners[1].level.is_none());

        let tms: Vec<u32> = move_tms(&catalog, tackle).iter().map(|i| i.id).collect();
        assert_eq!(tms, vec![4]);
    }

    #[test]
    fn abilities_and_held_items() {
        let catalog = catalog();
        let squirtle = catalog.creatures.get(&7).unwrap();

        let slots: Vec<(AbilitySlot, u32)> = creature_abilities(&catalog, squirtle)
            .iter()
            .map(|(slot, a)| (*slot, a.id))
            .collect();
        assert_eq!(slots, vec![(AbilitySlot::Normal, 67), (AbilitySlot::Hidden, 44)]);

        let held = held_items(&catalog, squirtle);
        assert_eq!(held.len(), 1, "missing item id is dropped");
        assert_eq!(held[0].item.id, 1, "name lookup is case-insensitive");

        let mystic = catalog.items.get(&1).unwrap();
        assert_eq!(item_holders(&catalog, mystic)[0].creature.id, 7);
    }

    #[test]
    fn spawns_report_the_highest_tier() {
        let catalog = catalog();
        let squirtle = catalog.creatures.get(&7).unwrap();

        let locations = spawn_locations(&catalog, squirtle);
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].tier, Tier::Epic);

        let lake = catalog.maps.get("lake").unwrap();
        let spawns: Vec<(u32, Tier)> = map_spawns(&catalog, lake)
            .iter()
            .map(|s| (s.creature.id, s.tier))
            .collect();
        assert_eq!(spawns, vec![(129, Tier::Common), (7, Tier::Epic)]);
    }

    #[test]
    fn fishing_spot_links_items_creatures_and_maps() {
        let catalog = catalog();
        let pond = catalog.objects.get("pond").unwrap();
        let stick = catalog.items.get(&3).unwrap();
        let magikarp = catalog.creatures.get(&129).unwrap();

        let loot = object_loot_items(&catalog, pond);
        assert_eq!((loot[0].tier, loot[0].rate), (Tier::Rare, Some(12.5)));
        assert_eq!(item_loot_sources(&catalog, stick)[0].object.id, "pond");

        let creatures = object_creatures(&catalog, pond);
        assert_eq!(creatures.len(), 1, "a creature in two tiers is listed once");
        assert_eq!(creatures[0].tier, Some(Tier::Common));
        assert_eq!(creatures[0].rate, Some(80.0), "the first listing keeps its rate");

        let encounters = creature_objects(&catalog, magikarp);
        assert_eq!(encounters[0].tier, Some(Tier::Rare));

        let lake = catalog.maps.get("lake").unwrap();
        assert_eq!(map_objects(&catalog, lake).len(), 1, "unknown object id is dropped");
        assert_eq!(object_locations(&catalog, pond)[0].id, "lake");
        assert_eq!(forage_locations(&catalog, stick)[0].id, "lake");
        let forage = forageable_items(&catalog, lake);
        assert_eq!(forage[0].item.id, 3);
        assert_eq!(forage[0].posts_to_collect, Some(2), "falls back to the item's cost");
    }

    #[test]
    fn recipes_and_forms() {
        let catalog = catalog();
        let rod = catalog.items.get(&2).unwrap();
        let stick = catalog.items.get(&3).unwrap();

        let ingredients = recipe(&catalog, rod);
        assert_eq!(ingredients.len(), 1);
        assert_eq!((ingredients[0].item.id, ingredients[0].quantity), (3, 2));

        let uses = used_in(&catalog, stick);
        assert_eq!(uses[0].product.id, 2);

        let tm = catalog.items.get(&4).unwrap();
        assert_eq!(tm_move(&catalog, tm).map(|m| m.id), Some(33));

        let squirtle = catalog.creatures.get(&7).unwrap();
        let forms: Vec<u32> = alternate_forms(&catalog, squirtle).iter().map(|c| c.id).collect();
        assert_eq!(forms, vec![10010]);
        assert!(regional_variants(&catalog, squirtle).is_empty());
    }

    #[test]
    fn only_evolution_items_link_creatures() {
        let catalog = catalog();
        let stone = catalog.items.get(&5).unwrap();
        let key = catalog.items.get(&6).unwrap();

        let linked: Vec<u32> = linked_creatures(&catalog, stone).iter().map(|c| c.id).collect();
        assert_eq!(linked, vec![129], "category match ignores case");
        assert!(linked_creatures(&catalog, key).is_empty());

        let squirtle = catalog.creatures.get(&7).unwrap();
        assert!(evolution_items(&catalog, squirtle).is_empty());
        let magikarp = catalog.creatures.get(&129).unwrap();
        assert_eq!(evolution_items(&catalog, magikarp)[0].id, 5);
    }
}
