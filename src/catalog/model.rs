use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use super::loader::{AbilitySetsConfig, ObjectConfig, lenient_text, lenient_u32, null_as_default};

pub type CreatureId = u32;
pub type MoveId = u32;
pub type AbilityId = u32;
pub type ItemId = u32;
pub type MapId = String;
pub type ObjectId = String;

/// Creature ids at or above this value are alternate forms of a base species.
pub const FORM_ID_THRESHOLD: CreatureId = 10_000;

//////////////////////////////
/// COLLECTION KINDS       ///
//////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Creatures,
    Moves,
    Abilities,
    Items,
    Maps,
    Objects,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 6] = [
        CollectionKind::Creatures,
        CollectionKind::Moves,
        CollectionKind::Abilities,
        CollectionKind::Items,
        CollectionKind::Maps,
        CollectionKind::Objects,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKind::Creatures => "creatures",
            CollectionKind::Moves => "moves",
            CollectionKind::Abilities => "abilities",
            CollectionKind::Items => "items",
            CollectionKind::Maps => "maps",
            CollectionKind::Objects => "objects",
        }
    }

    /// File name of this collection's document in the upstream repository.
    pub fn document_name(self) -> &'static str {
        match self {
            CollectionKind::Creatures => "pokemon.json",
            CollectionKind::Moves => "moves.json",
            CollectionKind::Abilities => "abilities.json",
            CollectionKind::Items => "items.json",
            CollectionKind::Maps => "maps.json",
            CollectionKind::Objects => "objects.json",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "creatures" | "creature" | "pokemon" => Ok(CollectionKind::Creatures),
            "moves" | "move" => Ok(CollectionKind::Moves),
            "abilities" | "ability" => Ok(CollectionKind::Abilities),
            "items" | "item" => Ok(CollectionKind::Items),
            "maps" | "map" => Ok(CollectionKind::Maps),
            "objects" | "object" => Ok(CollectionKind::Objects),
            other => Err(format!("unknown collection '{}'", other)),
        }
    }
}

/// A record that lives in an id-indexed collection.
pub trait Record {
    type Id: Eq + Hash + Clone + fmt::Display + fmt::Debug;

    const KIND: CollectionKind;

    fn id(&self) -> &Self::Id;
    fn name(&self) -> &str;
}

//////////////////////////////
/// TIERS                  ///
//////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Common,
    Rare,
    Epic,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Common, Tier::Rare, Tier::Epic];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Common => "common",
            Tier::Rare => "rare",
            Tier::Epic => "epic",
        }
    }
}

/// Three rarity buckets of the same kind of entry (spawn tables, loot tables).
/// A missing or null bucket is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de>"))]
pub struct Tiered<T> {
    #[serde(deserialize_with = "null_as_default")]
    pub common: Vec<T>,
    #[serde(deserialize_with = "null_as_default")]
    pub rare: Vec<T>,
    #[serde(deserialize_with = "null_as_default")]
    pub epic: Vec<T>,
}

impl<T> Default for Tiered<T> {
    fn default() -> Self {
        Tiered {
            common: Vec::new(),
            rare: Vec::new(),
            epic: Vec::new(),
        }
    }
}

impl<T> Tiered<T> {
    pub fn get(&self, tier: Tier) -> &[T] {
        match tier {
            Tier::Common => &self.common,
            Tier::Rare => &self.rare,
            Tier::Epic => &self.epic,
        }
    }

    /// Entries in tier order, each tagged with its tier.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &T)> {
        Tier::ALL
            .into_iter()
            .flat_map(move |tier| self.get(tier).iter().map(move |entry| (tier, entry)))
    }

    pub fn is_empty(&self) -> bool {
        self.common.is_empty() && self.rare.is_empty() && self.epic.is_empty()
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Tiered<U> {
        Tiered {
            common: self.common.into_iter().map(&mut f).collect(),
            rare: self.rare.into_iter().map(&mut f).collect(),
            epic: self.epic.into_iter().map(&mut f).collect(),
        }
    }
}

impl<T: PartialEq> Tiered<T> {
    /// Highest tier holding `value`; a later tier overrides an earlier one.
    pub fn tier_of(&self, value: &T) -> Option<Tier> {
        Tier::ALL
            .into_iter()
            .rev()
            .find(|tier| self.get(*tier).contains(value))
    }
}

//////////////////////////////
/// CREATURES              ///
//////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rarity: String,
    #[serde(default = "default_true")]
    pub base_form: bool,
    #[serde(default)]
    pub form_type: Option<String>,
    #[serde(default)]
    pub form_of: Option<CreatureId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stats: Stats,
    #[serde(default, deserialize_with = "null_as_default")]
    pub abilities: AbilitySets,
    #[serde(default, deserialize_with = "null_as_default")]
    pub moveset_by_level: Vec<LevelMove>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub learnable_moves: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub egg_moves: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub held_items: Vec<HeldItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_producer: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub production: Vec<Production>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_starter: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_seira_pokedex: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub evolution_chain: Vec<EvolutionStage>,
    #[serde(default)]
    pub classification: Option<String>,
    #[serde(default)]
    pub dex_entry: Option<String>,
    #[serde(default)]
    pub artwork: Option<String>,
}

impl Creature {
    pub fn form_kind(&self) -> Option<FormKind> {
        self.form_type.as_deref().and_then(FormKind::parse)
    }

    pub fn is_alternate_form(&self) -> bool {
        !self.base_form && self.form_type.is_some()
    }
}

impl Record for Creature {
    type Id = CreatureId;
    const KIND: CollectionKind = CollectionKind::Creatures;

    fn id(&self) -> &CreatureId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Mega,
    Gigantamax,
    Regional,
}

impl FormKind {
    pub fn parse(s: &str) -> Option<FormKind> {
        match s.trim().to_lowercase().as_str() {
            "mega" => Some(FormKind::Mega),
            "gigantamax" | "gmax" => Some(FormKind::Gigantamax),
            "regional" => Some(FormKind::Regional),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl Stats {
    pub fn total(&self) -> u32 {
        self.entries().iter().map(|(_, v)| v).sum()
    }

    pub fn entries(&self) -> [(&'static str, u32); 6] {
        [
            ("hp", self.hp),
            ("attack", self.attack),
            ("defense", self.defense),
            ("special_attack", self.special_attack),
            ("special_defense", self.special_defense),
            ("speed", self.speed),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilitySlot {
    Normal,
    Hidden,
    Exotic,
}

/// Ability names per slot. The documents store `normal` and `hidden` either as
/// a single string or a list; both arrive here as lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "AbilitySetsConfig")]
pub struct AbilitySets {
    pub normal: Vec<String>,
    pub hidden: Vec<String>,
    pub exotic: Vec<String>,
}

impl AbilitySets {
    pub fn iter(&self) -> impl Iterator<Item = (AbilitySlot, &str)> {
        let normal = self.normal.iter().map(|a| (AbilitySlot::Normal, a.as_str()));
        let hidden = self.hidden.iter().map(|a| (AbilitySlot::Hidden, a.as_str()));
        let exotic = self.exotic.iter().map(|a| (AbilitySlot::Exotic, a.as_str()));
        normal.chain(hidden).chain(exotic)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelMove {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub level: u32,
    #[serde(rename = "move")]
    pub move_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeldItem {
    #[serde(default)]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub item_name: Option<String>,
    /// Drop chance in percent.
    #[serde(default)]
    pub rarity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Production {
    #[serde(default)]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionStage {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub stage: u32,
    pub pokemon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub evolutions: Vec<Evolution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evolution {
    pub to: String,
    #[serde(default)]
    pub method: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub condition: String,
}

//////////////////////////////
/// MOVES AND ABILITIES    ///
//////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub id: MoveId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub move_type: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub power: Option<u32>,
    #[serde(default)]
    pub accuracy: Option<u32>,
    #[serde(default)]
    pub pp: Option<u32>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub move_class: String,
    #[serde(default)]
    pub modified_for_rpg: bool,
    #[serde(default)]
    pub effect: Option<String>,
}

impl Record for Move {
    type Id = MoveId;
    const KIND: CollectionKind = CollectionKind::Moves;

    fn id(&self) -> &MoveId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub modified_for_rpg: bool,
}

impl Record for Ability {
    type Id = AbilityId;
    const KIND: CollectionKind = CollectionKind::Abilities;

    fn id(&self) -> &AbilityId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

//////////////////////////////
/// ITEMS                  ///
//////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: Price,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_craftable: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub forageable: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_book: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_unique: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub craft_recipe: Vec<RecipeEntry>,
    #[serde(default)]
    pub linked_move: Option<MoveId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub linked_pokemon: Vec<CreatureId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unlocks_recipes: Vec<ItemId>,
    #[serde(default)]
    pub capture_rate: Option<f32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub book_category: Option<String>,
    /// Posts a player spends to collect one, for forageable items.
    #[serde(default)]
    pub posts_to_collect: Option<u32>,
    #[serde(default)]
    pub sprite: Option<String>,
}

impl Item {
    /// Rarity tag, `comum` when the document leaves it out.
    pub fn rarity_or_default(&self) -> &str {
        match self.rarity.as_deref() {
            Some(r) if !r.is_empty() => r,
            _ => "comum",
        }
    }
}

impl Record for Item {
    type Id = ItemId;
    const KIND: CollectionKind = CollectionKind::Items;

    fn id(&self) -> &ItemId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceKind {
    Buy,
    Sell,
    Casino,
    Mile,
}

/// Prices per currency; a zero price counts as unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    pub buy: Option<u32>,
    pub sell: Option<u32>,
    pub casino: Option<u32>,
    pub mile: Option<u32>,
}

impl Price {
    pub fn get(&self, kind: PriceKind) -> Option<u32> {
        let value = match kind {
            PriceKind::Buy => self.buy,
            PriceKind::Sell => self.sell,
            PriceKind::Casino => self.casino,
            PriceKind::Mile => self.mile,
        };
        value.filter(|v| *v > 0)
    }

    /// The one price shown on a card: buy, then sell, then casino, then mile.
    pub fn primary(&self) -> Option<(PriceKind, u32)> {
        [PriceKind::Buy, PriceKind::Sell, PriceKind::Casino, PriceKind::Mile]
            .into_iter()
            .find_map(|kind| self.get(kind).map(|v| (kind, v)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeEntry {
    pub item_id: ItemId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

//////////////////////////////
/// MAPS                   ///
//////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapArea {
    pub id: MapId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub map_type: String,
    #[serde(default)]
    pub biome: Option<String>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spawns: Tiered<CreatureId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub forageable_items: Vec<Forageable>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interaction_objects: Vec<ObjectId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points_of_interest: Vec<PointOfInterest>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accesses: BTreeMap<String, MapAccess>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub map_image: Option<String>,
}

impl Record for MapArea {
    type Id = MapId;
    const KIND: CollectionKind = CollectionKind::Maps;

    fn id(&self) -> &MapId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forageable {
    pub item_id: ItemId,
    #[serde(default)]
    pub posts_to_collect: Option<u32>,
}

/// Exit from a map towards a neighbour, keyed by direction in `accesses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapAccess {
    pub name: String,
    #[serde(default)]
    pub posts_required: Option<u32>,
}

/// Compass directions first, anything else after in name order.
pub fn direction_rank(direction: &str) -> usize {
    match direction {
        "north" => 0,
        "south" => 1,
        "east" => 2,
        "west" => 3,
        _ => 4,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    #[serde(rename = "type", default)]
    pub poi_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub shop_data: Option<ShopData>,
    #[serde(default)]
    pub forum_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopData {
    #[serde(deserialize_with = "null_as_default")]
    pub sells: Vec<ItemId>,
    #[serde(deserialize_with = "null_as_default")]
    pub buys: Vec<BuyOffer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyOffer {
    pub item_id: ItemId,
    #[serde(default)]
    pub price: Option<u32>,
    #[serde(default)]
    pub requires_fame: Option<u32>,
}

//////////////////////////////
/// INTERACTIVE OBJECTS    ///
//////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ObjectConfig")]
pub struct InteractiveObject {
    pub id: ObjectId,
    pub name: String,
    pub object_type: String,
    pub description: String,
    pub cooldown_hours: Option<u32>,
    pub loot: LootTable,
    pub linked_pokemon: Vec<CreatureId>,
    pub narrative: Option<String>,
}

impl InteractiveObject {
    pub fn kind(&self) -> Option<ObjectKind> {
        ObjectKind::parse(&self.object_type)
    }
}

impl Record for InteractiveObject {
    type Id = ObjectId;
    const KIND: CollectionKind = CollectionKind::Objects;

    fn id(&self) -> &ObjectId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    BerryTree,
    ApricornTree,
    FishingSpot,
    EvolutionStone,
    EvolutionLocation,
    SocialSpot,
}

impl ObjectKind {
    pub fn parse(s: &str) -> Option<ObjectKind> {
        match s.trim() {
            "berry_tree" => Some(ObjectKind::BerryTree),
            "apricorn_tree" => Some(ObjectKind::ApricornTree),
            "fishing_spot" => Some(ObjectKind::FishingSpot),
            "evolution_stone" => Some(ObjectKind::EvolutionStone),
            "evolution_location" => Some(ObjectKind::EvolutionLocation),
            "social_spot" => Some(ObjectKind::SocialSpot),
            _ => None,
        }
    }
}

/// One loot entry: what drops and its rate in percent, when the document
/// gives one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LootDrop<I> {
    pub id: I,
    pub rate: Option<f32>,
}

impl<I> LootDrop<I> {
    pub fn new(id: I, rate: Option<f32>) -> Self {
        LootDrop { id, rate }
    }
}

/// Loot shape, chosen from the object's type when the document is parsed.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum LootTable {
    #[default]
    None,
    FlatItems(Tiered<LootDrop<ItemId>>),
    CreatureAndItems {
        creatures: Tiered<LootDrop<CreatureId>>,
        items: Tiered<LootDrop<ItemId>>,
    },
    LinkedCreatures(Vec<CreatureId>),
}

impl LootTable {
    /// Every item entry in the table with its tier.
    pub fn item_drops(&self) -> Vec<(Tier, LootDrop<ItemId>)> {
        match self {
            LootTable::FlatItems(items) | LootTable::CreatureAndItems { items, .. } => {
                items.iter().map(|(tier, drop)| (tier, *drop)).collect()
            }
            LootTable::None | LootTable::LinkedCreatures(_) => Vec::new(),
        }
    }

    /// Every creature entry in the table; linked creatures carry no tier and
    /// no rate.
    pub fn creature_drops(&self) -> Vec<(Option<Tier>, LootDrop<CreatureId>)> {
        match self {
            LootTable::CreatureAndItems { creatures, .. } => creatures
                .iter()
                .map(|(tier, drop)| (Some(tier), *drop))
                .collect(),
            LootTable::LinkedCreatures(ids) => ids
                .iter()
                .map(|id| (None, LootDrop::new(*id, None)))
                .collect(),
            LootTable::None | LootTable::FlatItems(_) => Vec::new(),
        }
    }

    pub fn items(&self) -> Vec<(Tier, ItemId)> {
        self.item_drops()
            .into_iter()
            .map(|(tier, drop)| (tier, drop.id))
            .collect()
    }

    pub fn creatures(&self) -> Vec<(Option<Tier>, CreatureId)> {
        self.creature_drops()
            .into_iter()
            .map(|(tier, drop)| (tier, drop.id))
            .collect()
    }
}

// Helpers for serde defaults
fn default_true() -> bool {
    true
}

fn default_quantity() -> u32 {
    1
}
