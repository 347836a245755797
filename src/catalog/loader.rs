use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use super::collection::Collection;
use super::model::{
    AbilitySets, CollectionKind, CreatureId, InteractiveObject, ItemId, LootDrop, LootTable,
    ObjectKind, Record, Tiered,
};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("{url} did not return JSON: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} document is malformed: {source}")]
    Parse {
        kind: CollectionKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} document repeats id {id}")]
    DuplicateId { kind: CollectionKind, id: String },

    #[error("no document was provided for {0}")]
    Missing(CollectionKind),
}

////////////////////////
/// DOCUMENT PARSING ///
////////////////////////

/// Parse an already decoded JSON document into an indexed collection.
pub fn parse_collection<T>(document: Value) -> Result<Collection<T>, LoadError>
where
    T: Record + DeserializeOwned,
{
    let records: Vec<T> = serde_json::from_value(document).map_err(|source| LoadError::Parse {
        kind: T::KIND,
        source,
    })?;
    Collection::from_records(records)
}

/// Parse raw JSON text into an indexed collection.
pub fn parse_collection_str<T>(text: &str) -> Result<Collection<T>, LoadError>
where
    T: Record + DeserializeOwned,
{
    let records: Vec<T> = serde_json::from_str(text).map_err(|source| LoadError::Parse {
        kind: T::KIND,
        source,
    })?;
    Collection::from_records(records)
}

////////////////////
/// RAW SHAPES   ///
////////////////////

// `normal` / `hidden` arrive either as "Name" or ["Name", ...]
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_names(self) -> Vec<String> {
        let names = match self {
            OneOrMany::One(name) => vec![name],
            OneOrMany::Many(names) => names,
        };
        names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect()
    }
}

#[derive(Deserialize, Default)]
pub(crate) struct AbilitySetsConfig {
    #[serde(default)]
    normal: Option<OneOrMany>,
    #[serde(default)]
    hidden: Option<OneOrMany>,
    #[serde(default, deserialize_with = "null_as_default")]
    exotic: Vec<String>,
}

impl From<AbilitySetsConfig> for AbilitySets {
    fn from(cfg: AbilitySetsConfig) -> Self {
        AbilitySets {
            normal: cfg.normal.map(OneOrMany::into_names).unwrap_or_default(),
            hidden: cfg.hidden.map(OneOrMany::into_names).unwrap_or_default(),
            exotic: cfg.exotic,
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct ObjectConfig {
    id: String,
    name: String,

    #[serde(rename = "type", default)]
    object_type: String,

    #[serde(default)]
    description: String,

    #[serde(default)]
    cooldown_hours: Option<u32>,

    #[serde(default)]
    loot: Option<LootConfig>,

    #[serde(default, deserialize_with = "null_as_default")]
    linked_pokemon: Vec<CreatureId>,

    #[serde(default)]
    narrative: Option<String>,
}

#[derive(Deserialize, Default)]
struct LootConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    common: Vec<LootEntryConfig>,
    #[serde(default, deserialize_with = "null_as_default")]
    rare: Vec<LootEntryConfig>,
    #[serde(default, deserialize_with = "null_as_default")]
    epic: Vec<LootEntryConfig>,

    // fishing spots keep their item tiers apart from the creature tiers
    #[serde(default)]
    items: Option<Tiered<LootEntryConfig>>,

    #[serde(default, deserialize_with = "null_as_default")]
    linked_pokemon: Vec<CreatureId>,
}

#[derive(Deserialize, Default)]
struct LootEntryConfig {
    #[serde(default)]
    item_id: Option<ItemId>,
    #[serde(default)]
    pokemon_id: Option<CreatureId>,
    #[serde(default)]
    rate: Option<f32>,
}

impl From<ObjectConfig> for InteractiveObject {
    fn from(cfg: ObjectConfig) -> Self {
        let loot = parse_loot(&cfg.id, &cfg.object_type, cfg.loot);

        InteractiveObject {
            id: cfg.id,
            name: cfg.name,
            object_type: cfg.object_type,
            description: cfg.description,
            cooldown_hours: cfg.cooldown_hours,
            loot,
            linked_pokemon: cfg.linked_pokemon,
            narrative: cfg.narrative,
        }
    }
}

////////////////////////////
/// LOOT PARSE HELPERS   ///
////////////////////////////

fn parse_loot(object_id: &str, object_type: &str, loot: Option<LootConfig>) -> LootTable {
    let Some(loot) = loot else {
        return LootTable::None;
    };

    if !loot.linked_pokemon.is_empty() {
        return LootTable::LinkedCreatures(loot.linked_pokemon);
    }

    let tiers = Tiered {
        common: loot.common,
        rare: loot.rare,
        epic: loot.epic,
    };

    match ObjectKind::parse(object_type) {
        Some(ObjectKind::BerryTree) | Some(ObjectKind::ApricornTree) => {
            LootTable::FlatItems(item_drops(tiers))
        }
        Some(ObjectKind::FishingSpot) => LootTable::CreatureAndItems {
            creatures: tiers
                .map(|e| e.pokemon_id.map(|id| LootDrop::new(id, e.rate)))
                .map_flatten(),
            items: loot.items.map(item_drops).unwrap_or_default(),
        },
        _ => {
            if !tiers.is_empty() || loot.items.is_some() {
                warn!(
                    object = object_id,
                    object_type, "loot on an object type without a loot shape; ignoring it"
                );
            }
            LootTable::None
        }
    }
}

fn item_drops(tiers: Tiered<LootEntryConfig>) -> Tiered<LootDrop<ItemId>> {
    tiers
        .map(|e| e.item_id.map(|id| LootDrop::new(id, e.rate)))
        .map_flatten()
}

impl<T> Tiered<Option<T>> {
    fn map_flatten(self) -> Tiered<T> {
        Tiered {
            common: self.common.into_iter().flatten().collect(),
            rare: self.rare.into_iter().flatten().collect(),
            epic: self.epic.into_iter().flatten().collect(),
        }
    }
}

///////////////////////////
/// LENIENT FIELD HELPERS ///
///////////////////////////

/// Numbers that sometimes arrive as strings; anything unreadable becomes 0.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u32))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Free text that sometimes arrives as a number (evolution levels).
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// `null` reads as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
