use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::helpers::{active, contains_ci, dex_number, eq_ci};
use super::regions::{Region, RegionTable};
use crate::catalog::{Ability, Creature, InteractiveObject, Item, MapArea, MapId, Move};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("unknown filter field '{0}'")]
    UnknownField(String),
    #[error("'{value}' is not a valid value for {field}")]
    InvalidValue { field: String, value: String },
}

/// Configuration the predicates need besides the filter itself.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub regions: &'a RegionTable,
    pub hidden_maps: &'a HashSet<MapId>,
}

impl<'a> FilterContext<'a> {
    pub fn new(regions: &'a RegionTable, hidden_maps: &'a HashSet<MapId>) -> Self {
        FilterContext {
            regions,
            hidden_maps,
        }
    }
}

/// One view's filter record. Unset fields impose no constraint; set fields
/// are ANDed.
pub trait Filter<T>: Default + Clone {
    fn matches(&self, record: &T, ctx: &FilterContext<'_>) -> bool;

    /// Set one field from `key=value` text. A blank value clears the field.
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FilterError>;

    /// True when no field is set.
    fn is_empty(&self) -> bool;
}

/// Stable, order-preserving filter pass.
pub fn apply<'r, T, F>(
    records: impl IntoIterator<Item = &'r T>,
    filter: &F,
    ctx: &FilterContext<'_>,
) -> Vec<&'r T>
where
    T: 'r,
    F: Filter<T>,
{
    records
        .into_iter()
        .filter(|record| filter.matches(record, ctx))
        .collect()
}

////////////////////////
/// FIELD PARSING    ///
////////////////////////

fn set_text(slot: &mut Option<String>, value: &str) {
    let value = value.trim();
    *slot = if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    };
}

fn parse_toggle(field: &str, value: &str) -> Result<bool, FilterError> {
    match value.trim().to_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        _ => Err(FilterError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

fn unknown(key: &str) -> FilterError {
    FilterError::UnknownField(key.trim().to_string())
}

fn facet_matches(facet: &Option<String>, value: &str) -> bool {
    active(facet).is_none_or(|wanted| eq_ci(value, wanted))
}

fn normalized_key(key: &str) -> String {
    key.trim().to_lowercase()
}

////////////////////////
/// CREATURES        ///
////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureFilter {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub creature_type: Option<String>,
    pub rarity: Option<String>,
    /// `base` keeps base forms; anything else is compared to the form type.
    pub form: Option<String>,
    pub region: Option<Region>,
    pub starter: bool,
    pub seira: bool,
    pub producer: bool,
}

impl Filter<Creature> for CreatureFilter {
    fn matches(&self, c: &Creature, ctx: &FilterContext<'_>) -> bool {
        if let Some(search) = active(&self.search) {
            let dex = dex_number(c).to_string();
            if !contains_ci(&c.name, search) && !dex.contains(search) {
                return false;
            }
        }

        if let Some(wanted) = active(&self.creature_type) {
            if !c.types.iter().any(|t| eq_ci(t, wanted)) {
                return false;
            }
        }

        if !facet_matches(&self.rarity, &c.rarity) {
            return false;
        }

        match active(&self.form) {
            Some(form) if eq_ci(form, "base") => {
                if !c.base_form {
                    return false;
                }
            }
            Some(form) => {
                if !c.form_type.as_deref().is_some_and(|t| eq_ci(t, form)) {
                    return false;
                }
            }
            None => {}
        }

        if let Some(region) = self.region {
            if !ctx.regions.contains(region, c) {
                return false;
            }
        }

        (!self.starter || c.is_starter)
            && (!self.seira || c.in_seira_pokedex)
            && (!self.producer || c.is_producer)
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FilterError> {
        match normalized_key(key).as_str() {
            "search" | "q" => set_text(&mut self.search, value),
            "type" => set_text(&mut self.creature_type, value),
            "rarity" => set_text(&mut self.rarity, value),
            "form" => set_text(&mut self.form, value),
            "region" => {
                self.region = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse().map_err(|_| FilterError::InvalidValue {
                        field: "region".into(),
                        value: value.to_string(),
                    })?)
                }
            }
            "starter" => self.starter = parse_toggle("starter", value)?,
            "seira" => self.seira = parse_toggle("seira", value)?,
            "producer" => self.producer = parse_toggle("producer", value)?,
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        *self == CreatureFilter::default()
    }
}

////////////////////////
/// ITEMS            ///
////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub rarity: Option<String>,
    pub craftable: bool,
    pub forageable: bool,
    pub book: bool,
}

impl Filter<Item> for ItemFilter {
    fn matches(&self, i: &Item, _ctx: &FilterContext<'_>) -> bool {
        if let Some(search) = active(&self.search) {
            if !contains_ci(&i.name, search) && !i.id.to_string().contains(search) {
                return false;
            }
        }

        facet_matches(&self.category, &i.category)
            && facet_matches(&self.rarity, i.rarity_or_default())
            && (!self.craftable || i.is_craftable)
            && (!self.forageable || i.forageable)
            && (!self.book || i.is_book)
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FilterError> {
        match normalized_key(key).as_str() {
            "search" | "q" => set_text(&mut self.search, value),
            "category" => set_text(&mut self.category, value),
            "rarity" => set_text(&mut self.rarity, value),
            "craftable" => self.craftable = parse_toggle("craftable", value)?,
            "forageable" => self.forageable = parse_toggle("forageable", value)?,
            "book" => self.book = parse_toggle("book", value)?,
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        *self == ItemFilter::default()
    }
}

////////////////////////
/// MOVES            ///
////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveFilter {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub move_type: Option<String>,
    pub category: Option<String>,
    pub move_class: Option<String>,
    pub modified: bool,
}

impl Filter<Move> for MoveFilter {
    fn matches(&self, m: &Move, _ctx: &FilterContext<'_>) -> bool {
        if let Some(search) = active(&self.search) {
            if !contains_ci(&m.name, search) {
                return false;
            }
        }

        facet_matches(&self.move_type, &m.move_type)
            && facet_matches(&self.category, &m.category)
            && facet_matches(&self.move_class, &m.move_class)
            && (!self.modified || m.modified_for_rpg)
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FilterError> {
        match normalized_key(key).as_str() {
            "search" | "q" => set_text(&mut self.search, value),
            "type" => set_text(&mut self.move_type, value),
            "category" => set_text(&mut self.category, value),
            "class" | "move_class" => set_text(&mut self.move_class, value),
            "modified" => self.modified = parse_toggle("modified", value)?,
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        *self == MoveFilter::default()
    }
}

////////////////////////
/// ABILITIES        ///
////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityFilter {
    pub search: Option<String>,
    pub modified: bool,
}

impl Filter<Ability> for AbilityFilter {
    fn matches(&self, a: &Ability, _ctx: &FilterContext<'_>) -> bool {
        if let Some(search) = active(&self.search) {
            if !contains_ci(&a.name, search) {
                return false;
            }
        }
        !self.modified || a.modified_for_rpg
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FilterError> {
        match normalized_key(key).as_str() {
            "search" | "q" => set_text(&mut self.search, value),
            "modified" => self.modified = parse_toggle("modified", value)?,
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        *self == AbilityFilter::default()
    }
}

////////////////////////
/// OBJECTS          ///
////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectFilter {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub object_type: Option<String>,
}

impl Filter<InteractiveObject> for ObjectFilter {
    fn matches(&self, o: &InteractiveObject, _ctx: &FilterContext<'_>) -> bool {
        if let Some(search) = active(&self.search) {
            if !contains_ci(&o.name, search) && !contains_ci(&o.id, search) {
                return false;
            }
        }
        facet_matches(&self.object_type, &o.object_type)
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FilterError> {
        match normalized_key(key).as_str() {
            "search" | "q" => set_text(&mut self.search, value),
            "type" => set_text(&mut self.object_type, value),
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        *self == ObjectFilter::default()
    }
}

////////////////////////
/// MAPS             ///
////////////////////////

/// Maps are never paginated; hidden maps are excluded even with an empty filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapFilter {
    #[serde(rename = "type")]
    pub map_type: Option<String>,
    pub biome: Option<String>,
}

impl Filter<MapArea> for MapFilter {
    fn matches(&self, m: &MapArea, ctx: &FilterContext<'_>) -> bool {
        if ctx.hidden_maps.contains(&m.id) {
            return false;
        }
        facet_matches(&self.map_type, &m.map_type)
            && match active(&self.biome) {
                Some(wanted) => m.biome.as_deref().is_some_and(|b| eq_ci(b, wanted)),
                None => true,
            }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FilterError> {
        match normalized_key(key).as_str() {
            "type" => set_text(&mut self.map_type, value),
            "biome" => set_text(&mut self.biome, value),
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        *self == MapFilter::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items() -> Vec<Item> {
        serde_json::from_value(json!([
            { "id": 1, "name": "Potion", "category": "medicine", "rarity": "comum" },
            { "id": 2, "name": "Master Ball", "category": "pokeball", "rarity": "epico" },
            { "id": 12, "name": "Rope", "category": "craft-material", "is_craftable": true }
        ]))
        .unwrap()
    }

    #[test]
    fn category_facet_selects_matching_items() {
        let (regions, hidden) = (RegionTable::new(), HashSet::new());
        let ctx = FilterContext::new(&regions, &hidden);
        let items = items();

        let mut filter = ItemFilter::default();
        filter.set_field("category", "medicine").unwrap();

        let ids: Vec<u32> = apply(&items, &filter, &ctx).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn item_search_matches_name_or_id_and_missing_rarity_is_comum() {
        let (regions, hidden) = (RegionTable::new(), HashSet::new());
        let ctx = FilterContext::new(&regions, &hidden);
        let items = items();

        let filter = ItemFilter {
            search: Some("2".into()),
            ..ItemFilter::default()
        };
        let ids: Vec<u32> = apply(&items, &filter, &ctx).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 12]);

        let filter = ItemFilter {
            rarity: Some("COMUM".into()),
            ..ItemFilter::default()
        };
        let ids: Vec<u32> = apply(&items, &filter, &ctx).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 12]);
    }

    #[test]
    fn creature_predicates_are_anded() {
        let (regions, hidden) = (RegionTable::new(), HashSet::new());
        let ctx = FilterContext::new(&regions, &hidden);
        let creatures: Vec<Creature> = serde_json::from_value(json!([
            { "id": 1, "name": "Bulbasaur", "types": ["Grass", "Poison"], "is_starter": true },
            { "id": 43, "name": "Oddish", "types": ["Grass", "Poison"] },
            { "id": 10003, "name": "Mega Venusaur", "types": ["Grass"], "form_of": 3,
              "base_form": false, "form_type": "mega" }
        ]))
        .unwrap();

        let mut filter = CreatureFilter::default();
        filter.set_field("type", "poison").unwrap();
        filter.set_field("starter", "yes").unwrap();
        let ids: Vec<u32> = apply(&creatures, &filter, &ctx).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);

        let mut filter = CreatureFilter::default();
        filter.set_field("form", "mega").unwrap();
        let ids: Vec<u32> = apply(&creatures, &filter, &ctx).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![10003]);

        // dex search finds the form through its base number
        filter.set_field("form", "").unwrap();
        filter.set_field("q", "3").unwrap();
        let ids: Vec<u32> = apply(&creatures, &filter, &ctx).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![43, 10003]);
    }

    #[test]
    fn hidden_maps_never_pass() {
        let regions = RegionTable::new();
        let hidden: HashSet<MapId> = ["debug-room".to_string()].into_iter().collect();
        let ctx = FilterContext::new(&regions, &hidden);
        let maps: Vec<MapArea> = serde_json::from_value(json!([
            { "id": "debug-room", "name": "Debug", "type": "city" },
            { "id": "harbor", "name": "Harbor", "type": "city", "biome": "Coast" },
            { "id": "route-2", "name": "Route 2", "type": "route" }
        ]))
        .unwrap();

        let ids: Vec<&str> = apply(&maps, &MapFilter::default(), &ctx)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["harbor", "route-2"]);

        let filter = MapFilter {
            biome: Some("coast".into()),
            ..MapFilter::default()
        };
        assert_eq!(apply(&maps, &filter, &ctx).len(), 1);
    }

    #[test]
    fn set_field_rejects_unknown_keys_and_bad_values() {
        let mut filter = MoveFilter::default();
        assert_eq!(
            filter.set_field("power", "90"),
            Err(FilterError::UnknownField("power".into()))
        );
        assert!(filter.set_field("modified", "maybe").is_err());

        let mut filter = CreatureFilter::default();
        assert!(filter.set_field("region", "kanto").is_err());
        filter.set_field("region", "Galar").unwrap();
        assert_eq!(filter.region, Some(Region::Galar));
        filter.set_field("region", " ").unwrap();
        assert!(filter.is_empty());
    }
}
