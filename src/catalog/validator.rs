use std::fmt;

use tracing::warn;

use super::collection::Catalog;
use super::model::{CollectionKind, FORM_ID_THRESHOLD, LootTable, ObjectKind};

/// A data-quality problem. Never fatal; the catalog stays usable and the
/// offending reference is simply skipped at query time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: CollectionKind,
    pub message: String,
}

impl ValidationError {
    fn new(kind: CollectionKind, msg: impl Into<String>) -> Self {
        ValidationError {
            kind,
            message: msg.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    for kind in CollectionKind::ALL {
        if catalog.len(kind) == 0 {
            errors.push(ValidationError::new(kind, "collection is empty"));
        }
    }

    validate_creatures(catalog, &mut errors);
    validate_items(catalog, &mut errors);
    validate_maps(catalog, &mut errors);
    validate_objects(catalog, &mut errors);

    if !errors.is_empty() {
        warn!(problems = errors.len(), "catalog has dangling references or malformed records");
    }
    errors
}

fn validate_creatures(catalog: &Catalog, errors: &mut Vec<ValidationError>) {
    use CollectionKind::Creatures as K;

    for creature in catalog.creatures.iter() {
        let who = format!("creature {} '{}'", creature.id, creature.name);

        if creature.types.is_empty() || creature.types.len() > 2 {
            errors.push(ValidationError::new(
                K,
                format!("{} has {} types", who, creature.types.len()),
            ));
        }

        match creature.form_of {
            Some(base) if !catalog.creatures.contains(&base) => {
                errors.push(ValidationError::new(
                    K,
                    format!("{} is a form of missing creature {}", who, base),
                ));
            }
            None if creature.id >= FORM_ID_THRESHOLD && !creature.base_form => {
                errors.push(ValidationError::new(
                    K,
                    format!("{} has a form id but no form_of", who),
                ));
            }
            _ => {}
        }

        if creature.form_type.is_some() && creature.form_kind().is_none() {
            errors.push(ValidationError::new(
                K,
                format!(
                    "{} has unknown form type '{}'",
                    who,
                    creature.form_type.as_deref().unwrap_or_default()
                ),
            ));
        }

        let move_names = creature
            .moveset_by_level
            .iter()
            .map(|m| m.move_name.as_str())
            .chain(creature.learnable_moves.iter().map(String::as_str))
            .chain(creature.egg_moves.iter().map(String::as_str));
        for name in move_names {
            if catalog.moves.find_by_name(name).is_none() {
                errors.push(ValidationError::new(
                    K,
                    format!("{} learns unknown move '{}'", who, name),
                ));
            }
        }

        for (slot, name) in creature.abilities.iter() {
            if catalog.abilities.find_by_name(name).is_none() {
                errors.push(ValidationError::new(
                    K,
                    format!("{} has unknown {:?} ability '{}'", who, slot, name),
                ));
            }
        }

        for held in &creature.held_items {
            let found = match (held.item_id, held.item_name.as_deref()) {
                (Some(id), _) => catalog.items.contains(&id),
                (None, Some(name)) => catalog.items.find_by_name(name).is_some(),
                (None, None) => false,
            };
            if !found {
                errors.push(ValidationError::new(
                    K,
                    format!("{} holds an unknown item {:?}", who, held),
                ));
            }
        }

        for produced in &creature.production {
            if let Some(id) = produced.item_id {
                if !catalog.items.contains(&id) {
                    errors.push(ValidationError::new(
                        K,
                        format!("{} produces missing item {}", who, id),
                    ));
                }
            }
        }

        for stage in &creature.evolution_chain {
            let targets = std::iter::once(stage.pokemon.as_str())
                .chain(stage.evolutions.iter().map(|e| e.to.as_str()));
            for name in targets {
                if catalog.creatures.find_by_name(name).is_none() {
                    errors.push(ValidationError::new(
                        K,
                        format!("{} evolution chain names unknown creature '{}'", who, name),
                    ));
                }
            }
        }
    }
}

fn validate_items(catalog: &Catalog, errors: &mut Vec<ValidationError>) {
    use CollectionKind::Items as K;

    for item in catalog.items.iter() {
        let who = format!("item {} '{}'", item.id, item.name);

        if item.is_craftable && item.craft_recipe.is_empty() {
            errors.push(ValidationError::new(
                K,
                format!("{} is craftable but has no recipe", who),
            ));
        }

        for entry in &item.craft_recipe {
            if entry.item_id == item.id {
                errors.push(ValidationError::new(
                    K,
                    format!("{} is an ingredient of itself", who),
                ));
            } else if !catalog.items.contains(&entry.item_id) {
                errors.push(ValidationError::new(
                    K,
                    format!("{} recipe needs missing item {}", who, entry.item_id),
                ));
            }
        }

        for id in &item.unlocks_recipes {
            if !catalog.items.contains(id) {
                errors.push(ValidationError::new(
                    K,
                    format!("{} unlocks recipe of missing item {}", who, id),
                ));
            }
        }

        if let Some(move_id) = item.linked_move {
            if !catalog.moves.contains(&move_id) {
                errors.push(ValidationError::new(
                    K,
                    format!("{} teaches missing move {}", who, move_id),
                ));
            }
        }

        for id in &item.linked_pokemon {
            if !catalog.creatures.contains(id) {
                errors.push(ValidationError::new(
                    K,
                    format!("{} is linked to missing creature {}", who, id),
                ));
            }
        }
    }
}

fn validate_maps(catalog: &Catalog, errors: &mut Vec<ValidationError>) {
    use CollectionKind::Maps as K;

    for map in catalog.maps.iter() {
        let who = format!("map '{}'", map.id);

        for (tier, id) in map.spawns.iter() {
            if !catalog.creatures.contains(id) {
                errors.push(ValidationError::new(
                    K,
                    format!("{} {} spawn names missing creature {}", who, tier.as_str(), id),
                ));
            }
        }

        for forage in &map.forageable_items {
            if !catalog.items.contains(&forage.item_id) {
                errors.push(ValidationError::new(
                    K,
                    format!("{} forages missing item {}", who, forage.item_id),
                ));
            }
        }

        for object_id in &map.interaction_objects {
            if !catalog.objects.contains(object_id.as_str()) {
                errors.push(ValidationError::new(
                    K,
                    format!("{} places missing object '{}'", who, object_id),
                ));
            }
        }

        for poi in &map.points_of_interest {
            let Some(shop) = &poi.shop_data else {
                continue;
            };
            let ids = shop
                .sells
                .iter()
                .copied()
                .chain(shop.buys.iter().map(|b| b.item_id));
            for id in ids {
                if !catalog.items.contains(&id) {
                    errors.push(ValidationError::new(
                        K,
                        format!("{} shop '{}' trades missing item {}", who, poi.name, id),
                    ));
                }
            }
        }
    }
}

fn validate_objects(catalog: &Catalog, errors: &mut Vec<ValidationError>) {
    use CollectionKind::Objects as K;

    for object in catalog.objects.iter() {
        let who = format!("object '{}'", object.id);

        if object.kind().is_none() {
            errors.push(ValidationError::new(
                K,
                format!("{} has unknown type '{}'", who, object.object_type),
            ));
        }

        if matches!(object.kind(), Some(ObjectKind::FishingSpot))
            && matches!(object.loot, LootTable::None)
        {
            errors.push(ValidationError::new(
                K,
                format!("{} is a fishing spot without loot", who),
            ));
        }

        for (_, id) in object.loot.items() {
            if !catalog.items.contains(&id) {
                errors.push(ValidationError::new(
                    K,
                    format!("{} drops missing item {}", who, id),
                ));
            }
        }

        let creatures = object
            .loot
            .creatures()
            .into_iter()
            .map(|(_, id)| id)
            .chain(object.linked_pokemon.iter().copied());
        for id in creatures {
            if !catalog.creatures.contains(&id) {
                errors.push(ValidationError::new(
                    K,
                    format!("{} references missing creature {}", who, id),
                ));
            }
        }
    }
}
