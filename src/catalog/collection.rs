use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tracing::{error, info};

use super::loader::{LoadError, parse_collection_str};
use super::model::{
    Ability, CollectionKind, Creature, InteractiveObject, Item, MapArea, Move, Record,
};

/// An immutable, id-indexed sequence of records in document order.
#[derive(Debug, Clone)]
pub struct Collection<T: Record> {
    records: Vec<T>,
    by_id: HashMap<T::Id, usize>,
    by_name: HashMap<String, usize>,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Collection {
            records: Vec::new(),
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Index `records`; a repeated id makes the whole document invalid.
    pub fn from_records(records: Vec<T>) -> Result<Self, LoadError> {
        let mut by_id: HashMap<T::Id, usize> = HashMap::with_capacity(records.len());
        let mut by_name: HashMap<String, usize> = HashMap::with_capacity(records.len());

        for (idx, record) in records.iter().enumerate() {
            if by_id.insert(record.id().clone(), idx).is_some() {
                return Err(LoadError::DuplicateId {
                    kind: T::KIND,
                    id: record.id().to_string(),
                });
            }
            // first record wins when two share a name
            by_name.entry(record.name().to_lowercase()).or_insert(idx);
        }

        Ok(Collection {
            records,
            by_id,
            by_name,
        })
    }

    pub fn get<Q>(&self, id: &Q) -> Option<&T>
    where
        T::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    pub fn contains<Q>(&self, id: &Q) -> bool
    where
        T::Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.by_id.contains_key(id)
    }

    /// Case-insensitive exact name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&T> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|&idx| &self.records[idx])
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a, T: Record> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("no collection could be loaded ({} failures)", failures.len())]
    Unavailable {
        failures: Vec<(CollectionKind, String)>,
    },
}

/// All six collections of one session, loaded and indexed.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub creatures: Arc<Collection<Creature>>,
    pub moves: Arc<Collection<Move>>,
    pub abilities: Arc<Collection<Ability>>,
    pub items: Arc<Collection<Item>>,
    pub maps: Arc<Collection<MapArea>>,
    pub objects: Arc<Collection<InteractiveObject>>,
}

impl Catalog {
    /// Build a catalog from JSON text the caller already fetched. A missing or
    /// broken document leaves that collection empty; only a total failure is
    /// an error.
    pub fn from_documents(
        documents: &HashMap<CollectionKind, String>,
    ) -> Result<Catalog, CatalogError> {
        let mut failures: Vec<(CollectionKind, String)> = Vec::new();

        let catalog = Catalog {
            creatures: parse_or_empty(documents, &mut failures),
            moves: parse_or_empty(documents, &mut failures),
            abilities: parse_or_empty(documents, &mut failures),
            items: parse_or_empty(documents, &mut failures),
            maps: parse_or_empty(documents, &mut failures),
            objects: parse_or_empty(documents, &mut failures),
        };

        if failures.len() == CollectionKind::ALL.len() {
            return Err(CatalogError::Unavailable { failures });
        }
        Ok(catalog)
    }

    pub fn len(&self, kind: CollectionKind) -> usize {
        match kind {
            CollectionKind::Creatures => self.creatures.len(),
            CollectionKind::Moves => self.moves.len(),
            CollectionKind::Abilities => self.abilities.len(),
            CollectionKind::Items => self.items.len(),
            CollectionKind::Maps => self.maps.len(),
            CollectionKind::Objects => self.objects.len(),
        }
    }
}

fn parse_or_empty<T>(
    documents: &HashMap<CollectionKind, String>,
    failures: &mut Vec<(CollectionKind, String)>,
) -> Arc<Collection<T>>
where
    T: Record + serde::de::DeserializeOwned,
{
    let result = documents
        .get(&T::KIND)
        .ok_or(LoadError::Missing(T::KIND))
        .and_then(|text| parse_collection_str::<T>(text));

    match result {
        Ok(collection) => {
            info!(kind = %T::KIND, records = collection.len(), "collection loaded");
            Arc::new(collection)
        }
        Err(err) => {
            error!(kind = %T::KIND, error = %err, "collection unavailable, using an empty one");
            failures.push((T::KIND, err.to_string()));
            Arc::new(Collection::empty())
        }
    }
}
