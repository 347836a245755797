use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use super::collection::{Catalog, CatalogError, Collection};
use super::loader::{LoadError, parse_collection};
use super::model::{
    Ability, CollectionKind, Creature, InteractiveObject, Item, MapArea, Move, Record,
};

pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/gbavn/seira-database/main/database";

/// Fetches one JSON document. Implemented over HTTP by `HttpTransport` and by
/// in-memory fakes in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Value, LoadError>;
}

/// Where each collection's document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrls {
    base_url: String,
    overrides: HashMap<CollectionKind, String>,
}

impl Default for SourceUrls {
    fn default() -> Self {
        SourceUrls::new(DEFAULT_BASE_URL)
    }
}

impl SourceUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        SourceUrls {
            base_url: base_url.into(),
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, kind: CollectionKind, url: impl Into<String>) -> Self {
        self.overrides.insert(kind, url.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, kind: CollectionKind) -> String {
        match self.overrides.get(&kind) {
            Some(url) => url.clone(),
            None => format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                kind.document_name()
            ),
        }
    }
}

/// Session cache of the six collections. Each kind is fetched at most once;
/// concurrent first callers wait on the same in-flight load. A failed load is
/// cached as an empty collection and never retried.
pub struct CollectionStore {
    transport: Arc<dyn Transport>,
    sources: SourceUrls,

    creatures: OnceCell<Arc<Collection<Creature>>>,
    moves: OnceCell<Arc<Collection<Move>>>,
    abilities: OnceCell<Arc<Collection<Ability>>>,
    items: OnceCell<Arc<Collection<Item>>>,
    maps: OnceCell<Arc<Collection<MapArea>>>,
    objects: OnceCell<Arc<Collection<InteractiveObject>>>,

    failures: Mutex<Vec<(CollectionKind, String)>>,
}

impl CollectionStore {
    pub fn new(transport: Arc<dyn Transport>, sources: SourceUrls) -> Self {
        CollectionStore {
            transport,
            sources,
            creatures: OnceCell::new(),
            moves: OnceCell::new(),
            abilities: OnceCell::new(),
            items: OnceCell::new(),
            maps: OnceCell::new(),
            objects: OnceCell::new(),
            failures: Mutex::new(Vec::new()),
        }
    }

    pub async fn creatures(&self) -> Arc<Collection<Creature>> {
        self.load(&self.creatures).await
    }

    pub async fn moves(&self) -> Arc<Collection<Move>> {
        self.load(&self.moves).await
    }

    pub async fn abilities(&self) -> Arc<Collection<Ability>> {
        self.load(&self.abilities).await
    }

    pub async fn items(&self) -> Arc<Collection<Item>> {
        self.load(&self.items).await
    }

    pub async fn maps(&self) -> Arc<Collection<MapArea>> {
        self.load(&self.maps).await
    }

    pub async fn objects(&self) -> Arc<Collection<InteractiveObject>> {
        self.load(&self.objects).await
    }

    /// Load every kind concurrently and snapshot them. Only a total failure is
    /// reported; partial failures show up in `failures()`.
    pub async fn load_all(&self) -> Result<Catalog, CatalogError> {
        let (creatures, moves, abilities, items, maps, objects) = tokio::join!(
            self.creatures(),
            self.moves(),
            self.abilities(),
            self.items(),
            self.maps(),
            self.objects(),
        );

        let failures = self.failures();
        if failures.len() == CollectionKind::ALL.len() {
            return Err(CatalogError::Unavailable { failures });
        }

        Ok(Catalog {
            creatures,
            moves,
            abilities,
            items,
            maps,
            objects,
        })
    }

    /// Every load failure recorded so far, in the order they happened.
    pub fn failures(&self) -> Vec<(CollectionKind, String)> {
        self.failures.lock().clone()
    }

    pub fn is_loaded(&self, kind: CollectionKind) -> bool {
        match kind {
            CollectionKind::Creatures => self.creatures.initialized(),
            CollectionKind::Moves => self.moves.initialized(),
            CollectionKind::Abilities => self.abilities.initialized(),
            CollectionKind::Items => self.items.initialized(),
            CollectionKind::Maps => self.maps.initialized(),
            CollectionKind::Objects => self.objects.initialized(),
        }
    }

    async fn load<T>(&self, cell: &OnceCell<Arc<Collection<T>>>) -> Arc<Collection<T>>
    where
        T: Record + DeserializeOwned,
    {
        if let Some(cached) = cell.get() {
            debug!(kind = %T::KIND, "collection cache hit");
            return Arc::clone(cached);
        }
        Arc::clone(cell.get_or_init(|| self.fetch_collection::<T>()).await)
    }

    async fn fetch_collection<T>(&self) -> Arc<Collection<T>>
    where
        T: Record + DeserializeOwned,
    {
        let url = self.sources.url(T::KIND);
        let result = match self.transport.fetch(&url).await {
            Ok(document) => parse_collection::<T>(document),
            Err(err) => Err(err),
        };

        match result {
            Ok(collection) => {
                info!(kind = %T::KIND, records = collection.len(), "collection loaded");
                Arc::new(collection)
            }
            Err(err) => {
                error!(kind = %T::KIND, %url, error = %err, "collection unavailable, using an empty one");
                self.failures.lock().push((T::KIND, err.to_string()));
                Arc::new(Collection::empty())
            }
        }
    }
}
