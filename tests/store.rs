mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use seira_catalog::catalog::{
    CatalogError, CollectionKind, CollectionStore, LoadError, SourceUrls, Transport,
};
use serde_json::Value;

/// Serves the fixture documents, counting requests per URL. Kinds listed in
/// `failing` answer with a 404.
struct MockTransport {
    calls: AtomicUsize,
    per_url: parking_lot::Mutex<HashMap<String, usize>>,
    failing: Vec<CollectionKind>,
    delay: Option<Duration>,
}

impl MockTransport {
    fn new() -> Self {
        MockTransport {
            calls: AtomicUsize::new(0),
            per_url: parking_lot::Mutex::new(HashMap::new()),
            failing: Vec::new(),
            delay: None,
        }
    }

    fn failing(mut self, kinds: &[CollectionKind]) -> Self {
        self.failing = kinds.to_vec();
        self
    }

    fn slow(mut self) -> Self {
        self.delay = Some(Duration::from_millis(20));
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn calls_for(&self, url: &str) -> usize {
        self.per_url.lock().get(url).copied().unwrap_or(0)
    }
}

fn kind_of(url: &str) -> CollectionKind {
    CollectionKind::ALL
        .into_iter()
        .find(|kind| url.ends_with(kind.document_name()))
        .unwrap()
}

#[async_trait]
impl Transport for MockTransport {
    async fn fetch(&self, url: &str) -> Result<Value, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.per_url.lock().entry(url.to_string()).or_default() += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let kind = kind_of(url);
        if self.failing.contains(&kind) {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: 404,
            });
        }
        Ok(common::document(kind))
    }
}

fn store(transport: &Arc<MockTransport>) -> CollectionStore {
    CollectionStore::new(transport.clone(), SourceUrls::new("https://db.test"))
}

#[tokio::test]
async fn repeated_gets_fetch_once() {
    let transport = Arc::new(MockTransport::new());
    let store = store(&transport);

    assert!(!store.is_loaded(CollectionKind::Items));
    let first = store.items().await;
    let second = store.items().await;

    assert_eq!(first.len(), 6);
    assert!(Arc::ptr_eq(&first, &second));
    assert!(store.is_loaded(CollectionKind::Items));
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn concurrent_first_gets_share_one_fetch() {
    let transport = Arc::new(MockTransport::new().slow());
    let store = store(&transport);

    let (a, b, c) = tokio::join!(store.creatures(), store.creatures(), store.creatures());

    assert_eq!(transport.calls_for("https://db.test/pokemon.json"), 1);
    assert!(Arc::ptr_eq(&a, &b) && Arc::ptr_eq(&b, &c));
    assert_eq!(a.len(), 6);
}

#[tokio::test]
async fn load_all_fetches_each_kind_once() {
    let transport = Arc::new(MockTransport::new().slow());
    let store = store(&transport);

    let (catalog, again) = tokio::join!(store.load_all(), store.load_all());
    let catalog = catalog.unwrap();
    assert!(again.is_ok());

    assert_eq!(transport.calls(), CollectionKind::ALL.len());
    for kind in CollectionKind::ALL {
        assert!(catalog.len(kind) > 0, "{kind} should be loaded");
    }
    assert!(store.failures().is_empty());
}

#[tokio::test]
async fn failed_kind_is_empty_and_never_retried() {
    let transport = Arc::new(MockTransport::new().failing(&[CollectionKind::Moves]));
    let store = store(&transport);

    let catalog = store.load_all().await.unwrap();
    assert!(catalog.moves.is_empty());
    assert_eq!(catalog.creatures.len(), 6);

    assert!(store.moves().await.is_empty());
    assert!(store.moves().await.is_empty());
    assert_eq!(transport.calls_for("https://db.test/moves.json"), 1);

    let failures = store.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, CollectionKind::Moves);
    assert!(failures[0].1.contains("404"));
}

#[tokio::test]
async fn every_kind_failing_is_reported_once() {
    let transport = Arc::new(MockTransport::new().failing(&CollectionKind::ALL));
    let store = store(&transport);

    match store.load_all().await {
        Err(CatalogError::Unavailable { failures }) => assert_eq!(failures.len(), 6),
        Ok(_) => panic!("expected the catalog to be unavailable"),
    }
}

#[tokio::test]
async fn overrides_redirect_a_single_kind() {
    let transport = Arc::new(MockTransport::new());
    let sources = SourceUrls::new("https://db.test/")
        .with_override(CollectionKind::Maps, "https://mirror.test/maps.json");
    let store = CollectionStore::new(transport.clone(), sources);

    let maps = store.maps().await;
    assert_eq!(maps.len(), 3);
    assert_eq!(transport.calls_for("https://mirror.test/maps.json"), 1);
}
