use std::cell::RefCell;
use std::collections::HashMap;

use retbro_core::metadata::{NO_INFO, UNKNOWN};

use super::*;
use crate::provider::OfflineProvider;
use crate::types::ProviderPayload;

/// Answers from a fixed table of raw response bodies and records every query.
#[derive(Default)]
struct TableProvider {
    bodies: HashMap<String, String>,
    queries: RefCell<Vec<String>>,
}

impl TableProvider {
    fn with(mut self, key: &str, body: &str) -> Self {
        self.bodies.insert(key.to_string(), body.to_string());
        self
    }

    fn query_count(&self) -> usize {
        self.queries.borrow().len()
    }
}

impl MetadataProvider for TableProvider {
    fn name(&self) -> &str {
        "table"
    }

    async fn query(&self, lookup_key: &str) -> Result<ProviderPayload, ScrapeError> {
        self.queries.borrow_mut().push(lookup_key.to_string());
        match self.bodies.get(lookup_key) {
            Some(body) => ProviderPayload::decode(body),
            None => Err(ScrapeError::not_found(lookup_key)),
        }
    }
}

const MEGA_MAN: &str = r#"{"response": {"jeu": [
    {"noms": [{"region": "us", "text": "Mega Man 2"}]},
    {"noms": [{"region": "us", "text": "Mega Man"}],
     "developpeur": {"text": "Capcom"},
     "medias": [{"type": "box-2D", "url": "https://box/mm.png"}]}
]}}"#;

#[tokio::test]
async fn queries_with_lookup_key_and_normalizes() {
    let resolver = MetadataResolver::new(TableProvider::default().with("Mega Man", MEGA_MAN));
    let record = resolver.get_metadata("Mega Man (USA) [!]").await;

    assert_eq!(resolver.provider().queries.borrow().as_slice(), ["Mega Man"]);
    assert_eq!(record.name, "Mega Man");
    assert_eq!(record.developer, "Capcom");
    assert_eq!(record.cover_image_url, "https://box/mm.png");
}

#[tokio::test]
async fn cache_hit_returns_identical_record_without_query() {
    let resolver = MetadataResolver::new(TableProvider::default().with("Mega Man", MEGA_MAN));
    let first = resolver.get_metadata("Mega Man (USA)").await;
    let second = resolver.get_metadata("Mega Man (USA)").await;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(resolver.provider().query_count(), 1);
}

#[tokio::test]
async fn failure_yields_cached_fallback() {
    let resolver = MetadataResolver::new(TableProvider::default());
    let record = resolver.get_metadata("Foo (Europe)").await;

    assert_eq!(record.name, "Foo (Europe)");
    assert_eq!(record.description, NO_INFO);
    for field in [&record.system, &record.developer, &record.publisher, &record.players, &record.year] {
        assert_eq!(field, UNKNOWN);
    }
    assert!(record.cover_image_url.contains("Foo"));

    let again = resolver.get_metadata("Foo (Europe)").await;
    assert!(Arc::ptr_eq(&record, &again));
    assert_eq!(resolver.provider().query_count(), 1);
}

#[tokio::test]
async fn fallback_is_deterministic_across_sessions() {
    let a = MetadataResolver::new(OfflineProvider).get_metadata("Foo").await;
    let b = MetadataResolver::new(OfflineProvider).get_metadata("Foo").await;
    assert_eq!(a, b);
    assert_ne!(
        a.cover_image_url,
        MetadataResolver::new(OfflineProvider).get_metadata("Bar").await.cover_image_url
    );
}

#[tokio::test]
async fn unmatched_response_falls_back() {
    let resolver = MetadataResolver::new(
        TableProvider::default().with("Metroid", r#"[{"name": "Contra"}]"#),
    );
    let record = resolver.get_metadata("Metroid").await;
    assert_eq!(record.description, NO_INFO);
}

#[tokio::test]
async fn clearing_forces_a_new_query() {
    let resolver = MetadataResolver::new(TableProvider::default().with("Mega Man", MEGA_MAN));
    let first = resolver.get_metadata("Mega Man (USA)").await;
    resolver.clear_cache();
    assert!(resolver.cached("Mega Man (USA)").is_none());

    let second = resolver.get_metadata("Mega Man (USA)").await;
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
    assert_eq!(resolver.provider().query_count(), 2);
}

#[tokio::test]
async fn colliding_lookup_keys_share_the_query_key_only() {
    let resolver = MetadataResolver::new(TableProvider::default().with("Mega Man", MEGA_MAN));
    resolver.get_metadata("Mega Man (USA)").await;
    resolver.get_metadata("Mega Man (Japan)").await;

    assert_eq!(resolver.cache_len(), 2);
    assert_eq!(
        resolver.provider().queries.borrow().as_slice(),
        ["Mega Man", "Mega Man"]
    );
}

#[tokio::test]
async fn custom_placeholder_base() {
    let resolver = MetadataResolver::new(OfflineProvider)
        .with_placeholders(PlaceholderImages::new("https://img.local/cover"));
    let record = resolver.get_metadata("Contra (USA)").await;
    assert_eq!(record.cover_image_url, "https://img.local/cover?random=Contra");
}
