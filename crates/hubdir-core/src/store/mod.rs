//! Document store adapter.
//!
//! [`DocumentStore`] owns the single connection pool of the process and hands
//! out [`Collection`] handles scoped to a logical collection name. Documents
//! are schema-flexible JSON objects keyed by their `_id` member; the backing
//! engine is SQLite through [`sqlx`], with every collection sharing the
//! `documents` table created by the embedded migrations.
//!
//! No retries, no caching and no pooling policy beyond what `sqlx`
//! provides.

mod collection;
mod filter;

pub use collection::{Collection, Document, ID_FIELD};
pub use filter::Filter;

use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::StoreError;

/// Connection parameters for [`DocumentStore::connect`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// sqlx-compatible SQLite URL, e.g. `"sqlite://hubdir.db"` or
    /// `"sqlite::memory:"`.
    pub url: String,
    /// Upper bound on pooled connections. In-memory databases always use one,
    /// since every SQLite connection would otherwise see its own database.
    pub max_connections: u32,
}

impl StoreOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
        }
    }

    /// A private in-memory database, mostly useful for tests.
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:")
    }

    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    fn is_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Process-wide handle to the persistent document store.
///
/// Construct once, [`connect`](Self::connect) before serving traffic, share
/// through an `Arc`, and [`close`](Self::close) on shutdown.
#[derive(Debug)]
pub struct DocumentStore {
    options: StoreOptions,
    pool: RwLock<Option<SqlitePool>>,
}

impl DocumentStore {
    /// Create an adapter that is not yet connected.
    pub fn new(options: StoreOptions) -> Self {
        Self {
            options,
            pool: RwLock::new(None),
        }
    }

    /// Open the pool, verify liveness with a no-op ping and apply pending
    /// migrations. Every connection gets the `REGEXP` function used by
    /// [`Filter::ContainsIgnoreCase`]. A second call on a connected store does nothing.
    pub async fn connect(&self) -> Result<(), StoreError> {
        if self.is_connected() {
            return Ok(());
        }

        let connect_options = SqliteConnectOptions::from_str(&self.options.url)
            .map_err(StoreError::Connection)?
            .create_if_missing(true)
            .with_regexp();

        let pool_options = if self.options.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(self.options.max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(StoreError::Connection)?;

        if let Err(e) = sqlx::query("SELECT 1").execute(&pool).await {
            pool.close().await;
            return Err(StoreError::Connection(e));
        }

        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
            pool.close().await;
            return Err(e.into());
        }

        let previous = self
            .pool
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(pool);
        if let Some(previous) = previous {
            warn!("document store connected twice concurrently; closing the older pool");
            previous.close().await;
        }

        info!(url = %self.options.url, "document store connected");
        Ok(())
    }

    /// Release the pool. Idempotent, and a no-op on a store that never
    /// connected.
    pub async fn close(&self) {
        let pool = self
            .pool
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(pool) = pool {
            pool.close().await;
            info!("document store closed");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Handle to the collection `name`.
    ///
    /// Fails with [`StoreError::NotInitialized`] before `connect()` or after
    /// `close()`.
    pub fn collection(&self, name: &str) -> Result<Collection, StoreError> {
        let guard = self.pool.read().unwrap_or_else(PoisonError::into_inner);
        let pool = guard.as_ref().ok_or(StoreError::NotInitialized)?;
        Ok(Collection::new(name, pool.clone()))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    async fn connected() -> DocumentStore {
        let store = DocumentStore::new(StoreOptions::in_memory());
        store.connect().await.expect("connect in-memory store");
        store
    }

    #[test]
    fn collection_before_connect_is_not_initialized() {
        let store = DocumentStore::new(StoreOptions::in_memory());
        assert!(matches!(
            store.collection("images"),
            Err(StoreError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn close_is_idempotent_and_safe_when_never_connected() {
        let never = DocumentStore::new(StoreOptions::in_memory());
        never.close().await;
        never.close().await;

        let store = connected().await;
        assert!(store.is_connected());
        store.close().await;
        store.close().await;
        assert!(!store.is_connected());
        assert!(matches!(
            store.collection("images"),
            Err(StoreError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn unreachable_store_fails_with_connection_error() {
        let store = DocumentStore::new(StoreOptions::new(
            "sqlite:///hubdir-missing-dir/nested/hubdir.db",
        ));
        let err = store.connect().await.expect_err("connect should fail");
        assert!(matches!(err, StoreError::Connection(_)), "got {err:?}");
        assert!(!store.is_connected());
    }

    #[tokio::test]
    async fn connect_twice_keeps_data() {
        let store = connected().await;
        let images = store.collection("images").unwrap();
        images
            .insert_one(doc(json!({ "_id": "node", "name": "node" })))
            .await
            .unwrap();
        store.connect().await.unwrap();
        let images = store.collection("images").unwrap();
        assert_eq!(images.count(&Filter::All).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_preserves_insertion_order_and_windows() {
        let store = connected().await;
        let c = store.collection("images").unwrap();
        for name in ["e", "a", "d", "b", "c"] {
            c.insert_one(doc(json!({ "_id": name, "name": name })))
                .await
                .unwrap();
        }

        let ids = |docs: Vec<Document>| -> Vec<String> {
            docs.iter()
                .map(|d| d[ID_FIELD].as_str().unwrap().to_owned())
                .collect()
        };

        assert_eq!(
            ids(c.find(&Filter::All, 0, 100).await.unwrap()),
            ["e", "a", "d", "b", "c"]
        );
        assert_eq!(ids(c.find(&Filter::All, 1, 2).await.unwrap()), ["a", "d"]);
        assert_eq!(ids(c.find(&Filter::All, 4, 2).await.unwrap()), ["c"]);
        assert!(c.find(&Filter::All, 5, 2).await.unwrap().is_empty());
        assert!(c.find(&Filter::All, 0, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = connected().await;
        let images = store.collection("images").unwrap();
        let other = store.collection("other").unwrap();
        images
            .insert_one(doc(json!({ "_id": "node" })))
            .await
            .unwrap();
        other.insert_one(doc(json!({ "_id": "node" }))).await.unwrap();

        assert_eq!(images.count(&Filter::All).await.unwrap(), 1);
        let (deleted, inserted) = other
            .replace_all(vec![doc(json!({ "_id": "a" })), doc(json!({ "_id": "b" }))])
            .await
            .unwrap();
        assert_eq!((deleted, inserted), (1, 2));
        assert_eq!(other.count(&Filter::All).await.unwrap(), 2);
        assert_eq!(images.count(&Filter::All).await.unwrap(), 1);
        assert!(images.find_one("node").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_and_missing_id() {
        let store = connected().await;
        let c = store.collection("images").unwrap();
        c.insert_one(doc(json!({ "_id": "node", "downloads": 1 })))
            .await
            .unwrap();

        let err = c
            .insert_one(doc(json!({ "_id": "node", "downloads": 2 })))
            .await
            .unwrap_err();
        assert!(
            matches!(&err, StoreError::DuplicateKey { id, .. } if id == "node"),
            "got {err:?}"
        );
        let stored = c.find_one("node").await.unwrap().unwrap();
        assert_eq!(stored["downloads"], 1);

        let err = c.insert_one(doc(json!({ "name": "x" }))).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingId));
        let err = c.insert_one(doc(json!({ "_id": 7 }))).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingId));
    }

    #[tokio::test]
    async fn insert_many_is_all_or_nothing() {
        let store = connected().await;
        let c = store.collection("images").unwrap();
        let err = c
            .insert_many(vec![
                doc(json!({ "_id": "a" })),
                doc(json!({ "_id": "b" })),
                doc(json!({ "_id": "a" })),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));
        assert_eq!(c.count(&Filter::All).await.unwrap(), 0);

        let inserted = c
            .insert_many(vec![doc(json!({ "_id": "a" })), doc(json!({ "_id": "b" }))])
            .await
            .unwrap();
        assert_eq!(inserted, 2);

        let err = c
            .replace_all(vec![doc(json!({ "_id": "z" })), doc(json!({ "name": "no id" }))])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingId));
        assert!(c.find_one("a").await.unwrap().is_some());
        assert!(c.find_one("z").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn filters_compose() {
        let store = connected().await;
        let c = store.collection("images").unwrap();
        c.insert_many(vec![
            doc(json!({ "_id": "node", "category": "featured", "description": "JavaScript runtime" })),
            doc(json!({ "_id": "nginx", "category": "featured", "description": "HTTP server" })),
            doc(json!({ "_id": "python", "category": "starter", "description": "Scripting language" })),
            doc(json!({ "_id": "legacy" })),
        ])
        .await
        .unwrap();

        let featured = Filter::eq("category", "featured");
        assert_eq!(c.count(&featured).await.unwrap(), 2);

        let script = Filter::or(vec![
            Filter::contains_ignore_case("_id", "SCRIPT"),
            Filter::contains_ignore_case("description", "SCRIPT"),
        ]);
        assert_eq!(c.count(&script).await.unwrap(), 2);
        assert_eq!(c.count(&featured.clone().and(script)).await.unwrap(), 1);

        assert_eq!(c.count(&Filter::or(Vec::new())).await.unwrap(), 0);
        assert_eq!(c.count(&Filter::and_all(Vec::new())).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn contains_is_literal() {
        let store = connected().await;
        let c = store.collection("images").unwrap();
        c.insert_many(vec![
            doc(json!({ "_id": "a", "name": "100% free" })),
            doc(json!({ "_id": "b", "name": "snake_case" })),
            doc(json!({ "_id": "c", "name": "plain" })),
        ])
        .await
        .unwrap();

        assert_eq!(
            c.count(&Filter::contains_ignore_case("name", "%")).await.unwrap(),
            1
        );
        assert_eq!(
            c.count(&Filter::contains_ignore_case("name", "_")).await.unwrap(),
            1
        );
        assert_eq!(
            c.count(&Filter::contains_ignore_case("name", "p.ain")).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn contains_folds_unicode_case() {
        let store = connected().await;
        let c = store.collection("images").unwrap();
        c.insert_many(vec![
            doc(json!({ "_id": "a", "name": "Ærøskøbing" })),
            doc(json!({ "_id": "b", "name": "ΣΊΣΥΦΟΣ" })),
            doc(json!({ "_id": "c", "name": "ascii only" })),
        ])
        .await
        .unwrap();

        let count = |needle: &'static str| {
            let c = c.clone();
            async move {
                c.count(&Filter::contains_ignore_case("name", needle))
                    .await
                    .unwrap()
            }
        };
        assert_eq!(count("ærø").await, 1);
        assert_eq!(count("SKØB").await, 1);
        assert_eq!(count("σίσυφ").await, 1);
        assert_eq!(count("ASCII").await, 1);
        assert_eq!(count("ø").await, 1);
    }

    #[tokio::test]
    async fn contains_reads_the_first_present_field() {
        let store = connected().await;
        let c = store.collection("images").unwrap();
        c.insert_many(vec![
            doc(json!({ "_id": "legacy" })),
            doc(json!({ "_id": "renamed", "name": "nginx" })),
        ])
        .await
        .unwrap();

        let name_or_id =
            |needle: &str| Filter::first_contains_ignore_case(["name", ID_FIELD], needle);
        assert_eq!(c.count(&name_or_id("LEGACY")).await.unwrap(), 1);
        assert_eq!(c.count(&name_or_id("nginx")).await.unwrap(), 1);
        // A present `name` hides `_id`.
        assert_eq!(c.count(&name_or_id("renamed")).await.unwrap(), 0);
    }
}
