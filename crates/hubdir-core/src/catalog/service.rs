use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use validator::Validate;

use super::entry::JUST_NOW;
use super::query::category_filter;
use super::{CatalogEntry, EntryPage, EntryQuery, NewCatalogEntry, Pagination};
use crate::error::{CatalogError, StoreError};
use crate::seed::SeedEntry;
use crate::store::{Collection, DocumentStore};

/// Collection holding catalog entries.
pub const IMAGES_COLLECTION: &str = "images";

/// Query and filtering service over the image collection.
///
/// Holds no state besides the injected store: every call re-reads from the
/// store, and store failures surface unchanged without retries.
#[derive(Debug, Clone)]
pub struct CatalogService {
    store: Arc<DocumentStore>,
    collection: String,
}

impl CatalogService {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self::with_collection(store, IMAGES_COLLECTION)
    }

    pub fn with_collection(store: Arc<DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    fn images(&self) -> Result<Collection, StoreError> {
        self.store.collection(&self.collection)
    }

    /// Entries matching `query` in store order, windowed by `skip`/`limit`.
    /// An empty result is not an error.
    pub async fn list_entries(
        &self,
        query: &EntryQuery,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<CatalogEntry>, CatalogError> {
        let filter = query.to_filter();
        debug!(?filter, skip, limit, "listing catalog entries");
        let docs = self.images()?.find(&filter, skip, limit).await?;
        Ok(docs.iter().map(CatalogEntry::from_document).collect())
    }

    /// Exact lookup by name. `Ok(None)` when there is no such entry.
    pub async fn get_entry(&self, name: &str) -> Result<Option<CatalogEntry>, CatalogError> {
        let doc = self.images()?.find_one(name).await?;
        Ok(doc.as_ref().map(CatalogEntry::from_document))
    }

    /// Number of entries in `category` (`None`/`"all"` for every entry).
    /// Search terms never apply here.
    pub async fn count_entries(&self, category: Option<&str>) -> Result<u64, CatalogError> {
        Ok(self.images()?.count(&category_filter(category)).await?)
    }

    /// Number of entries matching both the category and the search term.
    pub async fn count_matching(&self, query: &EntryQuery) -> Result<u64, CatalogError> {
        Ok(self.images()?.count(&query.to_filter()).await?)
    }

    /// One page of `query` plus the total across all pages.
    ///
    /// The page and the total are two separate store reads, so a concurrent
    /// insert can make them disagree by that insert.
    pub async fn list_page(
        &self,
        query: &EntryQuery,
        pagination: Pagination,
    ) -> Result<EntryPage, CatalogError> {
        let entries = self
            .list_entries(query, pagination.skip(), pagination.limit())
            .await?;
        let total = self.count_matching(query).await?;
        Ok(EntryPage {
            entries,
            total,
            page: pagination.page(),
            page_size: pagination.page_size(),
        })
    }

    /// Validate and insert a new entry, returning it as persisted.
    ///
    /// Names are unique: an existing name is rejected with
    /// [`CatalogError::Duplicate`], including when a concurrent create wins
    /// the race between the existence check and the insert.
    pub async fn create_entry(
        &self,
        candidate: NewCatalogEntry,
    ) -> Result<CatalogEntry, CatalogError> {
        candidate.validate()?;
        let images = self.images()?;
        let name = candidate.name.clone();

        if images.find_one(&name).await?.is_some() {
            return Err(CatalogError::Duplicate(name));
        }

        let document = candidate.into_document(JUST_NOW, Utc::now());
        match images.insert_one(document).await {
            Ok(()) => {}
            Err(StoreError::DuplicateKey { .. }) => return Err(CatalogError::Duplicate(name)),
            Err(e) => return Err(e.into()),
        }
        info!(name = %name, collection = images.name(), "catalog entry created");

        let stored = images
            .find_one(&name)
            .await?
            .ok_or_else(|| StoreError::Unavailable(sqlx::Error::RowNotFound))?;
        Ok(CatalogEntry::from_document(&stored))
    }

    /// Replace the whole collection with `entries` in one transaction.
    /// Returns the number of entries inserted.
    pub async fn reseed(&self, entries: Vec<SeedEntry>) -> Result<u64, CatalogError> {
        for seed in &entries {
            seed.entry.validate()?;
        }
        let now = Utc::now();
        let documents = entries
            .into_iter()
            .map(|seed| seed.entry.into_document(seed.last_changed, now))
            .collect();
        let (deleted, inserted) = self.images()?.replace_all(documents).await?;
        info!(deleted, inserted, collection = %self.collection, "catalog reseeded");
        Ok(inserted)
    }
}
