//! Catalog query service.
//!
//! Translates filtered, searchable, paginated list requests into store
//! filters, and maps stored documents into fully populated
//! [`CatalogEntry`] records at the store boundary.

mod entry;
mod query;
mod service;

pub use entry::{Badge, CatalogEntry, NewCatalogEntry, JUST_NOW};
pub use query::{
    EntryPage, EntryQuery, Pagination, ALL_CATEGORIES, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use service::{CatalogService, IMAGES_COLLECTION};
