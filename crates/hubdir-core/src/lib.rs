//! Storage and query layer of the container image catalog.
//!
//! [`store`] is a thin document store over SQLite, [`catalog`] turns list,
//! search and create requests into store calls, [`reference`] holds the
//! fixed payloads served next to the catalog and [`seed`] the starter data.

pub mod catalog;
pub mod error;
pub mod reference;
pub mod seed;
pub mod store;

pub use catalog::{CatalogEntry, CatalogService, EntryPage, EntryQuery, NewCatalogEntry, Pagination};
pub use error::{CatalogError, StoreError};
pub use store::{DocumentStore, StoreOptions};
