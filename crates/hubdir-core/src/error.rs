use thiserror::Error;

/// Errors raised by the document store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached while connecting. Fatal at startup.
    #[error("failed to connect to document store: {0}")]
    Connection(#[source] sqlx::Error),

    /// Embedded schema migrations could not be applied.
    #[error("failed to apply store migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// A collection was requested before `connect()` or after `close()`.
    #[error("document store is not initialized")]
    NotInitialized,

    /// The store failed mid-operation. Not retried.
    #[error("document store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    /// A document with the same `_id` already exists in the collection.
    #[error("duplicate key {id:?} in collection {collection:?}")]
    DuplicateKey { collection: String, id: String },

    /// A document handed to `insert_*` has no string `_id` member.
    #[error("document has no string `_id`")]
    MissingId,

    /// A stored body is not a JSON object.
    #[error("malformed document {id:?}: {message}")]
    MalformedDocument { id: String, message: String },
}

/// Errors raised by the catalog query service.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An entry with this name already exists.
    #[error("image {0:?} already exists")]
    Duplicate(String),

    /// The create candidate failed field validation.
    #[error("invalid image: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// `page` or `page_size` out of range.
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),
}
