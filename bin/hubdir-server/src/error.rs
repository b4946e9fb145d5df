//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors become a JSON-body HTTP
//! response with an appropriate status code.
//!
//! Store failures are logged with full detail but only a generic message
//! reaches the caller, so SQL and file paths never leak to clients.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hubdir_core::{CatalogError, StoreError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// All errors that can occur in the hubdir-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Propagated from the document store.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The caller referenced a resource that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request body could not be parsed at all.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The resource already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Well-formed request with invalid values.
    #[error("unprocessable: {0}")]
    Unprocessable(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            ServerError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
            ServerError::Unprocessable(m) => (StatusCode::UNPROCESSABLE_ENTITY, m.clone()),

            ServerError::Store(e) => {
                error!(error = %e, "store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

impl From<CatalogError> for ServerError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::Store(e) => ServerError::Store(e),
            CatalogError::Duplicate(name) => {
                ServerError::Conflict(format!("Image '{name}' already exists"))
            }
            CatalogError::Validation(e) => ServerError::Unprocessable(e.to_string()),
            CatalogError::InvalidPagination(m) => ServerError::Unprocessable(m),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::UNPROCESSABLE_ENTITY => ServerError::Unprocessable(rejection.body_text()),
            _ => ServerError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::Unprocessable(rejection.body_text())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn catalog_errors_map_to_client_statuses() {
        let dup: ServerError = CatalogError::Duplicate("node".into()).into();
        assert_eq!(dup.into_response().status(), StatusCode::CONFLICT);

        let page: ServerError = CatalogError::InvalidPagination("page".into()).into();
        assert_eq!(page.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let store: ServerError = CatalogError::Store(StoreError::NotInitialized).into();
        assert_eq!(
            store.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn store_failures_hide_their_detail() {
        let err: ServerError = CatalogError::Store(StoreError::Unavailable(sqlx::Error::Protocol(
            "no such table: documents".into(),
        )))
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "internal server error" }));
    }
}
