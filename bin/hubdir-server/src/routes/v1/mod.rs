pub mod details;
pub mod helm;
pub mod images;

use crate::state::AppState;
use utoipa::OpenApi;

use axum::Router;
use std::sync::Arc;

/// Routes nested under `/api/v1`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(images::router())
        .merge(details::router())
        .merge(helm::router())
}

#[derive(OpenApi)]
#[openapi()]
pub struct V1Api;

pub fn api_docs() -> utoipa::openapi::OpenApi {
    let mut doc = V1Api::openapi();
    doc.merge(images::ImagesApi::openapi());
    doc.merge(details::DetailsApi::openapi());
    doc.merge(helm::HelmApi::openapi());
    doc
}
