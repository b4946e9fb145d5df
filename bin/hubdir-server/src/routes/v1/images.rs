use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use hubdir_core::catalog::{CatalogEntry, NewCatalogEntry, Pagination};
use hubdir_core::reference::images::{self as reference, STAT_BUILDS, STAT_PROJECTS, STAT_VERSIONS};
use hubdir_core::reference::Category;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::extract::{ApiJson, ApiQuery};
use crate::schemas::v1::images::{ImageListResponse, ListImagesQuery, StatsResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_images, create_image, get_image, list_categories, get_stats),
    components(schemas(
        CatalogEntry,
        NewCatalogEntry,
        ImageListResponse,
        StatsResponse,
        Category
    ))
)]
pub struct ImagesApi;

/// Register image catalog routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/images", get(list_images).post(create_image))
        .route("/images/categories/list", get(list_categories))
        .route("/images/stats/summary", get(get_stats))
        .route("/images/{name}", get(get_image))
}

#[utoipa::path(
    get,
    path = "/api/v1/images",
    tag = "images",
    params(ListImagesQuery),
    responses(
        (status = 200, description = "One page of images", body = ImageListResponse),
        (status = 422, description = "Invalid page or page_size"),
        (status = 500, description = "Store error"),
    )
)]
pub async fn list_images(
    State(state): State<Arc<AppState>>,
    ApiQuery(q): ApiQuery<ListImagesQuery>,
) -> Result<Json<ImageListResponse>, ServerError> {
    let pagination = Pagination::new(q.page, q.page_size)?;
    let page = state.catalog.list_page(&q.entry_query(), pagination).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/images",
    tag = "images",
    request_body = NewCatalogEntry,
    responses(
        (status = 201, description = "Image created", body = CatalogEntry),
        (status = 409, description = "An image with this name exists"),
        (status = 422, description = "Invalid image"),
        (status = 500, description = "Store error"),
    )
)]
pub async fn create_image(
    State(state): State<Arc<AppState>>,
    ApiJson(candidate): ApiJson<NewCatalogEntry>,
) -> Result<(StatusCode, Json<CatalogEntry>), ServerError> {
    let entry = state.catalog.create_entry(candidate).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    get,
    path = "/api/v1/images/{name}",
    tag = "images",
    params(("name" = String, Path, description = "Image name, e.g. `node`")),
    responses(
        (status = 200, description = "Image found", body = CatalogEntry),
        (status = 404, description = "No image with this name"),
        (status = 500, description = "Store error"),
    )
)]
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<CatalogEntry>, ServerError> {
    state
        .catalog
        .get_entry(&name)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::NotFound(format!("Image '{name}' not found")))
}

#[utoipa::path(
    get,
    path = "/api/v1/images/categories/list",
    tag = "images",
    responses((status = 200, description = "All categories", body = [Category]))
)]
pub async fn list_categories() -> Json<Vec<Category>> {
    Json(reference::categories())
}

#[utoipa::path(
    get,
    path = "/api/v1/images/stats/summary",
    tag = "images",
    responses(
        (status = 200, description = "Platform statistics", body = StatsResponse),
        (status = 500, description = "Store error"),
    )
)]
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, ServerError> {
    let images = state.catalog.count_entries(None).await?;
    Ok(Json(StatsResponse {
        projects: STAT_PROJECTS,
        versions: STAT_VERSIONS,
        images,
        builds: STAT_BUILDS,
    }))
}
