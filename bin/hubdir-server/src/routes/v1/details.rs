//! Per-image security and build details.
//!
//! Fixed payloads keyed only by the image name in the path; the name is not
//! checked against the catalog.

use std::sync::Arc;

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use hubdir_core::reference::images as reference;
use hubdir_core::reference::{
    AdvisoryInfo, ImageSpecifications, ImageVersion, ProvenanceInfo, SbomPackage, Vulnerability,
};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_versions,
        list_vulnerabilities,
        get_sbom,
        get_provenance,
        list_advisories,
        get_specifications
    ),
    components(schemas(
        ImageVersion,
        Vulnerability,
        SbomPackage,
        ProvenanceInfo,
        AdvisoryInfo,
        ImageSpecifications
    ))
)]
pub struct DetailsApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/images/{name}/versions", get(list_versions))
        .route("/images/{name}/vulnerabilities", get(list_vulnerabilities))
        .route("/images/{name}/sbom", get(get_sbom))
        .route("/images/{name}/provenance", get(get_provenance))
        .route("/images/{name}/advisories", get(list_advisories))
        .route("/images/{name}/specifications", get(get_specifications))
}

#[utoipa::path(
    get,
    path = "/api/v1/images/{name}/versions",
    tag = "image-details",
    params(("name" = String, Path, description = "Image name")),
    responses((status = 200, description = "Published tags", body = [ImageVersion]))
)]
pub async fn list_versions(Path(name): Path<String>) -> Json<Vec<ImageVersion>> {
    Json(reference::versions(&name))
}

#[utoipa::path(
    get,
    path = "/api/v1/images/{name}/vulnerabilities",
    tag = "image-details",
    params(("name" = String, Path, description = "Image name")),
    responses((status = 200, description = "Known CVEs", body = [Vulnerability]))
)]
pub async fn list_vulnerabilities(Path(name): Path<String>) -> Json<Vec<Vulnerability>> {
    Json(reference::vulnerabilities(&name))
}

#[utoipa::path(
    get,
    path = "/api/v1/images/{name}/sbom",
    tag = "image-details",
    params(("name" = String, Path, description = "Image name")),
    responses((status = 200, description = "Software bill of materials", body = [SbomPackage]))
)]
pub async fn get_sbom(Path(name): Path<String>) -> Json<Vec<SbomPackage>> {
    Json(reference::sbom(&name))
}

#[utoipa::path(
    get,
    path = "/api/v1/images/{name}/provenance",
    tag = "image-details",
    params(("name" = String, Path, description = "Image name")),
    responses((status = 200, description = "Build provenance", body = ProvenanceInfo))
)]
pub async fn get_provenance(Path(name): Path<String>) -> Json<ProvenanceInfo> {
    Json(reference::provenance(&name, Utc::now()))
}

#[utoipa::path(
    get,
    path = "/api/v1/images/{name}/advisories",
    tag = "image-details",
    params(("name" = String, Path, description = "Image name")),
    responses((status = 200, description = "Security advisories", body = [AdvisoryInfo]))
)]
pub async fn list_advisories(Path(name): Path<String>) -> Json<Vec<AdvisoryInfo>> {
    Json(reference::advisories(&name, Utc::now()))
}

#[utoipa::path(
    get,
    path = "/api/v1/images/{name}/specifications",
    tag = "image-details",
    params(("name" = String, Path, description = "Image name")),
    responses((status = 200, description = "Image configuration", body = ImageSpecifications))
)]
pub async fn get_specifications(Path(name): Path<String>) -> Json<ImageSpecifications> {
    Json(reference::specifications(&name, Utc::now()))
}
