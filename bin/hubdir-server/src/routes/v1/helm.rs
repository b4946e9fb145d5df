use std::sync::Arc;

use axum::extract::Path;
use axum::routing::get;
use axum::{Json, Router};
use hubdir_core::reference::helm;
use hubdir_core::reference::HelmChart;
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(list_charts, get_chart), components(schemas(HelmChart)))]
pub struct HelmApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/helm/charts", get(list_charts))
        .route("/helm/charts/{chart_name}", get(get_chart))
}

#[utoipa::path(
    get,
    path = "/api/v1/helm/charts",
    tag = "helm",
    responses((status = 200, description = "Available Helm charts", body = [HelmChart]))
)]
pub async fn list_charts() -> Json<Vec<HelmChart>> {
    Json(helm::charts())
}

/// Any chart name resolves to a generic description.
#[utoipa::path(
    get,
    path = "/api/v1/helm/charts/{chart_name}",
    tag = "helm",
    params(("chart_name" = String, Path, description = "Chart name")),
    responses((status = 200, description = "Chart description", body = HelmChart))
)]
pub async fn get_chart(Path(chart_name): Path<String>) -> Json<HelmChart> {
    Json(helm::chart_stub(&chart_name))
}
