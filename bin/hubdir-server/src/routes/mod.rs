//! Axum router construction.
//!
//! [`build`] assembles the complete application router:
//! - Middleware layers (CORS, per-request trace id)
//! - Optional Swagger UI at `/api/docs` (disable with `HUBDIR_ENABLE_SWAGGER=false`)
//! - API root and health routes
//! - Catalog routes under `/api/v1`

pub mod doc;
mod health;
mod v1;

use axum::{middleware, Router};
use std::sync::Arc;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{cors, trace};
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(health::router())
        .nest("/api/v1", v1::router());

    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", doc::get_docs()));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(cors::cors_layer(&state.config))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use hubdir_core::catalog::CatalogService;
    use hubdir_core::seed::default_images;
    use hubdir_core::{DocumentStore, StoreOptions};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app_with(config: Config, seeded: bool) -> Router {
        let store = Arc::new(DocumentStore::new(StoreOptions::in_memory()));
        store.connect().await.unwrap();
        let catalog = CatalogService::new(store);
        if seeded {
            catalog.reseed(default_images()).await.unwrap();
        }
        build(Arc::new(AppState {
            config: Arc::new(config),
            catalog,
        }))
    }

    async fn app() -> Router {
        app_with(Config::default(), true).await
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn valkey_candidate() -> Value {
        json!({
            "name": "valkey",
            "logo": "https://logos.test/valkey.svg",
            "description": "Key value store",
            "category": "application",
            "latest_tag": "8.0",
            "size": "40MB",
            "badge": "community"
        })
    }

    #[tokio::test]
    async fn list_defaults_to_first_page() {
        let (status, body) = send(app().await, get("/api/v1/images")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 15);
        assert_eq!(body["page"], 1);
        assert_eq!(body["page_size"], 50);
        assert_eq!(body["images"].as_array().unwrap().len(), 15);
        assert_eq!(body["images"][0]["name"], "node");
    }

    #[tokio::test]
    async fn list_filters_and_pages() {
        let (status, body) = send(
            app().await,
            get("/api/v1/images?category=featured&page=2&page_size=3"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 4);
        let images = body["images"].as_array().unwrap();
        assert_eq!(images.len(), 1);
        assert!(images.iter().all(|i| i["category"] == "featured"));

        let (_, body) = send(app().await, get("/api/v1/images?search=PYTHON")).await;
        assert_eq!(body["total"], 1);
        assert_eq!(body["images"][0]["name"], "python");
    }

    #[tokio::test]
    async fn list_rejects_out_of_range_pagination() {
        for uri in [
            "/api/v1/images?page=0",
            "/api/v1/images?page_size=0",
            "/api/v1/images?page_size=101",
            "/api/v1/images?page=-1",
        ] {
            let (status, body) = send(app().await, get(uri)).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert!(body["error"].as_str().unwrap().contains("page"), "{uri}");
        }
    }

    #[tokio::test]
    async fn get_image_and_not_found() {
        let (status, body) = send(app().await, get("/api/v1/images/nginx")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "nginx");
        assert_eq!(body["badge"], "community");

        let (status, body) = send(app().await, get("/api/v1/images/does-not-exist")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Image 'does-not-exist' not found");
    }

    #[tokio::test]
    async fn create_then_conflict() {
        let app = app_with(Config::default(), false).await;
        let (status, body) = send(
            app.clone(),
            post_json("/api/v1/images", &valkey_candidate()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "valkey");
        assert_eq!(body["last_changed"], "just now");
        assert_eq!(body["downloads"], 0);
        assert_eq!(body["is_free"], true);

        let (status, body) = send(
            app.clone(),
            post_json("/api/v1/images", &valkey_candidate()),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Image 'valkey' already exists");

        let (_, body) = send(app, get("/api/v1/images/stats/summary")).await;
        assert_eq!(body["images"], 1);
    }

    #[tokio::test]
    async fn create_rejects_invalid_candidates() {
        let mut bad_name = valkey_candidate();
        bad_name["name"] = json!("Not A Name");
        let (status, _) = send(app().await, post_json("/api/v1/images", &bad_name)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let mut bad_badge = valkey_candidate();
        bad_badge["badge"] = json!("gold");
        let (status, body) = send(app().await, post_json("/api/v1/images", &bad_badge)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());

        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/images")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, _) = send(app().await, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn stats_and_categories() {
        let (status, body) = send(app().await, get("/api/v1/images/stats/summary")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "projects": 1756, "versions": 105204, "images": 15, "builds": 308074969u64 })
        );

        let (status, body) = send(app().await, get("/api/v1/images/categories/list")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 6);
        assert_eq!(body[0], json!({ "id": "featured", "name": "Featured", "icon": "⭐" }));
    }

    #[tokio::test]
    async fn detail_and_helm_routes() {
        let (status, body) = send(app().await, get("/api/v1/images/redis/versions")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["pull_url"], "hub.opensource.dev/redis:latest");

        for path in ["vulnerabilities", "sbom", "provenance", "advisories", "specifications"] {
            let (status, _) =
                send(app().await, get(&format!("/api/v1/images/redis/{path}"))).await;
            assert_eq!(status, StatusCode::OK, "{path}");
        }

        let (_, body) = send(app().await, get("/api/v1/helm/charts")).await;
        assert_eq!(body.as_array().unwrap().len(), 4);
        let (_, body) = send(app().await, get("/api/v1/helm/charts/traefik")).await;
        assert_eq!(body["name"], "traefik");
    }

    #[tokio::test]
    async fn health_root_and_trace_header() {
        let trace_id = "7f9c2ba4-e88f-4b6e-9d0a-3c1f2e4b5a6d";
        let req = Request::builder()
            .uri("/api/health")
            .header("x-trace-id", trace_id)
            .body(Body::empty())
            .unwrap();
        let response = app().await.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-trace-id"], trace_id);

        let (status, body) = send(app().await, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["docs"], "/api/docs");
        assert_eq!(body["environment"], "development");
    }

    #[tokio::test]
    async fn store_failure_returns_generic_500() {
        let path =
            std::env::temp_dir().join(format!("hubdir-server-{}.db", uuid::Uuid::new_v4()));
        let url = format!("sqlite://{}", path.display());
        let store = Arc::new(DocumentStore::new(StoreOptions::new(url.clone())));
        store.connect().await.unwrap();
        let catalog = CatalogService::new(store.clone());
        catalog.reseed(default_images()).await.unwrap();
        let app = build(Arc::new(AppState {
            config: Arc::new(Config::default()),
            catalog,
        }));

        let raw = sqlx::SqlitePool::connect(&url).await.unwrap();
        sqlx::query("DROP TABLE documents")
            .execute(&raw)
            .await
            .unwrap();
        raw.close().await;

        for req in [
            get("/api/v1/images"),
            get("/api/v1/images/nginx"),
            get("/api/v1/images/stats/summary"),
            post_json("/api/v1/images", &valkey_candidate()),
        ] {
            let uri = req.uri().to_string();
            let (status, body) = send(app.clone(), req).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert_eq!(body, json!({ "error": "internal server error" }), "{uri}");
        }

        store.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
    }

    #[tokio::test]
    async fn openapi_document_follows_swagger_flag() {
        let (status, body) = send(app().await, get("/api/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/v1/images"].is_object());

        let config = Config {
            enable_swagger: false,
            ..Config::default()
        };
        let (status, _) = send(app_with(config, false).await, get("/api/openapi.json")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
