pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::recommend::handlers as recommend;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Users and skill rosters
        .route("/api/v1/users", post(users::handle_create_user))
        .route("/api/v1/login", post(users::handle_login))
        .route(
            "/api/v1/users/:id/skills",
            get(users::handle_list_skills).post(users::handle_add_skill),
        )
        .route(
            "/api/v1/users/:id/skills/:skill",
            delete(users::handle_remove_skill),
        )
        // Recommendations
        .route(
            "/api/v1/users/:id/recommendations",
            get(recommend::handle_user_recommendations),
        )
        .route(
            "/api/v1/recommendations",
            post(recommend::handle_adhoc_recommendations),
        )
        // Catalog
        .route("/api/v1/careers", get(catalog::handle_list_careers))
        .route("/api/v1/careers/:id", get(catalog::handle_get_career))
        .route(
            "/api/v1/catalog/reload",
            post(catalog::handle_reload_catalog),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::provider::StaticCatalogProvider;
    use crate::catalog::store::CatalogStore;
    use crate::config::{CatalogSource, Config};
    use crate::users::memory::MemoryUserStore;

    async fn test_app() -> Router {
        let provider = Arc::new(StaticCatalogProvider::seeded().unwrap());
        let catalog = CatalogStore::load(provider).await.unwrap();

        build_router(AppState {
            config: Config {
                database_url: String::new(),
                database_max_connections: 1,
                port: 0,
                rust_log: "debug".to_string(),
                recommendation_limit: 3,
                seed_catalog: false,
                catalog_source: CatalogSource::Static,
            },
            catalog,
            users: Arc::new(MemoryUserStore::new()),
        })
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(v) => Body::from(v.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_user(app: &Router, name: &str) -> String {
        let (status, body) =
            send(app, Method::POST, "/api/v1/users", Some(json!({ "username": name }))).await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_user_lifecycle_and_recommendations() {
        let app = test_app().await;
        let id = create_user(&app, "ada").await;

        let (status, body) =
            send(&app, Method::POST, "/api/v1/login", Some(json!({ "username": " ada " }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id.as_str());

        for skill in ["troubleshooting", "  HARDWARE "] {
            let (status, body) = send(
                &app,
                Method::POST,
                &format!("/api/v1/users/{id}/skills"),
                Some(json!({ "skill": skill })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["message"], "skill added");
        }

        let (_, body) = send(&app, Method::GET, &format!("/api/v1/users/{id}/skills"), None).await;
        assert_eq!(body["skills"], json!(["Hardware", "Troubleshooting"]));

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/users/{id}/recommendations"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0]["career"], "biomedical-equipment-technician");
        assert_eq!(recs[0]["score"], 0.333);
        assert_eq!(recs[0]["matched_skills"], json!(["Troubleshooting", "Hardware"]));
        assert_eq!(recs[0]["next_steps"].as_array().unwrap().len(), 3);
        assert_eq!(recs[0]["next_steps"][0]["skill"], "Schematics");
        assert_eq!(recs[1]["career"], "servicenow-developer");
    }

    #[tokio::test]
    async fn test_duplicate_user_and_skill_conflict() {
        let app = test_app().await;
        let id = create_user(&app, "ada").await;

        let (status, body) =
            send(&app, Method::POST, "/api/v1/users", Some(json!({ "username": "ada" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");

        let uri = format!("/api/v1/users/{id}/skills");
        send(&app, Method::POST, &uri, Some(json!({ "skill": "Patience" }))).await;
        let (status, _) = send(&app, Method::POST, &uri, Some(json!({ "skill": "patience" }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_remove_skill() {
        let app = test_app().await;
        let id = create_user(&app, "ada").await;
        let uri = format!("/api/v1/users/{id}/skills");
        send(&app, Method::POST, &uri, Some(json!({ "skill": "Patience" }))).await;

        let (status, body) = send(&app, Method::DELETE, &format!("{uri}/patience"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skill"], "Patience");

        let (status, _) = send(&app, Method::DELETE, &format!("{uri}/patience"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validation_and_not_found() {
        let app = test_app().await;

        let (status, _) =
            send(&app, Method::POST, "/api/v1/users", Some(json!({ "username": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            send(&app, Method::POST, "/api/v1/login", Some(json!({ "username": "ghost" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let missing = uuid::Uuid::new_v4();
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/users/{missing}/recommendations"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let id = create_user(&app, "ada").await;
        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/v1/users/{id}/skills"),
            Some(json!({ "skill": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::GET,
            &format!("/api/v1/users/{id}/recommendations?limit=0"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_adhoc_recommendations() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/recommendations",
            Some(json!({ "skills": ["Patience", "computer", "Magnets"], "limit": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0]["career"], "penguin-counter");
        assert_eq!(recs[0]["score"], 0.4);
        assert_eq!(
            recs[0]["missing_skills"],
            json!(["Basic Statistics", "Attention To Detail", "Resistance To Cold"])
        );

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/v1/recommendations",
            Some(json!({ "skills": [] })),
        )
        .await;
        assert_eq!(body["recommendations"], json!([]));
    }

    #[tokio::test]
    async fn test_list_careers_and_reload() {
        let app = test_app().await;

        let (status, body) = send(&app, Method::GET, "/api/v1/careers", None).await;
        assert_eq!(status, StatusCode::OK);
        let careers = body.as_array().unwrap();
        assert_eq!(careers.len(), 3);
        assert_eq!(careers[0]["id"], "servicenow-developer");
        assert_eq!(careers[0]["required_skills"].as_array().unwrap().len(), 6);
        assert_eq!(careers[0]["resources"].as_array().unwrap().len(), 6);

        let (status, body) =
            send(&app, Method::GET, "/api/v1/careers/penguin-counter", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["display_name"], "Penguin Counter");

        let (status, _) = send(&app, Method::GET, "/api/v1/careers/astronaut", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::POST, "/api/v1/catalog/reload", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["careers"], 3);
        assert_eq!(body["resources"], 16);
    }
}
