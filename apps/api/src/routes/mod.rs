pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::generation::handlers as actions;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Actions
        .route(
            "/api/v1/actions/generate-posts",
            post(actions::handle_generate_posts),
        )
        .route(
            "/api/v1/actions/optimize-hashtags",
            post(actions::handle_optimize_hashtags),
        )
        // Session
        .route("/api/v1/session", get(session::handle_get_session))
        .route(
            "/api/v1/session/profile",
            patch(session::handle_update_profile),
        )
        .route("/api/v1/session/generate", post(session::handle_generate))
        .route(
            "/api/v1/session/posts/:index/optimize",
            post(session::handle_optimize_post),
        )
        .route(
            "/api/v1/session/posts/:index/copy/:kind",
            get(session::handle_copy),
        )
        .route(
            "/api/v1/session/posts/:index/image",
            get(session::handle_download_image),
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
    use crate::config::Config;
    use crate::generation::actions::PostActions;
    use crate::images::ImageResolver;
    use crate::models::post::CALENDAR_DAYS;
    use crate::session::controller::SessionController;
    use crate::testing::{calendar_json, MemoryStore, StubModel};

    async fn app(model: StubModel) -> Router {
        let actions = PostActions::new(Arc::new(model), ImageResolver::new(None));
        let session = SessionController::load(Arc::new(MemoryStore::empty()), actions.clone())
            .await
            .unwrap();
        let config = Config::from_lookup(|key| (key == "ANTHROPIC_API_KEY").then(|| "sk-test".to_string()))
            .unwrap();
        build_router(AppState {
            actions,
            session: Arc::new(session),
            config,
        })
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(app(StubModel::replying(Vec::<String>::new())).await, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["photo_search"], false);
    }

    #[tokio::test]
    async fn test_generate_posts_action_success() {
        let profile = json!({
            "companyName": "The Cozy Corner Bakery",
            "industry": "local bakery",
            "targetAudience": "families",
            "goals": "promote sourdough"
        });
        let (status, body) = send(
            app(StubModel::replying([calendar_json(CALENDAR_DAYS)])).await,
            Method::POST,
            "/api/v1/actions/generate-posts",
            Some(profile),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["posts"].as_array().unwrap().len(), CALENDAR_DAYS);
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_optimize_action_failure_is_an_error_body() {
        let (status, body) = send(
            app(StubModel::failing("boom")).await,
            Method::POST,
            "/api/v1/actions/optimize-hashtags",
            Some(json!({"postCopy": "hello", "originalHashtags": ["a", "b", "c"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["error"].as_str().unwrap().contains("Could not optimize hashtags"));
        assert!(body.get("optimizedHashtags").is_none());
    }

    #[tokio::test]
    async fn test_session_profile_then_generate() {
        let app = app(StubModel::replying([calendar_json(CALENDAR_DAYS)])).await;

        let (status, body) = send(
            app.clone(),
            Method::PATCH,
            "/api/v1/session/profile",
            Some(json!({
                "companyName": "Acme Gym",
                "industry": "fitness",
                "targetAudience": "students",
                "goals": "memberships"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"]["companyName"], "Acme Gym");

        let (status, body) = send(app.clone(), Method::POST, "/api/v1/session/generate", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"]["posts"].as_array().unwrap().len(), CALENDAR_DAYS);

        let (status, body) = send(app, Method::GET, "/api/v1/session/posts/0/copy/hashtags", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "#bakery #day1 #fresh");
    }

    #[tokio::test]
    async fn test_unknown_post_is_404() {
        let (status, body) = send(
            app(StubModel::replying(Vec::<String>::new())).await,
            Method::POST,
            "/api/v1/session/posts/5/optimize",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unknown_copy_kind_is_400() {
        let (status, _) = send(
            app(StubModel::replying(Vec::<String>::new())).await,
            Method::GET,
            "/api/v1/session/posts/0/copy/image",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
