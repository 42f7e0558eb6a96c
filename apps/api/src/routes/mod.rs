pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/evaluate", post(handlers::handle_evaluate))
        .route(
            "/api/evaluation/:user_id",
            get(handlers::handle_get_evaluation),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use crate::errors::AppError;
    use crate::evaluation::EvaluationEngine;
    use crate::llm_client::ModelGateway;
    use crate::store::InMemoryStore;

    struct StubGateway {
        reply: String,
    }

    #[async_trait]
    impl ModelGateway for StubGateway {
        async fn invoke(&self, _prompt: &str) -> Result<String, AppError> {
            Ok(self.reply.clone())
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    fn test_app(reply: &str) -> Router {
        let gateway = Arc::new(StubGateway {
            reply: reply.to_string(),
        });
        let state = AppState {
            engine: Arc::new(EvaluationEngine::new(gateway)),
            store: Arc::new(InMemoryStore::default()),
        };
        build_router(state)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app("");
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body.get("message").is_some());
        assert!(body.get("timestamp").is_some());
    }

    #[tokio::test]
    async fn test_evaluate_missing_required_fields_is_400() {
        let app = test_app("");
        let response = app
            .oneshot(post_json("/api/evaluate", json!({ "skills": "react" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Missing required fields: fullName, skills");
    }

    #[tokio::test]
    async fn test_evaluate_blank_skills_is_400() {
        let app = test_app("");
        let response = app
            .oneshot(post_json(
                "/api/evaluate",
                json!({ "fullName": "Ann", "skills": "" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_evaluate_heuristic_mode() {
        let app = test_app("");
        let response = app
            .oneshot(post_json(
                "/api/evaluate",
                json!({
                    "fullName": "Ann",
                    "skills": "react, node.js, sql",
                    "mode": "heuristic",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        let evaluation = &body["evaluation"];
        assert_eq!(evaluation["readinessScore"], 90);
        assert_eq!(evaluation["eligibility"], "Eligible");
        assert_eq!(evaluation["source"], "heuristic");
        assert_eq!(evaluation["model"], "stub-model");
        assert!(evaluation.get("evaluatedAt").is_some());
    }

    #[tokio::test]
    async fn test_evaluate_generative_mode_with_prose_wrapped_reply() {
        let app = test_app(
            "Sure!\n{\"strengths\":[\"a\",\"b\",\"c\"],\"weaknesses\":[\"x\",\"y\"],\"suggestions\":[\"s\"],\"readinessScore\":82,\"eligibility\":\"Eligible\"}",
        );
        let response = app
            .oneshot(post_json(
                "/api/evaluate",
                json!({ "fullName": "Ann", "skills": "react" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["evaluation"]["readinessScore"], 82);
        assert_eq!(body["evaluation"]["source"], "generative");
    }

    #[tokio::test]
    async fn test_evaluate_malformed_model_reply_is_500() {
        let app = test_app("The profile looks great, maybe an 85?");
        let response = app
            .oneshot(post_json(
                "/api/evaluate",
                json!({ "fullName": "Ann", "skills": "react" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to parse AI response");
    }

    #[tokio::test]
    async fn test_evaluate_with_user_id_persists_and_reads_back() {
        let app = test_app("");
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/evaluate",
                json!({
                    "fullName": "Ann",
                    "skills": "react, node.js, sql",
                    "mode": "heuristic",
                    "userId": "user-1",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/evaluation/user-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["readinessScore"], 90);
        assert_eq!(body["eligibility"], "Eligible");
    }

    #[tokio::test]
    async fn test_second_evaluation_for_same_user_is_409() {
        let app = test_app("");
        let request = json!({
            "fullName": "Ann",
            "skills": "react",
            "mode": "heuristic",
            "userId": "user-1",
        });

        let first = app
            .clone()
            .oneshot(post_json("/api/evaluate", request.clone()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app
            .oneshot(post_json("/api/evaluate", request))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_get_unknown_evaluation_is_404() {
        let app = test_app("");
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/evaluation/nobody")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
