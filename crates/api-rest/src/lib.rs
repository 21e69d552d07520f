//! # API REST
//!
//! REST API for the OPG triage service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, API-key checks)
//!
//! Uses `api-shared` for wire types and `triage-core` for everything else.

#![warn(rust_2018_idioms)]

pub mod error;
mod handlers;

use api_shared::auth::{validate_api_key, API_KEY_HEADER};
use api_shared::{
    CandidateConditionMsg, ConditionMsg, CreateSessionReq, ErrorRes, HealthRes, ListSymptomsRes,
    RecommendReq, RecommendRes, ReportRes, SelectedSymptomMsg, SessionRes, SetSeverityReq,
    SetSeverityRes, SymptomRes, ToggleSymptomRes,
};
use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use error::ApiError;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use triage_core::TriageService;

/// Application state shared across REST API handlers
///
/// Holds the triage service and, when configured, the API key every route except `/health`
/// must present.
#[derive(Clone)]
pub struct AppState {
    pub service: TriageService,
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(service: TriageService, api_key: Option<&str>) -> Self {
        Self {
            service,
            api_key: api_key.map(Arc::from),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_symptoms,
        handlers::recommend,
        handlers::create_session,
        handlers::get_session,
        handlers::end_session,
        handlers::toggle_symptom,
        handlers::set_severity,
        handlers::submit,
        handlers::get_report
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        SymptomRes,
        ListSymptomsRes,
        SelectedSymptomMsg,
        RecommendReq,
        RecommendRes,
        CreateSessionReq,
        SessionRes,
        ToggleSymptomRes,
        SetSeverityReq,
        SetSeverityRes,
        ConditionMsg,
        CandidateConditionMsg,
        ReportRes
    ))
)]
pub struct ApiDoc;

/// Build the REST router.
///
/// `/health`, `/swagger-ui` and `/api-docs/openapi.json` are always open. Every other route
/// checks the `x-api-key` header when `state.api_key` is set.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/symptoms", get(handlers::list_symptoms))
        .route("/recommend", post(handlers::recommend))
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/:id",
            get(handlers::get_session).delete(handlers::end_session),
        )
        .route(
            "/sessions/:id/symptoms/:name/toggle",
            post(handlers::toggle_symptom),
        )
        .route("/sessions/:id/symptoms/:name", put(handlers::set_severity))
        .route("/sessions/:id/submit", post(handlers::submit))
        .route("/sessions/:id/report", get(handlers::get_report))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn require_api_key(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(expected) = state.api_key.as_deref() else {
        return next.run(req).await;
    };

    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    match validate_api_key(provided, expected) {
        Ok(()) => next.run(req).await,
        Err(e) => ApiError::Unauthorized(e.to_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;
    use triage_core::{
        Condition, ConditionPredictor, Prediction, PredictorError, PredictorResult,
        ProbabilityLabel, SelectedSymptom, SymptomCatalog,
    };

    struct FixedPredictor;

    #[async_trait::async_trait]
    impl ConditionPredictor for FixedPredictor {
        async fn predict(&self, _symptoms: &[SelectedSymptom]) -> PredictorResult<Prediction> {
            Ok(Prediction {
                summary: "Periodontal involvement likely".into(),
                conditions: vec![
                    Condition {
                        name: "Periodontitis".into(),
                        probability_label: ProbabilityLabel::High,
                        description: "Gum disease".into(),
                    },
                    Condition {
                        name: "Bone loss".into(),
                        probability_label: ProbabilityLabel::Medium,
                        description: String::new(),
                    },
                ],
            })
        }
    }

    struct DownPredictor;

    #[async_trait::async_trait]
    impl ConditionPredictor for DownPredictor {
        async fn predict(&self, _symptoms: &[SelectedSymptom]) -> PredictorResult<Prediction> {
            Err(PredictorError::Status(503))
        }
    }

    fn app_with(predictor: Arc<dyn ConditionPredictor>, api_key: Option<&str>) -> Router {
        let service = TriageService::new(
            Arc::new(SymptomCatalog::builtin()),
            predictor,
            Duration::from_secs(2),
        );
        router(AppState::new(service, api_key))
    }

    fn app() -> Router {
        app_with(Arc::new(FixedPredictor), None)
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        call_raw(app, method, uri, body.map(|b| b.to_string())).await
    }

    async fn call_raw(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let builder = axum::http::Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let res = app.clone().oneshot(req).await.expect("response");
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, value)
    }

    async fn new_session(app: &Router) -> String {
        let (status, body) = call(
            app,
            Method::POST,
            "/sessions",
            Some(json!({
                "patient_name": "Amina Yusuf",
                "age": "34",
                "gender": "Female",
                "phone_number": "+44 7700 900123"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().expect("id").to_string()
    }

    #[tokio::test]
    async fn health_is_open() {
        let app = app_with(Arc::new(FixedPredictor), Some("s3cret"));
        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn protected_routes_require_api_key_when_configured() {
        let app = app_with(Arc::new(FixedPredictor), Some("s3cret"));

        let (status, body) = call(&app, Method::GET, "/symptoms", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Missing x-api-key header");

        let req = axum::http::Request::builder()
            .uri("/symptoms")
            .header(API_KEY_HEADER, "s3cret")
            .body(Body::empty())
            .expect("request");
        let res = app.clone().oneshot(req).await.expect("response");
        assert_eq!(res.status(), StatusCode::OK);

        let req = axum::http::Request::builder()
            .uri("/symptoms")
            .header(API_KEY_HEADER, "wrong")
            .body(Body::empty())
            .expect("request");
        let res = app.oneshot(req).await.expect("response");
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn symptoms_are_listed_in_catalog_order() {
        let (status, body) = call(&app(), Method::GET, "/symptoms", None).await;
        assert_eq!(status, StatusCode::OK);
        let symptoms = body["symptoms"].as_array().expect("array");
        assert_eq!(symptoms.len(), 10);
        assert_eq!(symptoms[0]["name"], "Tooth sensitivity");
        assert_eq!(symptoms[9]["name"], "Dry mouth");
    }

    #[tokio::test]
    async fn recommend_scores_without_a_session() {
        let (status, body) = call(
            &app(),
            Method::POST,
            "/recommend",
            Some(json!({"symptoms": [{"name": "Loose teeth", "severity": 10}]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 60);
        assert_eq!(body["tier"], "consider");
        assert_eq!(body["needs_imaging"], true);
        assert_eq!(
            body["advisory_text"],
            "Consider OPG: Moderate probability of clinical findings"
        );
    }

    #[tokio::test]
    async fn recommend_rejects_empty_and_out_of_range_input() {
        let (status, body) = call(
            &app(),
            Method::POST,
            "/recommend",
            Some(json!({"symptoms": []})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please select at least one symptom");

        let (status, _) = call(
            &app(),
            Method::POST,
            "/recommend",
            Some(json!({"symptoms": [{"name": "Dry mouth", "severity": 11}]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn undecodable_bodies_are_json_bad_requests() {
        let app = app();
        for body in [
            r#"{"symptoms": [{"name": "Dry mouth", "severity": "high"}]}"#,
            r#"{"symptoms": [{"name": "Dry mouth", "severity": 5.5}]}"#,
            r#"{"symptoms": ["#,
        ] {
            let (status, res) =
                call_raw(&app, Method::POST, "/recommend", Some(body.to_string())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert!(res["error"].is_string(), "body: {body}");
        }

        let id = new_session(&app).await;
        call(
            &app,
            Method::POST,
            &format!("/sessions/{id}/symptoms/Dry%20mouth/toggle"),
            None,
        )
        .await;
        let (status, res) = call_raw(
            &app,
            Method::PUT,
            &format!("/sessions/{id}/symptoms/Dry%20mouth"),
            Some(r#"{"severity": "high"}"#.to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(res["error"].is_string());
    }

    #[tokio::test]
    async fn create_session_rejects_blank_fields() {
        let (status, body) = call(
            &app(),
            Method::POST,
            "/sessions",
            Some(json!({
                "patient_name": "",
                "age": "34",
                "gender": "Female",
                "phone_number": "+44 7700 900123"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "All fields are required!");
    }

    #[tokio::test]
    async fn session_flow_produces_report() {
        let app = app();
        let id = new_session(&app).await;

        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/sessions/{id}/symptoms/Loose%20teeth/toggle"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["selected"], true);
        assert_eq!(body["severity"], 5);

        let (status, body) = call(
            &app,
            Method::PUT,
            &format!("/sessions/{id}/symptoms/Loose%20teeth"),
            Some(json!({"severity": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["severity"], 10);

        let (status, body) = call(&app, Method::POST, &format!("/sessions/{id}/submit"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["patient_name"], "Amina Yusuf");
        assert_eq!(body["score"], 60);
        assert_eq!(body["tier"], "consider");
        assert_eq!(body["conditions_message"], "Detected Conditions (2)");
        assert_eq!(body["differential"].as_array().expect("array").len(), 2);
        assert_eq!(body["prediction_failed"], false);

        let (status, report) =
            call(&app, Method::GET, &format!("/sessions/{id}/report"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["summary"], "Periodontal involvement likely");

        let (status, session) = call(&app, Method::GET, &format!("/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["has_report"], true);
    }

    #[tokio::test]
    async fn failed_prediction_still_returns_advisory() {
        let app = app_with(Arc::new(DownPredictor), None);
        let id = new_session(&app).await;
        call(
            &app,
            Method::POST,
            &format!("/sessions/{id}/symptoms/Tooth%20sensitivity/toggle"),
            None,
        )
        .await;

        let (status, body) = call(&app, Method::POST, &format!("/sessions/{id}/submit"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction_failed"], true);
        assert_eq!(body["score"], 20);
        assert_eq!(
            body["advisory_text"],
            "OPG not necessary: Low probability of significant findings"
        );
        assert_eq!(body["conditions"].as_array().expect("array").len(), 0);
    }

    #[tokio::test]
    async fn submit_without_symptoms_is_bad_request() {
        let app = app();
        let id = new_session(&app).await;
        let (status, _) = call(&app, Method::POST, &format!("/sessions/{id}/submit"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(&app, Method::GET, &format!("/sessions/{id}/report"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_symptom_and_bad_ids_are_rejected() {
        let app = app();
        let id = new_session(&app).await;

        let (status, _) = call(
            &app,
            Method::POST,
            &format!("/sessions/{id}/symptoms/Hiccups/toggle"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call(&app, Method::GET, "/sessions/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid session id");

        let (status, _) = call(
            &app,
            Method::GET,
            &format!("/sessions/{}", uuid::Uuid::new_v4()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn ended_session_is_gone() {
        let app = app();
        let id = new_session(&app).await;

        let (status, _) = call(&app, Method::DELETE, &format!("/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = call(&app, Method::GET, &format!("/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, body) = call(&app(), Method::GET, "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/sessions/{id}/submit"].is_object());
    }
}
