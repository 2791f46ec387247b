//! Shared test harness for E2E integration tests.
//!
//! Wires the chat API router to a resolver built exactly as `main` builds
//! it, optionally pointed at a wiremock Dialogflow server.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::MockServer;

use cv_chat_api::config::ApiConfig;
use cv_chat_api::intent::dialogflow::DialogflowConfig;
use cv_chat_api::routes::build_router;
use cv_chat_api::state::AppState;

pub const PROJECT_ID: &str = "conversofy-e2e";
pub const ACCESS_TOKEN: &str = "e2e-token";

/// End-to-end harness around one router instance.
pub struct TestHarness {
    pub state: AppState,
    pub router: Router,
    /// Holds the theme file directory for the harness lifetime.
    pub theme_dir: TempDir,
}

impl TestHarness {
    /// Harness with no provider configured.
    pub fn rule_based() -> Self {
        Self::from_config(ApiConfig::default())
    }

    /// Harness whose Dialogflow provider points at `server`.
    pub fn with_dialogflow(server: &MockServer, timeout_secs: u64) -> Self {
        let mut dialogflow = DialogflowConfig::new(PROJECT_ID);
        dialogflow.endpoint = server.uri();
        dialogflow.access_token = Some(ACCESS_TOKEN.into());
        dialogflow.timeout_secs = timeout_secs;

        Self::from_config(ApiConfig {
            dialogflow: Some(dialogflow),
            ..ApiConfig::default()
        })
    }

    /// Build from a config, the way the binary does.
    pub fn from_config(mut config: ApiConfig) -> Self {
        let theme_dir = tempfile::tempdir().unwrap();
        config.theme_path = theme_dir.path().join("theme.json");

        let state = AppState::from_config(&config);
        let router = build_router(state.clone(), &config.cors_origins);
        Self {
            state,
            router,
            theme_dir,
        }
    }

    /// POST /api/chat. Returns (HTTP status, response JSON body).
    pub async fn chat(&self, message: &str, session_id: &str) -> (StatusCode, serde_json::Value) {
        let body = serde_json::json!({ "message": message, "sessionId": session_id });
        self.post("/api/chat", &body).await
    }

    /// POST a JSON body to `uri`.
    pub async fn post(&self, uri: &str, body: &serde_json::Value) -> (StatusCode, serde_json::Value) {
        post_with(self.router.clone(), uri, body).await
    }

    /// POST raw bytes with a JSON content type.
    pub async fn post_raw(&self, uri: &str, body: &'static str) -> (StatusCode, serde_json::Value) {
        send(
            self.router.clone(),
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// GET `uri`.
    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        send(
            self.router.clone(),
            Request::get(uri).body(Body::empty()).unwrap(),
        )
        .await
    }
}

/// POST a JSON body through an owned router (usable from spawned tasks).
pub async fn post_with(
    router: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(
        router,
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
    )
    .await
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

/// Path wiremock sees for a `detectIntent` call on `session_id`.
pub fn detect_intent_path(session_id: &str) -> String {
    format!("/v2/projects/{PROJECT_ID}/agent/sessions/{session_id}:detectIntent")
}

/// A Dialogflow `detectIntent` response body.
pub fn dialogflow_response(
    intent: &str,
    fulfillment_text: &str,
    confidence: f64,
) -> serde_json::Value {
    serde_json::json!({
        "responseId": "e2e-response",
        "queryResult": {
            "queryText": "irrelevant",
            "parameters": {},
            "allRequiredParamsPresent": true,
            "fulfillmentText": fulfillment_text,
            "intent": {
                "name": format!("projects/{PROJECT_ID}/agent/intents/1"),
                "displayName": intent
            },
            "intentDetectionConfidence": confidence,
            "languageCode": "en"
        }
    })
}
