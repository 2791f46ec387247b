//! E2E tests for the external provider path and its rule-based fallback.
//!
//! A wiremock server stands in for Dialogflow; every failure mode it can
//! produce must still yield a 200 answered by the rule engine.

mod helpers;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cv_chat_api::intent::resolver::EMPTY_FULFILLMENT_FALLBACK;
use cv_chat_api::intent::rules::{DEFAULT_RESPONSE, RULES};
use helpers::{ACCESS_TOKEN, TestHarness, detect_intent_path, dialogflow_response};

#[tokio::test]
async fn e2e_provider_answer_is_external() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(detect_intent_path("s-1")))
        .and(header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str()))
        .and(body_json(json!({
            "queryInput": {"text": {"text": "How much is it?", "languageCode": "en"}}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(dialogflow_response("PricingInquiry", "It depends.", 0.92)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = TestHarness::with_dialogflow(&server, 5);
    let (status, json) = h.chat("How much is it?", "s-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "It depends.");
    assert_eq!(json["intent"], "PricingInquiry");
    assert_eq!(json["confidence"], 0.92);
    assert_eq!(json["source"], "external");
}

#[tokio::test]
async fn e2e_provider_error_falls_back_to_rules() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let h = TestHarness::with_dialogflow(&server, 5);
    let (status, json) = h.chat("what's the pricing?", "s-500").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], RULES[1].response);
    assert_eq!(json["source"], "ruleBased");
    assert_eq!(json["confidence"], 0.8);
    assert!(json.get("intent").is_none());
}

#[tokio::test]
async fn e2e_provider_timeout_falls_back_to_rules() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(dialogflow_response("PricingInquiry", "too late", 0.9))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let h = TestHarness::with_dialogflow(&server, 1);
    let started = std::time::Instant::now();
    let (status, json) = h.chat("purple elephant", "s-slow").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], DEFAULT_RESPONSE);
    assert_eq!(json["intent"], "default");
    assert_eq!(json["source"], "ruleBased");
    assert!(
        started.elapsed() < Duration::from_secs(3),
        "timeout should cut the provider call short"
    );
}

#[tokio::test]
async fn e2e_empty_fulfillment_uses_substitute_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(dialogflow_response("SmallTalk", "", 0.7)),
        )
        .mount(&server)
        .await;

    let h = TestHarness::with_dialogflow(&server, 5);
    let (status, json) = h.chat("hmm", "s-empty").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], EMPTY_FULFILLMENT_FALLBACK);
    assert_eq!(json["intent"], "SmallTalk");
    assert_eq!(json["source"], "external");
}

#[tokio::test]
async fn e2e_malformed_provider_body_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let h = TestHarness::with_dialogflow(&server, 5);
    let (status, json) = h.chat("hello there", "s-html").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], RULES[0].response);
    assert_eq!(json["source"], "ruleBased");
}

#[tokio::test]
async fn e2e_generated_session_id_reaches_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(dialogflow_response("Default Welcome Intent", "Hi!", 1.0)),
        )
        .mount(&server)
        .await;

    let h = TestHarness::with_dialogflow(&server, 5);
    let (status, json) = h.post("/api/chat", &json!({ "message": "hi" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "external");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let path = requests[0].url.path();
    assert!(path.ends_with(":detectIntent"));
    let session = path
        .trim_end_matches(":detectIntent")
        .rsplit('/')
        .next()
        .unwrap();
    assert_eq!(session.len(), 36, "expected a UUID session id, got {session}");
}

#[tokio::test]
async fn e2e_health_reports_dialogflow() {
    let server = MockServer::start().await;
    let h = TestHarness::with_dialogflow(&server, 5);

    let (status, json) = h.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["provider"], "dialogflow");
}

#[tokio::test]
async fn e2e_webhook_fulfills_when_configured() {
    let server = MockServer::start().await;
    let h = TestHarness::with_dialogflow(&server, 5);

    let body = json!({
        "queryResult": {
            "intent": {"displayName": "BusinessSizeInquiry"},
            "parameters": {"businessSize": "startups"},
            "queryText": "we are a startup"
        }
    });
    let (status, json) = h.post("/api/dialogflow-webhook", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "conversofy-webhook");
    assert!(
        json["fulfillmentText"]
            .as_str()
            .unwrap()
            .contains("specialized solutions for startups")
    );
}

#[tokio::test]
async fn e2e_webhook_unknown_intent_echoes_query() {
    let server = MockServer::start().await;
    let h = TestHarness::with_dialogflow(&server, 5);

    let body = json!({
        "queryResult": {
            "intent": {"displayName": "Mystery"},
            "queryText": "quantum billing"
        }
    });
    let (status, json) = h.post("/api/dialogflow-webhook", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        json["fulfillmentText"]
            .as_str()
            .unwrap()
            .contains("\"quantum billing\"")
    );
}
