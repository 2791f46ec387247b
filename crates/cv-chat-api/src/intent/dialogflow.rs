//! Dialogflow ES intent provider — v2 REST `detectIntent`.
//!
//! One long-lived `reqwest::Client` serves every session; the session id
//! only appears in the request path.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::{DetectedIntent, IntentProvider, ProviderError, SessionContext};

/// Configuration for the Dialogflow provider.
#[derive(Debug, Clone, Deserialize)]
pub struct DialogflowConfig {
    /// Google Cloud project that owns the agent.
    pub project_id: String,
    /// OAuth bearer token. Without one the provider stays unconfigured.
    #[serde(default)]
    pub access_token: Option<String>,
    /// API base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_language_code")]
    pub language_code: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://dialogflow.googleapis.com".into()
}
fn default_language_code() -> String {
    "en".into()
}
fn default_timeout_secs() -> u64 {
    5
}

impl DialogflowConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            access_token: None,
            endpoint: default_endpoint(),
            language_code: default_language_code(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `detectIntent` request body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentRequest<'a> {
    query_input: QueryInput<'a>,
}

#[derive(Serialize)]
struct QueryInput<'a> {
    text: TextInput<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TextInput<'a> {
    text: &'a str,
    language_code: &'a str,
}

/// `detectIntent` response (only fields we need).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DetectIntentResponse {
    query_result: Option<QueryResult>,
}

/// Proto3 JSON omits zero values, so every field is defaulted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResult {
    #[serde(default)]
    query_text: Option<String>,
    #[serde(default)]
    intent: Option<IntentRef>,
    #[serde(default)]
    fulfillment_text: String,
    #[serde(default)]
    intent_detection_confidence: f64,
    #[serde(default)]
    parameters: serde_json::Value,
    #[serde(default)]
    all_required_params_present: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntentRef {
    #[serde(default)]
    display_name: Option<String>,
}

/// Dialogflow ES REST client.
pub struct DialogflowProvider {
    client: reqwest::Client,
    endpoint: Url,
    project_id: String,
    access_token: String,
}

impl DialogflowProvider {
    pub fn new(config: &DialogflowConfig) -> Result<Self, ProviderError> {
        let access_token = config
            .access_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProviderError::Config("no access token".into()))?;

        if config.project_id.trim().is_empty() {
            return Err(ProviderError::Config("empty project id".into()));
        }

        // A zero timeout would expire every call before it could complete.
        if config.timeout_secs == 0 {
            return Err(ProviderError::Config("timeout_secs must be at least 1".into()));
        }

        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| ProviderError::Config(format!("invalid endpoint: {e}")))?;
        if endpoint.cannot_be_a_base() {
            return Err(ProviderError::Config(format!(
                "endpoint {} cannot be a base URL",
                config.endpoint
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ProviderError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            project_id: config.project_id.clone(),
            access_token,
        })
    }

    /// `{endpoint}/v2/projects/{project}/agent/sessions/{session}:detectIntent`
    fn detect_intent_url(&self, session_id: &str) -> Result<Url, ProviderError> {
        let session_segment = format!("{session_id}:detectIntent");
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Config("endpoint cannot be a base URL".into()))?
            .pop_if_empty()
            .extend([
                "v2",
                "projects",
                self.project_id.as_str(),
                "agent",
                "sessions",
                session_segment.as_str(),
            ]);
        Ok(url)
    }
}

#[async_trait]
impl IntentProvider for DialogflowProvider {
    async fn detect_intent(
        &self,
        session: &SessionContext<'_>,
        text: &str,
    ) -> Result<DetectedIntent, ProviderError> {
        let url = self.detect_intent_url(session.session_id)?;
        let body = DetectIntentRequest {
            query_input: QueryInput {
                text: TextInput {
                    text,
                    language_code: session.language_code,
                },
            },
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: DetectIntentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let result = parsed
            .query_result
            .ok_or_else(|| ProviderError::Malformed("missing queryResult".into()))?;

        Ok(DetectedIntent {
            query_text: result.query_text,
            intent: result.intent.and_then(|i| i.display_name),
            fulfillment_text: result.fulfillment_text,
            confidence: result.intent_detection_confidence,
            parameters: result.parameters,
            all_required_params_present: result.all_required_params_present,
        })
    }

    fn provider_name(&self) -> &str {
        "dialogflow"
    }
}
