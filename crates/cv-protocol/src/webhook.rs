//! Dialogflow fulfillment webhook payloads.

use serde::{Deserialize, Serialize};

/// `source` tag on a successful webhook reply.
pub const WEBHOOK_SOURCE: &str = "conversofy-webhook";
/// `source` tag when the webhook body could not be handled.
pub const WEBHOOK_ERROR_SOURCE: &str = "conversofy-webhook-error";
/// `source` tag when no provider is configured.
pub const WEBHOOK_UNAVAILABLE_SOURCE: &str = "webhook-unavailable";

/// Fulfillment request sent by Dialogflow (only the fields we read).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub query_result: Option<WebhookQueryResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookQueryResult {
    #[serde(default)]
    pub intent: Option<WebhookIntent>,
    #[serde(default)]
    pub parameters: serde_json::Value,
    #[serde(default)]
    pub query_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookIntent {
    #[serde(default)]
    pub display_name: Option<String>,
}

impl WebhookRequest {
    /// The matched intent, if the request carries one.
    pub fn intent(&self) -> Option<&WebhookIntent> {
        self.query_result.as_ref()?.intent.as_ref()
    }

    /// Display name of the matched intent. `None` when either is absent.
    pub fn intent_name(&self) -> Option<&str> {
        self.intent()?.display_name.as_deref()
    }

    /// String parameter by name, ignoring empty values.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.query_result
            .as_ref()?
            .parameters
            .get(name)?
            .as_str()
            .filter(|s| !s.is_empty())
    }

    pub fn query_text(&self) -> &str {
        self.query_result
            .as_ref()
            .and_then(|q| q.query_text.as_deref())
            .unwrap_or_default()
    }
}

/// Reply returned to Dialogflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub fulfillment_text: String,
    pub source: String,
}

impl WebhookResponse {
    pub fn new(fulfillment_text: impl Into<String>, source: &str) -> Self {
        Self {
            fulfillment_text: fulfillment_text.into(),
            source: source.to_string(),
        }
    }
}
