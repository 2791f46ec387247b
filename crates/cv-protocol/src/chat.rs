use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which subsystem produced a chat response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Source {
    /// The external NLU provider answered.
    External,
    /// The keyword rule engine answered (no provider, or provider failed).
    RuleBased,
    /// Unexpected internal failure; only ever seen on a 500 body.
    Error,
}

/// Request body for `POST /api/chat`.
///
/// Both fields are optional on the wire so that a missing `message`
/// surfaces as a validation error rather than a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            session_id: Some(session_id.into()),
        }
    }

    /// Validate the request and turn it into an [`Utterance`].
    ///
    /// A missing or blank session id is replaced with a fresh UUIDv7 so the
    /// provider always gets a correlation token.
    pub fn into_utterance(self) -> Result<Utterance, UtteranceError> {
        let session_id = self
            .session_id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Uuid::now_v7().to_string());
        Utterance::new(self.message.unwrap_or_default(), session_id)
    }
}

/// A single validated user message plus its session correlation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    text: String,
    session_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UtteranceError {
    #[error("Message is required")]
    EmptyText,
}

impl Utterance {
    /// Build an utterance, rejecting text that is empty after trimming.
    pub fn new(
        text: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Result<Self, UtteranceError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(UtteranceError::EmptyText);
        }
        Ok(Self {
            text,
            session_id: session_id.into(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Normalized output of every resolution path.
///
/// Serializes directly as the `200` body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Reply shown to the user. Never empty.
    #[serde(rename = "response")]
    pub response_text: String,
    /// Intent label, when the classifier produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    /// Classifier certainty in `[0, 1]`.
    pub confidence: f64,
    pub source: Source,
}

impl ResponseEnvelope {
    pub fn rule_based(
        response_text: impl Into<String>,
        intent: Option<String>,
        confidence: f64,
    ) -> Self {
        Self {
            response_text: response_text.into(),
            intent,
            confidence,
            source: Source::RuleBased,
        }
    }

    pub fn external(
        response_text: impl Into<String>,
        intent: Option<String>,
        confidence: f64,
    ) -> Self {
        Self {
            response_text: response_text.into(),
            intent,
            confidence,
            source: Source::External,
        }
    }
}
