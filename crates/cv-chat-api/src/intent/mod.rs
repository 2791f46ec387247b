//! Natural-language intent resolution for chat messages.
//!
//! Turns a visitor's message ("how much does it cost?") into a
//! `ResponseEnvelope` with reply text, intent label and confidence.
//!
//! Two sources:
//! - **Dialogflow** (external): optional NLU provider, one attempt per request.
//! - **Rule-based** (local): ordered keyword table, always available.

pub mod dialogflow;
pub mod fulfillment;
pub mod mock;
pub mod resolver;
pub mod rules;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

pub use mock::MockProvider;
pub use resolver::IntentResolver;
pub use rules::RuleEngine;

/// Per-call correlation data handed to the provider.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext<'a> {
    pub session_id: &'a str,
    pub language_code: &'a str,
}

/// What an external provider understood from the text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectedIntent {
    pub query_text: Option<String>,
    /// Display name of the matched intent.
    pub intent: Option<String>,
    pub fulfillment_text: String,
    pub confidence: f64,
    pub parameters: serde_json::Value,
    pub all_required_params_present: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider misconfigured: {0}")]
    Config(String),

    #[error("provider request failed: {0}")]
    Transport(String),

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("provider timed out after {0:?}")]
    Timeout(Duration),
}

/// External NLU capability.
///
/// Implementations must be stateless with respect to sessions: the session
/// is passed on every call, so one client serves all requests.
#[async_trait]
pub trait IntentProvider: Send + Sync {
    async fn detect_intent(
        &self,
        session: &SessionContext<'_>,
        text: &str,
    ) -> Result<DetectedIntent, ProviderError>;

    /// Name of this provider (for logging).
    fn provider_name(&self) -> &str;
}

#[async_trait]
impl<T: IntentProvider + ?Sized> IntentProvider for Arc<T> {
    async fn detect_intent(
        &self,
        session: &SessionContext<'_>,
        text: &str,
    ) -> Result<DetectedIntent, ProviderError> {
        (**self).detect_intent(session, text).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}

/// Provider availability, decided once at startup.
pub enum Provider {
    Unconfigured,
    Configured(Box<dyn IntentProvider>),
}

impl Provider {
    pub fn configured(provider: impl IntentProvider + 'static) -> Self {
        Self::Configured(Box::new(provider))
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Unconfigured => "none",
            Self::Configured(p) => p.provider_name(),
        }
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Provider").field(&self.name()).finish()
    }
}
