//! Intent resolver — provider first, rule engine fallback.
//!
//! One provider attempt per request, bounded by a timeout. Any provider
//! failure is logged and absorbed; the caller always gets an envelope.

use std::time::Duration;

use cv_protocol::chat::{ResponseEnvelope, Utterance};
use tokio::time::timeout;

use super::dialogflow::{DialogflowConfig, DialogflowProvider};
use super::{DetectedIntent, Provider, ProviderError, RuleEngine, SessionContext};

/// Substituted when the provider answers with an empty fulfillment text.
pub const EMPTY_FULFILLMENT_FALLBACK: &str =
    "I'm sorry, I couldn't process that request. Please try again or contact our support team.";

pub const DEFAULT_LANGUAGE_CODE: &str = "en";
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

/// Chooses between the external provider and the rule engine per request.
#[derive(Debug)]
pub struct IntentResolver {
    provider: Provider,
    rules: RuleEngine,
    language_code: String,
    timeout: Duration,
}

impl IntentResolver {
    pub fn new(provider: Provider, language_code: impl Into<String>, timeout: Duration) -> Self {
        Self {
            provider,
            rules: RuleEngine::new(),
            language_code: language_code.into(),
            timeout,
        }
    }

    /// Resolver with no provider: every message goes to the rule engine.
    pub fn rule_based() -> Self {
        Self::new(
            Provider::Unconfigured,
            DEFAULT_LANGUAGE_CODE,
            DEFAULT_PROVIDER_TIMEOUT,
        )
    }

    /// Resolver with `provider` and default language/timeout.
    pub fn with_provider(provider: Provider) -> Self {
        Self::new(provider, DEFAULT_LANGUAGE_CODE, DEFAULT_PROVIDER_TIMEOUT)
    }

    /// Build from configuration. A missing section, missing credentials, or
    /// a client that fails to build all leave the provider unconfigured.
    pub fn from_config(config: Option<&DialogflowConfig>) -> Self {
        let Some(config) = config else {
            tracing::info!("dialogflow not configured, using rule-based responses");
            return Self::rule_based();
        };

        let provider = match DialogflowProvider::new(config) {
            Ok(provider) => {
                tracing::info!(
                    project_id = %config.project_id,
                    language_code = %config.language_code,
                    timeout_secs = config.timeout_secs,
                    "dialogflow provider initialized"
                );
                Provider::configured(provider)
            }
            Err(e) => {
                tracing::warn!(error = %e, "dialogflow initialization failed, using rule-based responses");
                Provider::Unconfigured
            }
        };

        Self::new(provider, config.language_code.clone(), config.timeout())
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Resolve an utterance. Never fails.
    pub async fn resolve(&self, utterance: &Utterance) -> ResponseEnvelope {
        let Provider::Configured(provider) = &self.provider else {
            return self.rules.classify(utterance.text());
        };

        let session = SessionContext {
            session_id: utterance.session_id(),
            language_code: &self.language_code,
        };

        let result = match timeout(
            self.timeout,
            provider.detect_intent(&session, utterance.text()),
        )
        .await
        {
            Ok(result) => result.and_then(normalize),
            Err(_) => Err(ProviderError::Timeout(self.timeout)),
        };

        match result {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = provider.provider_name(),
                    session_id = %utterance.session_id(),
                    "intent provider failed, falling back to rules"
                );
                self.rules.classify(utterance.text())
            }
        }
    }
}

/// Turn provider output into an external envelope, rejecting results that
/// break the envelope contract.
fn normalize(detected: DetectedIntent) -> Result<ResponseEnvelope, ProviderError> {
    if !detected.confidence.is_finite() || !(0.0..=1.0).contains(&detected.confidence) {
        return Err(ProviderError::Malformed(format!(
            "confidence {} outside [0, 1]",
            detected.confidence
        )));
    }

    let text = if detected.fulfillment_text.trim().is_empty() {
        EMPTY_FULFILLMENT_FALLBACK.to_string()
    } else {
        detected.fulfillment_text
    };

    Ok(ResponseEnvelope::external(
        text,
        detected.intent,
        detected.confidence,
    ))
}
