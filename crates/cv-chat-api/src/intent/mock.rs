//! Mock intent provider for testing without Dialogflow.
//!
//! Scripted behavior plus call recording, so tests can drive every
//! resolver path (success, failure, timeout, panic) deterministically.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use super::{DetectedIntent, IntentProvider, ProviderError, SessionContext};

/// A recorded `detect_intent` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub session_id: String,
    pub language_code: String,
    pub text: String,
}

#[derive(Debug, Clone)]
enum Behavior {
    Reply(DetectedIntent),
    Fail,
    Delay(Duration, DetectedIntent),
    Panic,
}

/// Mock implementation of the `IntentProvider` trait.
pub struct MockProvider {
    behavior: Behavior,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockProvider {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `detected`.
    pub fn replying(detected: DetectedIntent) -> Self {
        Self::with_behavior(Behavior::Reply(detected))
    }

    /// Answer with a matched intent and fulfillment text.
    pub fn intent(name: &str, fulfillment_text: &str, confidence: f64) -> Self {
        Self::replying(DetectedIntent {
            intent: Some(name.to_string()),
            fulfillment_text: fulfillment_text.to_string(),
            confidence,
            ..Default::default()
        })
    }

    /// Fail every call with a transport error.
    pub fn failing() -> Self {
        Self::with_behavior(Behavior::Fail)
    }

    /// Sleep for `delay`, then answer with `detected`.
    pub fn slow(delay: Duration, detected: DetectedIntent) -> Self {
        Self::with_behavior(Behavior::Delay(delay, detected))
    }

    /// Panic on every call.
    pub fn panicking() -> Self {
        Self::with_behavior(Behavior::Panic)
    }

    /// Get copies of all recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl IntentProvider for MockProvider {
    async fn detect_intent(
        &self,
        session: &SessionContext<'_>,
        text: &str,
    ) -> Result<DetectedIntent, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            session_id: session.session_id.to_string(),
            language_code: session.language_code.to_string(),
            text: text.to_string(),
        });

        match &self.behavior {
            Behavior::Reply(detected) => Ok(detected.clone()),
            Behavior::Fail => Err(ProviderError::Transport("mock provider down".into())),
            Behavior::Delay(delay, detected) => {
                tokio::time::sleep(*delay).await;
                Ok(detected.clone())
            }
            Behavior::Panic => panic!("mock provider panicked"),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION: SessionContext<'static> = SessionContext {
        session_id: "s-1",
        language_code: "en",
    };

    #[tokio::test]
    async fn records_calls() {
        let mock = MockProvider::intent("PricingInquiry", "It depends.", 0.9);
        let detected = mock.detect_intent(&SESSION, "how much?").await.unwrap();
        assert_eq!(detected.intent.as_deref(), Some("PricingInquiry"));

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].session_id, "s-1");
        assert_eq!(calls[0].text, "how much?");
    }

    #[tokio::test]
    async fn failing_returns_error() {
        let mock = MockProvider::failing();
        assert!(mock.detect_intent(&SESSION, "hi").await.is_err());
        assert_eq!(mock.call_count(), 1);
    }
}
