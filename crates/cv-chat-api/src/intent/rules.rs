//! Rule-based intent engine — ordered keyword matching.
//!
//! Answers every message at zero cost with no external dependency. Used
//! directly when no provider is configured and as the fallback whenever
//! the provider fails.

use cv_protocol::chat::ResponseEnvelope;

/// Confidence reported for a matched rule.
pub const MATCHED_CONFIDENCE: f64 = 0.8;
/// Confidence reported when nothing matched.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;
/// Intent label reported when nothing matched.
pub const DEFAULT_INTENT: &str = "default";

pub const DEFAULT_RESPONSE: &str = "I understand you're asking about something specific. While I don't have detailed information about that particular topic, I'd be happy to connect you with our team who can provide comprehensive answers. You can reach us at hello@conversofy.com or would you like to schedule a consultation?";

/// A keyword set and its canned reply.
#[derive(Debug)]
pub struct Rule {
    /// Short name, only used in logs.
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

impl Rule {
    fn matches(&self, lower: &str) -> bool {
        matches_any(lower, self.keywords)
    }
}

/// Rule table. Order is load-bearing: rules overlap (e.g. "help", "start")
/// and the first match wins.
pub static RULES: &[Rule] = &[
    Rule {
        name: "greeting",
        keywords: &["hello", "hi", "hey", "start", "help"],
        response: "Hello! I'm Conversofy's AI assistant. I'm here to help you with questions about our customer service solutions. How can I assist you today?",
    },
    Rule {
        name: "pricing",
        keywords: &["price", "pricing", "cost", "how much", "plan"],
        response: "Our solutions are customized based on your business needs and size. We offer flexible packages for small businesses, medium enterprises, and large corporations. Would you like to schedule a consultation to discuss pricing options that fit your requirements?",
    },
    Rule {
        name: "features",
        keywords: &["feature", "what do", "capability", "function"],
        response: "Conversofy offers automated customer support, multi-channel integration, custom knowledge base setup, and seamless handoff to human agents when needed. What specific features are you most interested in learning about?",
    },
    Rule {
        name: "contact",
        keywords: &["contact", "support", "help", "talk to someone"],
        response: "You can reach our support team at hello@conversofy.com or call us at +1 (724) 221-9876. We're available Monday through Friday, 8am to 5pm. Is there something specific I can help you with right now?",
    },
    Rule {
        name: "onboarding",
        keywords: &["get started", "begin", "start", "sign up"],
        response: "Great! To get started with Conversofy, I'd recommend scheduling a consultation where we can discuss your specific customer service needs. Would you like me to help you with that?",
    },
    Rule {
        name: "small_business",
        keywords: &["small business", "startup", "smb"],
        response: "Perfect! We have specialized solutions for small businesses. Our platform handles common customer inquiries, appointment scheduling, and product information requests so you can focus on running your business. Would you like to learn more about our small business package?",
    },
    Rule {
        name: "enterprise",
        keywords: &["enterprise", "large business", "corporation"],
        response: "Excellent! Our enterprise solutions handle high volumes while maintaining quality. We offer advanced analytics, reporting, and multi-language support. Would you like to learn more about our enterprise package?",
    },
    Rule {
        name: "integration",
        keywords: &["integration", "connect", "api"],
        response: "Conversofy integrates with popular platforms like CRM systems, email, chat, and phone support. We also offer API integrations for custom solutions. What systems are you currently using for customer service?",
    },
];

/// Deterministic keyword classifier over a static rule table.
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine {
    rules: &'static [Rule],
}

impl RuleEngine {
    pub fn new() -> Self {
        Self { rules: RULES }
    }

    /// First rule matching the text, if any.
    pub fn matching_rule(&self, text: &str) -> Option<&'static Rule> {
        let lower = text.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lower))
    }

    /// Classify text into a canned reply. Never fails.
    pub fn classify(&self, text: &str) -> ResponseEnvelope {
        match self.matching_rule(text) {
            Some(rule) => {
                tracing::debug!(rule = rule.name, "rule matched");
                ResponseEnvelope::rule_based(rule.response, None, MATCHED_CONFIDENCE)
            }
            None => ResponseEnvelope::rule_based(
                DEFAULT_RESPONSE,
                Some(DEFAULT_INTENT.to_string()),
                DEFAULT_CONFIDENCE,
            ),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if the text contains any of the given patterns.
fn matches_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}
