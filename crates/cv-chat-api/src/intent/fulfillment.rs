//! Webhook fulfillment: fixed replies keyed by Dialogflow intent name.

use cv_protocol::webhook::WebhookRequest;

/// Reply text for the intent named in a webhook request.
pub fn fulfillment_text(intent_name: &str, request: &WebhookRequest) -> String {
    match intent_name {
        "Default Welcome Intent" => "Hi! I'm Conversofy's AI assistant. I'm here to help you with any questions about our customer service solutions. How can I assist you today?".to_string(),
        "GetStarted" => "Great! To get started with Conversofy, I'd recommend scheduling a consultation where we can discuss your specific customer service needs. Would you like me to help you with that?".to_string(),
        "PricingInquiry" => "Our solutions are customized based on your business needs and size. We offer flexible packages for small businesses, medium enterprises, and large corporations. Would you like to schedule a consultation to discuss pricing options that fit your requirements?".to_string(),
        "FeatureInquiry" => "Conversofy offers automated customer support, multi-channel integration, custom knowledge base setup, and seamless handoff to human agents when needed. What specific features are you most interested in learning about?".to_string(),
        "SupportContact" => "You can reach our support team at hello@conversofy.com or call us at +1 (724) 221-9876. We're available Monday through Friday, 8am to 5pm. Is there something specific I can help you with right now?".to_string(),
        "BusinessSizeInquiry" => match request.parameter("businessSize") {
            Some(size) => format!(
                "Perfect! We have specialized solutions for {size}. Our platform scales to meet your needs whether you're handling dozens or thousands of customer inquiries. Would you like to learn more about our {size} package?"
            ),
            None => "We work with businesses of all sizes - from small businesses to large enterprises. What size would best describe your business?".to_string(),
        },
        "IntegrationInquiry" => "Conversofy integrates with popular platforms like CRM systems, email, chat, and phone support. We also offer API integrations for custom solutions. What systems are you currently using for customer service?".to_string(),
        _ => format!(
            "I understand you're asking about \"{}\". While I don't have specific information about that, I'd be happy to connect you with our team who can provide detailed answers. You can reach us at hello@conversofy.com or would you like to schedule a consultation?",
            request.query_text()
        ),
    }
}
