use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact form body for `POST /api/contact`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// An accepted contact submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    /// UUIDv7, time-sortable.
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

impl ContactRecord {
    /// Accept a submission, requiring name, email, company and message.
    pub fn from_submission(sub: ContactSubmission) -> Result<Self, ContactError> {
        let mut missing = Vec::new();
        let full_name = required(sub.full_name, "fullName", &mut missing);
        let email = required(sub.email, "email", &mut missing);
        let company = required(sub.company, "company", &mut missing);
        let message = required(sub.message, "message", &mut missing);

        if !missing.is_empty() {
            return Err(ContactError::MissingFields(missing));
        }

        Ok(Self {
            id: Uuid::now_v7(),
            full_name,
            email,
            company,
            phone: sub.phone.filter(|p| !p.trim().is_empty()),
            message,
            received_at: Utc::now(),
        })
    }
}

fn required(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}
