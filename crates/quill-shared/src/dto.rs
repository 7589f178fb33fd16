//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request to sign in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Form fields for creating or editing a post.
///
/// This is the statically typed boundary between the presentation layer and
/// the lifecycle manager: length and format rules are enforced here, while
/// the lifecycle re-checks presence only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPayload {
    pub title: String,
    pub description: String,
    pub content: String,
}

impl PostPayload {
    /// Validate field lengths; returns every violation, not just the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let title_len = self.title.chars().count();
        if !(1..=255).contains(&title_len) {
            errors.push("Title must be between 1 and 255 characters".to_string());
        }

        let description_len = self.description.chars().count();
        if !(1..=255).contains(&description_len) {
            errors.push("Description must be between 1 and 255 characters".to_string());
        }

        if self.content.chars().count() < 10 {
            errors.push("Content must be at least 10 characters long".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A post as rendered to clients, with the author's display name joined in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub content: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Public view of an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> PostPayload {
        PostPayload {
            title: "Hello World".into(),
            description: "A greeting".into(),
            content: "Long enough content".into(),
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(payload().validate().is_ok());
    }

    #[test]
    fn short_content_is_rejected() {
        let mut p = payload();
        p.content = "too short".into();
        let errors = p.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Content"));
    }

    #[test]
    fn oversized_title_and_empty_description_both_reported() {
        let mut p = payload();
        p.title = "x".repeat(256);
        p.description = String::new();
        let errors = p.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
