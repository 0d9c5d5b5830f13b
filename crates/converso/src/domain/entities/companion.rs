//! Companion - User-authored learning profile
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

/// Companion - a learning-session profile created by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    pub id: Uuid,
    pub name: String,
    pub subject: String,
    pub topic: String,
    pub voice: String,
    pub style: String,
    /// Session length in minutes
    pub duration: i32,
    /// Identity id of the creator
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Companion creation form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCompanion {
    pub name: String,
    pub subject: String,
    pub topic: String,
    pub voice: String,
    pub style: String,
    pub duration: i32,
}

impl NewCompanion {
    /// Trim text fields and reject blank values or a non-positive duration
    pub fn validated(self) -> Result<Self, DomainError> {
        let form = Self {
            name: self.name.trim().to_string(),
            subject: self.subject.trim().to_string(),
            topic: self.topic.trim().to_string(),
            voice: self.voice.trim().to_string(),
            style: self.style.trim().to_string(),
            duration: self.duration,
        };

        for (field, value) in [
            ("name", &form.name),
            ("subject", &form.subject),
            ("topic", &form.topic),
            ("voice", &form.voice),
            ("style", &form.style),
        ] {
            if value.is_empty() {
                return Err(DomainError::Validation(format!("{field} must not be empty")));
            }
        }

        if form.duration <= 0 {
            return Err(DomainError::Validation(
                "duration must be a positive number of minutes".to_string(),
            ));
        }

        Ok(form)
    }

    /// Row to insert, owned by `author`
    pub fn authored_by(self, author: impl Into<String>) -> CompanionDraft {
        CompanionDraft {
            form: self,
            author: author.into(),
        }
    }
}

/// A validated form paired with its author, ready for insertion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanionDraft {
    #[serde(flatten)]
    pub form: NewCompanion,
    pub author: String,
}
