//! StoreFilter - Filter composition understood by data store adapters

use serde::{Deserialize, Serialize};

use crate::domain::entities::Companion;

/// Filterable companion columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanionField {
    Id,
    Name,
    Subject,
    Topic,
    Author,
}

impl CompanionField {
    /// Column name in the `companions` table
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Subject => "subject",
            Self::Topic => "topic",
            Self::Author => "author",
        }
    }

    pub fn value_of(&self, companion: &Companion) -> String {
        match self {
            Self::Id => companion.id.to_string(),
            Self::Name => companion.name.clone(),
            Self::Subject => companion.subject.clone(),
            Self::Topic => companion.topic.clone(),
            Self::Author => companion.author.clone(),
        }
    }
}

/// Filters are ANDed when given as a list; `Or` groups alternatives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreFilter {
    /// Exact match
    Eq { field: CompanionField, value: String },
    /// Case-insensitive substring match
    ILike { field: CompanionField, needle: String },
    /// At least one alternative matches
    Or(Vec<StoreFilter>),
}

impl StoreFilter {
    pub fn eq(field: CompanionField, value: impl Into<String>) -> Self {
        Self::Eq {
            field,
            value: value.into(),
        }
    }

    pub fn ilike(field: CompanionField, needle: impl Into<String>) -> Self {
        Self::ILike {
            field,
            needle: needle.into(),
        }
    }

    /// Evaluate against a companion (used by in-process stores)
    pub fn matches(&self, companion: &Companion) -> bool {
        match self {
            Self::Eq { field, value } => field.value_of(companion) == *value,
            Self::ILike { field, needle } => field
                .value_of(companion)
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Self::Or(alternatives) => alternatives.iter().any(|f| f.matches(companion)),
        }
    }

    pub fn matches_all(filters: &[StoreFilter], companion: &Companion) -> bool {
        filters.iter().all(|f| f.matches(companion))
    }
}
