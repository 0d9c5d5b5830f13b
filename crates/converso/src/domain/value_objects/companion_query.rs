//! CompanionQuery - Paging and search parameters for companion listings

use serde::{Deserialize, Serialize};

use super::{CompanionField, StoreFilter};
use crate::domain::entities::Companion;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Listing request: page size, 1-based page and optional search terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanionQuery {
    pub limit: u32,
    pub page: u32,
    pub subject: Option<String>,
    pub topic: Option<String>,
}

impl Default for CompanionQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            page: 1,
            subject: None,
            topic: None,
        }
    }
}

impl CompanionQuery {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Inclusive item range for the requested page
    pub fn range(&self) -> PageRange {
        let limit = u64::from(self.limit.max(1));
        let page = u64::from(self.page.max(1));
        PageRange {
            from: (page - 1) * limit,
            to: page * limit - 1,
        }
    }

    /// Subject narrows by substring; topic matches either topic or name
    pub fn filters(&self) -> Vec<StoreFilter> {
        let mut filters = Vec::new();

        if let Some(subject) = non_blank(&self.subject) {
            filters.push(StoreFilter::ilike(CompanionField::Subject, subject));
        }

        if let Some(topic) = non_blank(&self.topic) {
            filters.push(StoreFilter::Or(vec![
                StoreFilter::ilike(CompanionField::Topic, topic),
                StoreFilter::ilike(CompanionField::Name, topic),
            ]));
        }

        filters
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Inclusive zero-based item range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub from: u64,
    pub to: u64,
}

impl PageRange {
    pub fn len(&self) -> u64 {
        self.to.saturating_sub(self.from) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.to < self.from
    }
}

/// One page of companions with the exact total when the store reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanionPage {
    pub companions: Vec<Companion>,
    pub count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_is_first_ten() {
        let range = CompanionQuery::default().range();
        assert_eq!(range, PageRange { from: 0, to: 9 });
        assert_eq!(range.len(), 10);
    }

    #[test]
    fn test_third_page_range() {
        let range = CompanionQuery::default().with_limit(3).with_page(3).range();
        assert_eq!(range, PageRange { from: 6, to: 8 });
    }

    #[test]
    fn test_zero_limit_and_page_are_clamped() {
        let range = CompanionQuery::default().with_limit(0).with_page(0).range();
        assert_eq!(range, PageRange { from: 0, to: 0 });
    }

    #[test]
    fn test_no_terms_no_filters() {
        let query = CompanionQuery::default().with_subject("  ");
        assert!(query.filters().is_empty());
    }

    #[test]
    fn test_subject_and_topic_filters() {
        let filters = CompanionQuery::default()
            .with_subject("math")
            .with_topic("algebra")
            .filters();

        assert_eq!(
            filters,
            vec![
                StoreFilter::ilike(CompanionField::Subject, "math"),
                StoreFilter::Or(vec![
                    StoreFilter::ilike(CompanionField::Topic, "algebra"),
                    StoreFilter::ilike(CompanionField::Name, "algebra"),
                ]),
            ]
        );
    }
}
