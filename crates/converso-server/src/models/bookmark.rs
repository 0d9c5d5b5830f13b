//! Bookmark DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Toggle a bookmark
///
/// Every field is optional at the wire level so that missing values are
/// reported as "Missing parameters" rather than a deserialization error.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRequest {
    /// Any JSON type is accepted here; non-strings are rejected as invalid ids
    #[schema(value_type = Option<String>)]
    pub companion_id: Option<serde_json::Value>,
    /// `add` or `remove`
    pub action: Option<String>,
    /// Page to revalidate afterwards (default `/`)
    pub path: Option<String>,
}

impl BookmarkRequest {
    /// `companionId` unless absent, null or an empty string
    pub fn companion_id(&self) -> Option<&serde_json::Value> {
        match &self.companion_id {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(id)) if id.is_empty() => None,
            Some(value) => Some(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkAction {
    Add,
    Remove,
}

impl BookmarkAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookmarkResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let request: BookmarkRequest = serde_json::from_str(
            r#"{"companionId":"abc","action":"add","path":"/companions"}"#,
        )
        .unwrap();
        assert_eq!(request.companion_id(), Some(&serde_json::json!("abc")));
        assert_eq!(request.action.as_deref(), Some("add"));
        assert_eq!(request.path.as_deref(), Some("/companions"));
    }

    #[test]
    fn test_blank_companion_id_counts_as_missing() {
        for body in [r#"{}"#, r#"{"companionId":null}"#, r#"{"companionId":""}"#] {
            let request: BookmarkRequest = serde_json::from_str(body).unwrap();
            assert_eq!(request.companion_id(), None);
        }

        let request: BookmarkRequest = serde_json::from_str(r#"{"companionId":7}"#).unwrap();
        assert_eq!(request.companion_id(), Some(&serde_json::json!(7)));
    }

    #[test]
    fn test_action_parse_is_exact() {
        assert_eq!(BookmarkAction::parse("add"), Some(BookmarkAction::Add));
        assert_eq!(BookmarkAction::parse("remove"), Some(BookmarkAction::Remove));
        assert_eq!(BookmarkAction::parse("Add"), None);
        assert_eq!(BookmarkAction::parse("toggle"), None);
    }
}
