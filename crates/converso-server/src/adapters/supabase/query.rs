//! PostgREST query rendering
//!
//! Turns domain filters into PostgREST query parameters:
//! `subject=ilike.*math*`, `or=(topic.ilike.*x*,name.ilike.*x*)`.

use converso::StoreFilter;

/// Characters with meaning inside PostgREST logic trees
const RESERVED: &[char] = &[',', '.', ':', '(', ')', '"', '\\'];

/// Render top-level filters as query pairs (ANDed by PostgREST)
pub fn render_filters(filters: &[StoreFilter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|filter| match filter {
            StoreFilter::Eq { field, value } => {
                (field.column().to_string(), format!("eq.{value}"))
            }
            StoreFilter::ILike { field, needle } => {
                (field.column().to_string(), format!("ilike.*{needle}*"))
            }
            StoreFilter::Or(alternatives) => ("or".to_string(), render_group(alternatives)),
        })
        .collect()
}

fn render_group(alternatives: &[StoreFilter]) -> String {
    let inner: Vec<String> = alternatives.iter().map(render_inline).collect();
    format!("({})", inner.join(","))
}

/// Condition inside a logic tree, where values must be quoted
fn render_inline(filter: &StoreFilter) -> String {
    match filter {
        StoreFilter::Eq { field, value } => format!("{}.eq.{}", field.column(), quote(value)),
        StoreFilter::ILike { field, needle } => {
            format!("{}.ilike.{}", field.column(), quote(&format!("*{needle}*")))
        }
        StoreFilter::Or(alternatives) => format!("or{}", render_group(alternatives)),
    }
}

fn quote(value: &str) -> String {
    let needs_quotes = value.contains(RESERVED) || value.trim() != value;
    if !needs_quotes {
        return value.to_string();
    }

    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Total from a `Content-Range` header such as `0-9/42` or `*/0`
pub fn parse_content_range(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}
