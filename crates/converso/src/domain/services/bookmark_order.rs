//! Bookmark ordering
//!
//! Bookmark rows arrive newest first. Older data can hold several rows for the
//! same companion, so listings keep only the first occurrence.

use std::collections::HashSet;

use crate::domain::entities::Companion;

/// Drop repeated companions, keeping first-seen order
pub fn dedup_companions(companions: Vec<Companion>) -> Vec<Companion> {
    let mut seen = HashSet::new();
    companions
        .into_iter()
        .filter(|companion| seen.insert(companion.id))
        .collect()
}
