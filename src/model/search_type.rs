use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Query strategy a column is exposed with, which also decides the index
/// built for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchType {
    /// Exact match.
    Equal,
    /// Substring match, backed by a trigram index.
    Contains,
    /// Prefix match, backed by a pattern-ops b-tree.
    StartsWith,
}

impl SearchType {
    /// Short tag used in generated index names.
    pub fn index_suffix(&self) -> &'static str {
        match self {
            SearchType::Equal => "eq",
            SearchType::Contains => "ct",
            SearchType::StartsWith => "sw",
        }
    }
}

impl Display for SearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchType::Equal => write!(f, "equal"),
            SearchType::Contains => write!(f, "contains"),
            SearchType::StartsWith => write!(f, "startsWith"),
        }
    }
}
