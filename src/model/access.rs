use serde::{Deserialize, Serialize};

fn allowed() -> bool {
    true
}

/// Per-column access flags consumed by the query API metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnAccess {
    #[serde(default = "allowed")]
    pub read: bool,
    #[serde(default = "allowed")]
    pub update: bool,
    #[serde(default = "allowed")]
    pub returning: bool,
}

impl Default for ColumnAccess {
    fn default() -> Self {
        Self { read: true, update: true, returning: true }
    }
}

/// Per-table access flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAccess {
    #[serde(default = "allowed")]
    pub insert: bool,
    #[serde(default = "allowed")]
    pub update: bool,
    #[serde(default = "allowed")]
    pub delete: bool,
    #[serde(default = "allowed")]
    pub read: bool,
}

impl Default for TableAccess {
    fn default() -> Self {
        Self { insert: true, update: true, delete: true, read: true }
    }
}
