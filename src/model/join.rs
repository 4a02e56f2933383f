use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::model::Condition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl Display for JoinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinKind::Inner => write!(f, "INNER"),
            JoinKind::Left => write!(f, "LEFT"),
            JoinKind::Right => write!(f, "RIGHT"),
            JoinKind::Full => write!(f, "FULL"),
        }
    }
}

/// Equi-join between two table aliases; `left_columns[i]` pairs with
/// `right_columns[i]`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Join {
    #[serde(default)]
    pub kind: JoinKind,
    pub left_alias: String,
    pub left_columns: Vec<String>,
    pub right_alias: String,
    pub right_columns: Vec<String>,
    /// Extra predicates appended to the `ON` clause.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Join {
    pub fn new(kind: JoinKind, left_alias: &str, left_columns: &[&str], right_alias: &str, right_columns: &[&str]) -> Self {
        Self {
            kind,
            left_alias: left_alias.to_string(),
            left_columns: left_columns.iter().map(|c| c.to_string()).collect(),
            right_alias: right_alias.to_string(),
            right_columns: right_columns.iter().map(|c| c.to_string()).collect(),
            conditions: vec![],
        }
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn has_matching_column_count(&self) -> bool {
        self.left_columns.len() == self.right_columns.len()
    }
}
