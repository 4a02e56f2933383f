use serde::{Deserialize, Serialize};

use crate::model::{Condition, Join, SelectBody, Table};

/// A named sub-query of a view; a miniature view body.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cte {
    pub name: String,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joins: Vec<Join>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl Cte {
    pub fn new(name: &str, tables: Vec<Table>) -> Self {
        Self { name: name.to_string(), tables, ..Default::default() }
    }

    pub fn with_joins(mut self, joins: Vec<Join>) -> Self {
        self.joins = joins;
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl SelectBody for Cte {
    fn tables(&self) -> &[Table] {
        &self.tables
    }

    fn joins(&self) -> &[Join] {
        &self.joins
    }

    fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    fn limit(&self) -> Option<u64> {
        self.limit
    }
}
