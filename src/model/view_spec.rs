use serde::{Deserialize, Serialize};

use crate::model::{Column, Condition, Cte, Join, ModelError, SelectBody, Table};

/// A declarative view: CTEs, tables (the first one is the `FROM` target),
/// joins and root conditions.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ctes: Vec<Cte>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joins: Vec<Join>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub indexing_enabled: bool,
    /// Row limit advertised to the query API; not rendered into the view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default)]
    pub pagination: bool,
}

impl ViewSpec {
    pub fn new(name: &str, tables: Vec<Table>) -> Self {
        Self { name: name.to_string(), tables, ..Default::default() }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_ctes(mut self, ctes: Vec<Cte>) -> Self {
        self.ctes = ctes;
        self
    }

    pub fn with_joins(mut self, joins: Vec<Join>) -> Self {
        self.joins = joins;
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_indexing(mut self, enabled: bool) -> Self {
        self.indexing_enabled = enabled;
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_pagination(mut self, pagination: bool) -> Self {
        self.pagination = pagination;
        self
    }

    /// Every `(table, column)` of the main query that declares a search type.
    pub fn search_columns(&self) -> Vec<(&Table, &Column)> {
        self.tables
            .iter()
            .flat_map(|table| table.all_columns().into_iter().map(move |column| (table, column)))
            .filter(|(_, column)| column.search_type.is_some())
            .collect()
    }
}

impl SelectBody for ViewSpec {
    fn tables(&self) -> &[Table] {
        &self.tables
    }

    fn joins(&self) -> &[Join] {
        &self.joins
    }

    fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}
