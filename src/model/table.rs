use serde::{Deserialize, Serialize};

use crate::model::{Column, Function, TableAccess};

/// Nested set of sub-columns projected from the owning table.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnGroup {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<ColumnGroup>,
}

impl ColumnGroup {
    fn collect<'a>(&'a self, out: &mut Vec<&'a Column>) {
        out.extend(self.columns.iter());
        for group in &self.groups {
            group.collect(out);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_groups: Vec<ColumnGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<Function>,
    #[serde(default)]
    pub access: TableAccess,
}

impl Table {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), ..Default::default() }
    }

    pub fn with_schema(mut self, schema: &str) -> Self {
        self.schema = Some(schema.to_string());
        self
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_group(mut self, group: ColumnGroup) -> Self {
        self.column_groups.push(group);
        self
    }

    pub fn with_functions(mut self, functions: Vec<Function>) -> Self {
        self.functions = functions;
        self
    }

    pub fn alias_or_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// `schema.name`, or just `name` without a schema. For a table that reads
    /// from a CTE this is the CTE name.
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }

    /// Text placed after `FROM`/`JOIN`.
    pub fn source_sql(&self) -> String {
        format!("{} AS {}", self.qualified_name(), self.alias_or_name())
    }

    /// Direct columns followed by every nested group's columns, depth first.
    pub fn all_columns(&self) -> Vec<&Column> {
        let mut out: Vec<&Column> = self.columns.iter().collect();
        for group in &self.column_groups {
            group.collect(&mut out);
        }
        out
    }
}
