use serde::Serialize;

use crate::{
    compiler::{ProjectedSource, ProjectionBuilder},
    config::CompilerConfig,
    model::{SearchType, ViewSpec},
};

/// What the query API may do with one projected column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    pub column_name: String,
    pub returning: bool,
    pub search_type: Option<SearchType>,
    pub classification: Option<String>,
}

/// Metadata rows describing a compiled view for the downstream query API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewMetadata {
    pub view_name: String,
    pub row_limit: Option<u64>,
    pub pagination: bool,
    pub columns: Vec<ColumnMetadata>,
}

impl ViewMetadata {
    /// Columns follow the projection order of the main select; aggregated
    /// source columns are replaced by their function output.
    pub fn from_view(view: &ViewSpec, config: &CompilerConfig) -> Self {
        let projection = ProjectionBuilder::build(&view.tables);

        let columns = projection.items
            .iter()
            .map(|item| match item.source {
                ProjectedSource::Column(column) => ColumnMetadata {
                    column_name: item.output_name.clone(),
                    returning: column.access.read && column.access.returning,
                    search_type: column.search_type,
                    classification: column.classification.clone(),
                },
                ProjectedSource::Function(_) => ColumnMetadata {
                    column_name: item.output_name.clone(),
                    returning: true,
                    search_type: None,
                    classification: None,
                },
            })
            .collect();

        Self {
            view_name: config.view_identifier(&view.name),
            row_limit: view.limit,
            pagination: view.pagination,
            columns,
        }
    }

    pub fn searchable_columns(&self) -> impl Iterator<Item = &ColumnMetadata> {
        self.columns.iter().filter(|c| c.search_type.is_some())
    }

    pub fn insert_statements(&self, config: &CompilerConfig) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| {
                format!(
                    "INSERT INTO {} (view_name, column_name, returning, search_type, classification, row_limit, pagination) VALUES ({}, {}, {}, {}, {}, {}, {});",
                    config.metadata_table,
                    quote(&self.view_name),
                    quote(&column.column_name),
                    column.returning,
                    column.search_type.map(|s| quote(&s.to_string())).unwrap_or_else(|| "NULL".to_string()),
                    column.classification.as_deref().map(quote).unwrap_or_else(|| "NULL".to_string()),
                    self.row_limit.map(|l| l.to_string()).unwrap_or_else(|| "NULL".to_string()),
                    self.pagination,
                )
            })
            .collect()
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
