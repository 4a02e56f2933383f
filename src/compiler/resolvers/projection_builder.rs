use indexmap::IndexSet;

use crate::model::{Column, Function, Table};

/// One entry of the SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedItem<'a> {
    pub sql: String,
    /// Name the view exposes for this entry.
    pub output_name: String,
    pub source: ProjectedSource<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectedSource<'a> {
    Column(&'a Column),
    Function(&'a Function),
}

/// SELECT list plus the derived GROUP BY and ORDER BY lists.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection<'a> {
    pub items: Vec<ProjectedItem<'a>>,
    pub group_by: Vec<String>,
    pub order_by: Vec<String>,
}

impl<'a> Projection<'a> {
    pub fn select_list(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.sql.as_str()).collect()
    }
}

struct PlainColumn<'a> {
    key: String,
    column: &'a Column,
}

pub struct ProjectionBuilder;

impl ProjectionBuilder {
    pub fn build(tables: &[Table]) -> Projection<'_> {
        let mut plain: Vec<PlainColumn> = vec![];
        let mut group_candidates: IndexSet<String> = IndexSet::new();

        for table in tables {
            for column in table.all_columns() {
                let key = format!("{}.{}", table.alias_or_name(), column.name);
                group_candidates.insert(key.clone());
                plain.push(PlainColumn { key, column });
            }
        }

        // a function's source column is only projected in its aggregated form
        let mut aggregated: IndexSet<String> = IndexSet::new();
        let mut function_items = vec![];
        let mut has_aggregate = false;

        for table in tables {
            for function in &table.functions {
                function_items.push(ProjectedItem {
                    sql: Self::function_sql(table, function),
                    output_name: function.alias.clone(),
                    source: ProjectedSource::Function(function),
                });

                if let Some(key) = Self::function_source_key(table, function) {
                    group_candidates.shift_remove(&key);
                    aggregated.insert(key);
                }

                if !function.is_windowed() {
                    has_aggregate = true;
                }
            }
        }

        let remaining: Vec<&PlainColumn> = plain.iter().filter(|c| !aggregated.contains(&c.key)).collect();

        let order_by = remaining
            .iter()
            .filter_map(|c| c.column.sort.map(|sort| match sort.is_descending() {
                true => format!("{} DESC", c.key),
                false => c.key.clone(),
            }))
            .collect();

        let mut items: Vec<ProjectedItem> = remaining
            .iter()
            .map(|c| ProjectedItem {
                sql: match &c.column.alias {
                    Some(alias) => format!("{} AS {}", c.key, alias),
                    None => c.key.clone(),
                },
                output_name: c.column.output_name().to_string(),
                source: ProjectedSource::Column(c.column),
            })
            .collect();
        items.extend(function_items);

        // windowed functions alone never force a GROUP BY
        let group_by = match has_aggregate && !group_candidates.is_empty() {
            true => group_candidates.into_iter().collect(),
            false => vec![],
        };

        Projection { items, group_by, order_by }
    }

    fn function_source_key(table: &Table, function: &Function) -> Option<String> {
        if function.name.is_row_numbering() {
            return None;
        }
        let column = function.column_name.as_ref()?;
        let alias = function.table_alias.as_deref().unwrap_or(table.alias_or_name());
        Some(format!("{}.{}", alias, column))
    }

    pub fn function_sql(table: &Table, function: &Function) -> String {
        let mut args = match Self::function_source_key(table, function) {
            Some(key) => key,
            None if function.name.is_row_numbering() => String::new(),
            None => "*".to_string(),
        };
        if let Some(parameter) = &function.parameter {
            args.push_str(", ");
            args.push_str(parameter);
        }

        let mut sql = format!("{}({})", function.name.sql_name(), args);
        if let Some(window) = &function.window {
            sql.push_str(&format!(" OVER ({})", window));
        }
        sql.push_str(&format!(" AS {}", function.alias));
        sql
    }
}
