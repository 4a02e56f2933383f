use indexmap::{IndexMap, IndexSet};

use crate::{compiler::ResolveError, model::{Column, Cte}};

/// Physical location of a column reached through zero or more CTEs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumn {
    pub table: String,
    pub column: String,
    /// First declared type met while walking the chain outward-in.
    pub data_type: Option<String>,
    pub collation: Option<String>,
}

struct CteHit<'a> {
    table: String,
    column: String,
    declared: Option<&'a Column>,
}

pub struct CteResolver;

impl CteResolver {
    pub fn resolve(ctes: &IndexMap<&str, &Cte>, table: &str, column: &str) -> Result<ResolvedColumn, ResolveError> {
        let mut resolved = ResolvedColumn {
            table: table.to_string(),
            column: column.to_string(),
            data_type: None,
            collation: None,
        };
        let mut visited: IndexSet<String> = IndexSet::new();

        while let Some(cte) = ctes.get(resolved.table.as_str()) {
            if !visited.insert(resolved.table.clone()) {
                let mut chain: Vec<String> = visited.into_iter().collect();
                chain.push(resolved.table);
                return Err(ResolveError::CyclicCte { chain });
            }

            let hit = Self::find_in_cte(cte, &resolved.column).ok_or_else(|| ResolveError::ColumnNotFound {
                table: resolved.table.clone(),
                column: resolved.column.clone(),
            })?;

            if let Some(declared) = hit.declared {
                resolved.data_type = resolved.data_type.or_else(|| declared.data_type.clone());
                resolved.collation = resolved.collation.or_else(|| declared.collation.clone());
            }
            tracing::trace!(cte = %cte.name, from = %resolved.column, to_table = %hit.table, to_column = %hit.column, "resolved CTE column");
            resolved.table = hit.table;
            resolved.column = hit.column;
        }

        Ok(resolved)
    }

    /// Find the column a CTE exposes as `name`, either directly or as a function alias.
    fn find_in_cte<'a>(cte: &'a Cte, name: &str) -> Option<CteHit<'a>> {
        for table in &cte.tables {
            if let Some(column) = table.all_columns().into_iter().find(|c| c.output_name() == name) {
                return Some(CteHit { table: table.qualified_name(), column: column.name.clone(), declared: Some(column) });
            }

            for function in &table.functions {
                let Some(source_column) = function.column_name.as_ref().filter(|_| function.alias == name) else {
                    continue;
                };
                let source_table = match &function.table_alias {
                    Some(alias) => cte.tables.iter().find(|t| t.alias_or_name() == alias)?,
                    None => table,
                };
                let declared = source_table.all_columns().into_iter().find(|c| &c.name == source_column);
                return Some(CteHit { table: source_table.qualified_name(), column: source_column.clone(), declared });
            }
        }
        None
    }
}
