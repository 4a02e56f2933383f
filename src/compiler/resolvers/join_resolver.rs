use indexmap::IndexSet;

use crate::{compiler::{CompileError, ConditionRenderer}, model::{Join, Table}};

/// Tables already placed into the FROM/JOIN chain of one select, by position
/// in the table pool. Owned by a single render.
#[derive(Debug, Default)]
pub struct ConsumedTables {
    positions: IndexSet<usize>,
}

impl ConsumedTables {
    /// The first table is the `FROM` target and starts consumed.
    pub fn with_from_target(tables: &[Table]) -> Self {
        let mut consumed = Self::default();
        if !tables.is_empty() {
            consumed.positions.insert(0);
        }
        consumed
    }

    pub fn is_consumed(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    fn consume(&mut self, position: usize) {
        self.positions.insert(position);
    }
}

pub struct JoinResolver;

impl JoinResolver {
    /// Claim the first unconsumed table whose alias matches either side of the join.
    pub fn claim_target<'t>(tables: &'t [Table], join: &Join, consumed: &mut ConsumedTables) -> Option<&'t Table> {
        let (position, table) = tables.iter().enumerate().find(|(position, table)| {
            let alias = table.alias_or_name();
            (alias == join.left_alias || alias == join.right_alias) && !consumed.is_consumed(*position)
        })?;

        consumed.consume(position);
        tracing::trace!(target_table = %table.qualified_name(), alias = table.alias_or_name(), "join target consumed");
        Some(table)
    }

    pub fn render_joins(tables: &[Table], joins: &[Join]) -> Result<Vec<String>, CompileError> {
        let mut consumed = ConsumedTables::with_from_target(tables);
        joins.iter().map(|join| Self::render_join(tables, join, &mut consumed)).collect()
    }

    fn render_join(tables: &[Table], join: &Join, consumed: &mut ConsumedTables) -> Result<String, CompileError> {
        let target = Self::claim_target(tables, join, consumed).ok_or_else(|| CompileError::UnresolvedJoinTarget {
            left: join.left_alias.clone(),
            right: join.right_alias.clone(),
        })?;

        let on = join.left_columns
            .iter()
            .zip(join.right_columns.iter())
            .map(|(left, right)| format!("({}.{} = {}.{})", join.left_alias, left, join.right_alias, right))
            .collect::<Vec<_>>()
            .join(" AND ");

        let mut sql = format!("{} JOIN {} ON {}", join.kind, target.source_sql(), on);
        if let Some(first) = join.conditions.first() {
            sql.push(' ');
            sql.push_str(&first.link().to_string());
            sql.push(' ');
            sql.push_str(&ConditionRenderer::render(&join.conditions, true));
        }
        Ok(sql)
    }
}
