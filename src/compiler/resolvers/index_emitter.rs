use indexmap::IndexSet;

use crate::{
    compiler::{CompileError, CteResolver, RenderContext},
    model::{SearchType, TextKind, ViewSpec},
};

/// Physical column an index is built on, with the type used to pick the
/// operator class.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexTarget {
    pub table: String,
    pub column: String,
    pub data_type: String,
    pub collation: Option<String>,
    pub search_type: SearchType,
}

pub struct IndexEmitter;

impl IndexEmitter {
    /// Resolve every search-typed column of the main query to its physical
    /// column. Duplicated targets are kept once.
    pub fn targets(view: &ViewSpec, ctx: &RenderContext) -> Result<Vec<IndexTarget>, CompileError> {
        let mut seen: IndexSet<(String, String, SearchType)> = IndexSet::new();
        let mut targets = vec![];

        for (table, column) in view.search_columns() {
            let Some(search_type) = column.search_type else {
                continue;
            };
            let resolved = CteResolver::resolve(&ctx.ctes, &table.qualified_name(), &column.name)?;
            let data_type = column.data_type.clone().or(resolved.data_type).ok_or_else(|| CompileError::MissingColumnType {
                table: table.alias_or_name().to_string(),
                column: column.name.clone(),
            })?;

            if !seen.insert((resolved.table.clone(), resolved.column.clone(), search_type)) {
                continue;
            }
            targets.push(IndexTarget {
                table: resolved.table,
                column: resolved.column,
                data_type,
                collation: column.collation.clone().or(resolved.collation),
                search_type,
            });
        }

        Ok(targets)
    }

    pub fn emit(view: &ViewSpec, ctx: &RenderContext) -> Result<Vec<String>, CompileError> {
        let statements: Vec<String> = Self::targets(view, ctx)?
            .iter()
            .map(|target| Self::index_sql(target, &Self::index_name(target, ctx)))
            .collect();
        tracing::debug!(view = %view.name, indexes = statements.len(), "index statements emitted");
        Ok(statements)
    }

    /// `<prefix>_<table>_<column>_<suffix>`. A name over the identifier limit
    /// keeps its suffix and gets a digest of the full target in front of it, so
    /// long columns on the same table do not collapse into one index.
    pub fn index_name(target: &IndexTarget, ctx: &RenderContext) -> String {
        let suffix = target.search_type.index_suffix();
        let mut name = format!("{}_{}_{}_{}", ctx.config.index_prefix, target.table, target.column, suffix).replace('.', "_");

        let max = ctx.config.max_identifier_length;
        if name.len() <= max {
            return name;
        }

        let digest = format!("{:x}", md5::compute(format!("{}|{}|{}", target.table, target.column, suffix)));
        let tail = format!("_{}_{}", &digest[..8], suffix);
        let mut end = max.saturating_sub(tail.len());
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        name.truncate(end);
        name.push_str(&tail);
        name
    }

    pub fn index_sql(target: &IndexTarget, name: &str) -> String {
        let kind = TextKind::classify(&target.data_type);
        let column = &target.column;

        let (using, expression, operator_class) = match target.search_type {
            SearchType::Equal => {
                let expression = match kind.is_text() {
                    true => column.clone(),
                    false => format!("lower(cast({} as varchar))", column),
                };
                ("", expression, None)
            }
            SearchType::Contains => {
                let expression = match kind {
                    _ if kind.is_trigram_ready() => column.clone(),
                    TextKind::NotText => format!("(cast({} as varchar))", column),
                    _ => format!("(cast({} as text))", column),
                };
                (" USING GIN", expression, Some("gin_trgm_ops"))
            }
            SearchType::StartsWith => {
                let (expression, operator_class) = match kind {
                    TextKind::Text => (column.clone(), "text_pattern_ops"),
                    TextKind::VarChar => (column.clone(), "varchar_pattern_ops"),
                    TextKind::FixedChar => (column.clone(), "bpchar_pattern_ops"),
                    TextKind::OtherText => (format!("(cast({} as text))", column), "text_pattern_ops"),
                    TextKind::NotText => (format!("(cast({} as varchar))", column), "varchar_pattern_ops"),
                };
                ("", expression, Some(operator_class))
            }
        };

        let mut element = expression;
        if let Some(collation) = &target.collation {
            element.push_str(&format!(" COLLATE \"{}\"", collation));
        }
        if let Some(operator_class) = operator_class {
            element.push(' ');
            element.push_str(operator_class);
        }

        format!("CREATE INDEX IF NOT EXISTS {} ON {}{} ({});", name, target.table, using, element)
    }
}
