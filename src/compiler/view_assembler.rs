use crate::{
    compiler::{CompileError, ConditionRenderer, JoinResolver, ProjectionBuilder, RenderContext},
    model::{SelectBody, ViewSpec},
};

pub struct ViewAssembler;

impl ViewAssembler {
    /// `CREATE OR REPLACE VIEW <name> AS [WITH ...] SELECT ...;`
    pub fn assemble(view: &ViewSpec, ctx: &RenderContext) -> Result<String, CompileError> {
        let mut body = String::new();

        if !view.ctes.is_empty() {
            let ctes = view.ctes
                .iter()
                .map(|cte| -> Result<String, CompileError> {
                    tracing::debug!(view = %view.name, cte = %cte.name, "rendering CTE");
                    Ok(format!("{} AS ({})", cte.name, Self::render_select(cte, &cte.name)?))
                })
                .collect::<Result<Vec<_>, _>>()?;
            body.push_str("WITH ");
            body.push_str(&ctes.join(", "));
            body.push(' ');
        }

        tracing::debug!(view = %view.name, "rendering main select");
        body.push_str(&Self::render_select(view, &view.name)?);

        Ok(format!("CREATE OR REPLACE VIEW {} AS {};", ctx.config.view_identifier(&view.name), body))
    }

    /// One `SELECT` for a view or CTE body; `owner` names it in errors.
    pub fn render_select<B: SelectBody>(body: &B, owner: &str) -> Result<String, CompileError> {
        let tables = body.tables();
        let from = tables.first().ok_or_else(|| CompileError::EmptySelect(owner.to_string()))?;

        let projection = ProjectionBuilder::build(tables);
        let select_list = match projection.items.is_empty() {
            true => "*".to_string(),
            false => projection.select_list().join(", "),
        };

        let mut sql = format!("SELECT {} FROM {}", select_list, from.source_sql());

        for join in JoinResolver::render_joins(tables, body.joins())? {
            sql.push(' ');
            sql.push_str(&join);
        }

        if !body.conditions().is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&ConditionRenderer::render(body.conditions(), false));
        }

        if !projection.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&projection.group_by.join(", "));
        }

        if !projection.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&projection.order_by.join(", "));
        }

        if let Some(limit) = body.limit() {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        compiler::{CompileError, RenderContext, ViewAssembler},
        config::CompilerConfig,
        model::{Column, Cte, Table, ViewSpec},
    };

    #[test]
    fn test_simple_view() {
        let view = ViewSpec::new("person_view", vec![
            Table::new("person").with_alias("p").with_columns(vec![Column::new("id"), Column::new("name").with_alias("full_name")]),
        ]);
        let config = CompilerConfig::default();
        let ctx = RenderContext::new(&view, &config);

        assert_eq!(
            ViewAssembler::assemble(&view, &ctx).unwrap(),
            "CREATE OR REPLACE VIEW person_view_v AS SELECT p.id, p.name AS full_name FROM person AS p;"
        );
    }

    #[test]
    fn test_cte_prefix_and_limit() {
        let view = ViewSpec::new("recent", vec![Table::new("last_orders").with_alias("l").with_columns(vec![Column::new("id")])])
            .with_ctes(vec![
                Cte::new("last_orders", vec![Table::new("orders").with_alias("o").with_columns(vec![Column::new("id")])]).with_limit(10),
            ]);
        let config = CompilerConfig::default();
        let ctx = RenderContext::new(&view, &config);

        assert_eq!(
            ViewAssembler::assemble(&view, &ctx).unwrap(),
            "CREATE OR REPLACE VIEW recent_v AS WITH last_orders AS (SELECT o.id FROM orders AS o LIMIT 10) SELECT l.id FROM last_orders AS l;"
        );
    }

    #[test]
    fn test_table_without_columns_selects_everything() {
        let view = ViewSpec::new("raw", vec![Table::new("event")]);
        assert_eq!(ViewAssembler::render_select(&view, "raw").unwrap(), "SELECT * FROM event AS event");
    }

    #[test]
    fn test_empty_select_is_an_error() {
        let view = ViewSpec::new("nothing", vec![]);
        assert_eq!(ViewAssembler::render_select(&view, "nothing").unwrap_err(), CompileError::EmptySelect("nothing".into()));
    }
}
