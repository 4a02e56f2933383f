use crate::model::{Comparison, Condition, Operator};

pub struct ConditionRenderer;

impl ConditionRenderer {
    /// Render a sibling list of conditions. With `wrap` the whole list is
    /// enclosed in one extra pair of parentheses.
    pub fn render(conditions: &[Condition], wrap: bool) -> String {
        let mut sql = String::new();
        Self::render_siblings(&mut sql, conditions, wrap);
        sql
    }

    fn render_siblings(sql: &mut String, conditions: &[Condition], wrap: bool) {
        if conditions.is_empty() {
            return;
        }

        let several = conditions.len() > 1;
        for (i, condition) in conditions.iter().enumerate() {
            if i > 0 {
                sql.push(' ');
                sql.push_str(&condition.link().to_string());
                sql.push(' ');
            } else if wrap {
                sql.push('(');
            }

            // a sibling with children is grouped as one unit
            let grouped = several && condition.has_children();
            if grouped {
                sql.push('(');
            }
            Self::render_node(sql, condition);
            if grouped {
                sql.push(')');
            }
        }

        if wrap {
            sql.push(')');
        }
    }

    fn render_node(sql: &mut String, condition: &Condition) {
        if let Some(comparison) = &condition.comparison {
            Self::render_comparison(sql, comparison);
        }

        let Some(first) = condition.children.first() else {
            return;
        };

        if condition.comparison.is_some() {
            sql.push(' ');
            sql.push_str(&first.link().to_string());
            sql.push(' ');
        }
        Self::render_siblings(sql, &condition.children, condition.children.len() > 1);
    }

    fn render_comparison(sql: &mut String, comparison: &Comparison) {
        sql.push('(');
        if let Some(alias) = &comparison.table_alias {
            sql.push_str(alias);
            sql.push('.');
        }
        sql.push_str(&comparison.column);
        sql.push(' ');

        match &comparison.operator {
            Operator::In(values) | Operator::NotIn(values) => {
                sql.push_str(comparison.operator.symbol());
                sql.push_str(" (");
                sql.push_str(&values.join(", "));
                sql.push(')');
            }
            Operator::IsNull { .. } => sql.push_str(comparison.operator.symbol()),
            Operator::Equal(value)
            | Operator::NotEqual(value)
            | Operator::Greater(value)
            | Operator::GreaterOrEqual(value)
            | Operator::Less(value)
            | Operator::LessOrEqual(value)
            | Operator::Similar(value)
            | Operator::Like(value) => {
                sql.push_str(comparison.operator.symbol());
                sql.push(' ');
                sql.push_str(value);
            }
        }
        sql.push(')');
    }
}
