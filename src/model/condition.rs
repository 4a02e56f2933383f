use serde::{Deserialize, Serialize};

use crate::model::{LogicOp, ModelError, Operator};

/// `[alias.]column <operator>` part of a condition node.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub table_alias: Option<String>,
    pub column: String,
    pub operator: Operator,
}

/// A node of a condition tree. Siblings are joined by each node's own
/// `logic` operator; a node without a comparison only groups its children.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(try_from = "RawCondition", into = "RawCondition")]
pub struct Condition {
    pub logic: Option<LogicOp>,
    pub comparison: Option<Comparison>,
    pub children: Vec<Condition>,
}

impl Condition {
    pub fn leaf(column: &str, operator: Operator) -> Self {
        Self {
            logic: None,
            comparison: Some(Comparison { table_alias: None, column: column.to_string(), operator }),
            children: vec![],
        }
    }

    pub fn group(children: Vec<Condition>) -> Self {
        Self { logic: None, comparison: None, children }
    }

    pub fn on_table(mut self, alias: &str) -> Self {
        if let Some(comparison) = self.comparison.as_mut() {
            comparison.table_alias = Some(alias.to_string());
        }
        self
    }

    pub fn and(mut self) -> Self {
        self.logic = Some(LogicOp::And);
        self
    }

    pub fn or(mut self) -> Self {
        self.logic = Some(LogicOp::Or);
        self
    }

    pub fn with_children(mut self, children: Vec<Condition>) -> Self {
        self.children = children;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Logic operator linking this node to the preceding sibling.
    pub fn link(&self) -> LogicOp {
        self.logic.unwrap_or_default()
    }
}

/// Loader representation of a condition, with the operator as free text.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic_op: Option<LogicOp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<RawCondition>,
}

impl TryFrom<RawCondition> for Condition {
    type Error = ModelError;

    fn try_from(raw: RawCondition) -> Result<Self, Self::Error> {
        let comparison = match (raw.column, raw.operator) {
            (Some(column), Some(operator)) => Some(Comparison {
                table_alias: raw.table_alias,
                column,
                operator: Operator::parse(&operator, raw.value.as_deref())?,
            }),
            (None, Some(operator)) => return Err(ModelError::MissingColumn { operator }),
            (Some(column), None) => return Err(ModelError::MissingOperator { column }),
            (None, None) => None,
        };

        let children = raw.conditions
            .into_iter()
            .map(Condition::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Condition { logic: raw.logic_op, comparison, children })
    }
}

impl From<Condition> for RawCondition {
    fn from(condition: Condition) -> Self {
        let (table_alias, column, operator, value) = match condition.comparison {
            Some(c) => {
                let value = match &c.operator {
                    Operator::IsNull { negated: true } => Some("false".to_string()),
                    other => other.raw_value(),
                };
                let symbol = match c.operator {
                    Operator::IsNull { .. } => "IS NULL",
                    ref other => other.symbol(),
                };
                (c.table_alias, Some(c.column), Some(symbol.to_string()), value)
            }
            None => (None, None, None, None),
        };

        RawCondition {
            logic_op: condition.logic,
            table_alias,
            column,
            operator,
            value,
            conditions: condition.children.into_iter().map(RawCondition::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_condition_tree_from_json() {
        let condition: Condition = serde_json::from_value(json!({
            "column": "status", "operator": "=", "value": "'open'",
            "conditions": [
                { "logicOp": "OR", "tableAlias": "o", "column": "amount", "operator": ">", "value": "10" },
                { "logicOp": "OR", "column": "deleted_at", "operator": "IS NULL", "value": "false" }
            ]
        })).unwrap();

        let comparison = condition.comparison.as_ref().unwrap();
        assert_eq!(comparison.column, "status");
        assert_eq!(comparison.operator, Operator::Equal("'open'".into()));
        assert_eq!(condition.children.len(), 2);
        assert_eq!(condition.children[0].link(), LogicOp::Or);
        assert_eq!(condition.children[0].comparison.as_ref().unwrap().table_alias.as_deref(), Some("o"));
        assert_eq!(condition.children[1].comparison.as_ref().unwrap().operator, Operator::IsNull { negated: true });
    }

    #[test]
    fn test_unknown_operator_is_rejected_while_loading() {
        let result = serde_json::from_value::<Condition>(json!({ "column": "a", "operator": "BETWEEN", "value": "1" }));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("unknown condition operator"));
    }

    #[test]
    fn test_group_node_without_comparison() {
        let condition: Condition = serde_json::from_value(json!({
            "conditions": [ { "column": "a", "operator": "=", "value": "1" } ]
        })).unwrap();
        assert!(condition.comparison.is_none());
        assert!(condition.has_children());
    }

    #[test]
    fn test_condition_survives_serialization() {
        let condition = Condition::leaf("kind", Operator::In(vec!["'a'".into(), "'b'".into()])).on_table("t").or();
        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(value["operator"], "IN");
        assert_eq!(value["value"], "'a','b'");
        let back: Condition = serde_json::from_value(value).unwrap();
        assert_eq!(back, condition);
    }
}
