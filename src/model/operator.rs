use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::model::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum LogicOp {
    #[default]
    #[serde(alias = "and")]
    #[serde(rename = "AND")]
    And,
    #[serde(alias = "or")]
    #[serde(rename = "OR")]
    Or,
}

impl Display for LogicOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicOp::And => write!(f, "AND"),
            LogicOp::Or => write!(f, "OR"),
        }
    }
}

/// Comparison applied by a condition leaf. Every variant carries exactly the
/// operand it renders; values are raw SQL text and are not escaped.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    Equal(String),
    NotEqual(String),
    Greater(String),
    GreaterOrEqual(String),
    Less(String),
    LessOrEqual(String),
    In(Vec<String>),
    NotIn(Vec<String>),
    IsNull { negated: bool },
    Similar(String),
    Like(String),
}

impl Operator {
    /// Build an operator from its textual symbol and raw value.
    ///
    /// `IN`/`NOT IN` values are a comma separated list; `IS NULL` with the raw
    /// value `false` means `IS NOT NULL`.
    pub fn parse(symbol: &str, value: Option<&str>) -> Result<Self, ModelError> {
        let normalized = symbol.split_whitespace().collect::<Vec<_>>().join(" ").to_ascii_uppercase();
        let required = || {
            value
                .map(|v| v.to_string())
                .ok_or_else(|| ModelError::MissingValue { operator: normalized.clone() })
        };

        let op = match normalized.as_str() {
            "=" | "==" => Operator::Equal(required()?),
            "<>" | "!=" => Operator::NotEqual(required()?),
            ">" => Operator::Greater(required()?),
            ">=" => Operator::GreaterOrEqual(required()?),
            "<" => Operator::Less(required()?),
            "<=" => Operator::LessOrEqual(required()?),
            "IN" => Operator::In(split_list(&required()?)),
            "NOT IN" => Operator::NotIn(split_list(&required()?)),
            "IS NULL" | "NULL" => Operator::IsNull {
                negated: value.map(|v| v.trim().eq_ignore_ascii_case("false")).unwrap_or(false),
            },
            "IS NOT NULL" => Operator::IsNull { negated: true },
            "~" | "SIMILAR" | "REGEX" => Operator::Similar(required()?),
            "LIKE" => Operator::Like(required()?),
            _ => return Err(ModelError::UnknownOperator(symbol.to_string())),
        };
        Ok(op)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Equal(_) => "=",
            Operator::NotEqual(_) => "<>",
            Operator::Greater(_) => ">",
            Operator::GreaterOrEqual(_) => ">=",
            Operator::Less(_) => "<",
            Operator::LessOrEqual(_) => "<=",
            Operator::In(_) => "IN",
            Operator::NotIn(_) => "NOT IN",
            Operator::IsNull { negated: false } => "IS NULL",
            Operator::IsNull { negated: true } => "IS NOT NULL",
            Operator::Similar(_) => "~",
            Operator::Like(_) => "LIKE",
        }
    }

    /// The raw value as the loader format stores it.
    pub fn raw_value(&self) -> Option<String> {
        match self {
            Operator::Equal(v)
            | Operator::NotEqual(v)
            | Operator::Greater(v)
            | Operator::GreaterOrEqual(v)
            | Operator::Less(v)
            | Operator::LessOrEqual(v)
            | Operator::Similar(v)
            | Operator::Like(v) => Some(v.clone()),
            Operator::In(values) | Operator::NotIn(values) => Some(values.join(",")),
            Operator::IsNull { .. } => None,
        }
    }
}

/// Split a comma separated value list, keeping commas inside single quotes.
pub fn split_list(raw: &str) -> Vec<String> {
    let mut items = vec![];
    let mut current = String::new();
    let mut quoted = false;

    for ch in raw.chars() {
        match ch {
            '\'' => {
                quoted = !quoted;
                current.push(ch);
            }
            ',' if !quoted => {
                items.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    items.push(current.trim().to_string());

    items.into_iter().filter(|item| !item.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comparisons() {
        assert_eq!(Operator::parse("=", Some("'done'")).unwrap(), Operator::Equal("'done'".into()));
        assert_eq!(Operator::parse("!=", Some("1")).unwrap(), Operator::NotEqual("1".into()));
        assert_eq!(Operator::parse("like", Some("'a%'")).unwrap(), Operator::Like("'a%'".into()));
        assert_eq!(Operator::parse("~", Some("'^a'")).unwrap(), Operator::Similar("'^a'".into()));
    }

    #[test]
    fn test_parse_null_check_uses_false_marker() {
        assert_eq!(Operator::parse("IS NULL", None).unwrap(), Operator::IsNull { negated: false });
        assert_eq!(Operator::parse("is null", Some("false")).unwrap(), Operator::IsNull { negated: true });
        assert_eq!(Operator::parse("IS  NOT NULL", None).unwrap(), Operator::IsNull { negated: true });
    }

    #[test]
    fn test_parse_in_list() {
        let op = Operator::parse("not in", Some("'a,b', 'c',3")).unwrap();
        assert_eq!(op, Operator::NotIn(vec!["'a,b'".into(), "'c'".into(), "3".into()]));
    }

    #[test]
    fn test_parse_rejects_unknown_and_missing_value() {
        assert_eq!(Operator::parse("BETWEEN", Some("1")), Err(ModelError::UnknownOperator("BETWEEN".into())));
        assert_eq!(Operator::parse(">", None), Err(ModelError::MissingValue { operator: ">".into() }));
    }
}
