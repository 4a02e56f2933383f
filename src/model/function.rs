use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::model::ModelError;

/// The closed set of functions a view may project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum FunctionName {
    Count,
    Sum,
    Avg,
    Min,
    Max,
    StringAgg,
    ArrayAgg,
    JsonAgg,
    BoolAnd,
    BoolOr,
    RowNumber,
    Rank,
    DenseRank,
}

impl FunctionName {
    pub fn sql_name(&self) -> &'static str {
        match self {
            FunctionName::Count => "COUNT",
            FunctionName::Sum => "SUM",
            FunctionName::Avg => "AVG",
            FunctionName::Min => "MIN",
            FunctionName::Max => "MAX",
            FunctionName::StringAgg => "STRING_AGG",
            FunctionName::ArrayAgg => "ARRAY_AGG",
            FunctionName::JsonAgg => "JSON_AGG",
            FunctionName::BoolAnd => "BOOL_AND",
            FunctionName::BoolOr => "BOOL_OR",
            FunctionName::RowNumber => "ROW_NUMBER",
            FunctionName::Rank => "RANK",
            FunctionName::DenseRank => "DENSE_RANK",
        }
    }

    /// `true` when the function takes an extra parameter after its source
    /// column (the separator of `STRING_AGG`); every other function forbids one.
    pub fn requires_parameter(&self) -> bool {
        matches!(self, FunctionName::StringAgg)
    }

    /// Row-numbering functions take no source column argument.
    pub fn is_row_numbering(&self) -> bool {
        matches!(self, FunctionName::RowNumber | FunctionName::Rank | FunctionName::DenseRank)
    }
}

impl FromStr for FunctionName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = match s.trim().to_ascii_lowercase().as_str() {
            "count" => FunctionName::Count,
            "sum" => FunctionName::Sum,
            "avg" => FunctionName::Avg,
            "min" => FunctionName::Min,
            "max" => FunctionName::Max,
            "string_agg" => FunctionName::StringAgg,
            "array_agg" => FunctionName::ArrayAgg,
            "json_agg" => FunctionName::JsonAgg,
            "bool_and" => FunctionName::BoolAnd,
            "bool_or" => FunctionName::BoolOr,
            "row_number" => FunctionName::RowNumber,
            "rank" => FunctionName::Rank,
            "dense_rank" => FunctionName::DenseRank,
            _ => return Err(ModelError::UnknownFunction(s.to_string())),
        };
        Ok(name)
    }
}

impl TryFrom<String> for FunctionName {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FunctionName> for String {
    fn from(value: FunctionName) -> Self {
        value.sql_name().to_ascii_lowercase()
    }
}

impl Display for FunctionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sql_name())
    }
}

/// A projected function call over one source column.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    pub name: FunctionName,
    /// Alias of the table holding the source column; defaults to the owning table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    pub alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// Text placed inside `OVER (...)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,
}

impl Function {
    pub fn new(name: FunctionName, column_name: &str, alias: &str) -> Self {
        Self {
            name,
            table_alias: None,
            column_name: Some(column_name.to_string()),
            alias: alias.to_string(),
            parameter: None,
            window: None,
        }
    }

    pub fn row_numbering(name: FunctionName, window: &str, alias: &str) -> Self {
        Self {
            name,
            table_alias: None,
            column_name: None,
            alias: alias.to_string(),
            parameter: None,
            window: Some(window.to_string()),
        }
    }

    pub fn on_table(mut self, alias: &str) -> Self {
        self.table_alias = Some(alias.to_string());
        self
    }

    pub fn with_parameter(mut self, parameter: &str) -> Self {
        self.parameter = Some(parameter.to_string());
        self
    }

    pub fn with_window(mut self, window: &str) -> Self {
        self.window = Some(window.to_string());
        self
    }

    pub fn is_windowed(&self) -> bool {
        self.window.is_some()
    }
}
