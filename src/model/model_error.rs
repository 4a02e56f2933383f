use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    Json(String),
    UnknownOperator(String),
    MissingValue { operator: String },
    MissingColumn { operator: String },
    MissingOperator { column: String },
    UnknownFunction(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::Json(message) => write!(f, "invalid view definition: {}", message),
            ModelError::UnknownOperator(op) => write!(f, "unknown condition operator '{}'", op),
            ModelError::MissingValue { operator } => write!(f, "operator {} requires a value", operator),
            ModelError::MissingColumn { operator } => write!(f, "operator {} requires a column", operator),
            ModelError::MissingOperator { column } => write!(f, "condition on column {} has no operator", column),
            ModelError::UnknownFunction(name) => write!(f, "unknown function '{}'", name),
        }
    }
}

impl std::error::Error for ModelError {}

impl From<serde_json::Error> for ModelError {
    fn from(value: serde_json::Error) -> Self {
        ModelError::Json(value.to_string())
    }
}
