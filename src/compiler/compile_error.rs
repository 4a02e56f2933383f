use std::fmt::Display;

use crate::validation::ValidationError;

/// Failure to follow a column through a chain of CTEs.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    ColumnNotFound { table: String, column: String },
    CyclicCte { chain: Vec<String> },
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::ColumnNotFound { table, column } => write!(f, "column {} not found in table {}", column, table),
            ResolveError::CyclicCte { chain } => write!(f, "cyclic CTE chain: {}", chain.join(" -> ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// The pre-flight validation rejected the view.
    Validation(Vec<ValidationError>),
    EmptySelect(String),
    UnresolvedJoinTarget { left: String, right: String },
    Resolve(ResolveError),
    MissingColumnType { table: String, column: String },
}

impl Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Validation(errors) => {
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "view validation failed: {}", messages.join("; "))
            }
            CompileError::EmptySelect(owner) => write!(f, "{} has no tables", owner),
            CompileError::UnresolvedJoinTarget { left, right } => {
                write!(f, "no unconsumed table matches join {} -> {}", left, right)
            }
            CompileError::Resolve(err) => write!(f, "{}", err),
            CompileError::MissingColumnType { table, column } => {
                write!(f, "column {}.{} has a search type but no type", table, column)
            }
        }
    }
}

impl std::error::Error for CompileError {}

impl From<ResolveError> for CompileError {
    fn from(value: ResolveError) -> Self {
        CompileError::Resolve(value)
    }
}
