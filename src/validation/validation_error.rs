use std::fmt::Display;

use crate::{compiler::ResolveError, model::{FunctionName, SearchType}};

/// A structural problem found before rendering. Reported as a list, never raised.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    NoTables { owner: String },
    DuplicateCte { name: String },
    ColumnCountMismatch { left: String, right: String },
    UnresolvedJoinTarget { left: String, right: String },
    ParameterNotAllowed { function: FunctionName },
    ParameterRequired { function: FunctionName },
    MissingWindow { function: FunctionName },
    NoSearchColumns { view: String },
    MissingColumnType { table: String, column: String, search_type: SearchType },
    Resolve(ResolveError),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NoTables { owner } => write!(f, "{} has no tables", owner),
            ValidationError::DuplicateCte { name } => write!(f, "CTE {} is defined more than once", name),
            ValidationError::ColumnCountMismatch { left, right } => {
                write!(f, "join {} -> {} has different amount of columns", left, right)
            }
            ValidationError::UnresolvedJoinTarget { left, right } => {
                write!(f, "join {} -> {} does not match any table that is not joined yet", left, right)
            }
            ValidationError::ParameterNotAllowed { function } => {
                write!(f, "function {} doesn't required additional parameter!", function)
            }
            ValidationError::ParameterRequired { function } => {
                write!(f, "function {} requires additional parameter!", function)
            }
            ValidationError::MissingWindow { function } => write!(f, "function {} requires a window clause!", function),
            ValidationError::NoSearchColumns { view } => {
                write!(f, "view {} enables indexing but no column declares a search type", view)
            }
            ValidationError::MissingColumnType { table, column, search_type } => {
                write!(f, "column {}.{} declares search type {} but has no type", table, column, search_type)
            }
            ValidationError::Resolve(err) => write!(f, "{}", err),
        }
    }
}

impl From<ResolveError> for ValidationError {
    fn from(value: ResolveError) -> Self {
        ValidationError::Resolve(value)
    }
}
