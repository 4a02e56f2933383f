//! Compiles declarative view definitions (tables, joins, CTEs, functions and
//! condition trees) into `CREATE OR REPLACE VIEW` statements, search indexes
//! and column metadata for a registry query API.

pub mod model;
pub use model::{
    Column, ColumnAccess, ColumnGroup, Condition, Cte, Function, FunctionName, Join, JoinKind, LogicOp,
    ModelError, Operator, SearchType, SortOrder, Table, TableAccess, ViewSpec,
};

pub mod config;
pub use config::{CompilerConfig, ConfigError};

pub mod compiler;
pub use compiler::{CompileError, CompiledView, ViewCompiler};

pub mod validation;
pub use validation::{ValidationError, Validator};

pub mod metadata;
pub use metadata::{ColumnMetadata, ViewMetadata};
