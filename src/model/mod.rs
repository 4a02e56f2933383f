pub mod model_error;
pub use model_error::*;

pub mod search_type;
pub use search_type::*;

pub mod sort_order;
pub use sort_order::*;

pub mod access;
pub use access::*;

pub mod sql_type;
pub use sql_type::*;

pub mod column;
pub use column::*;

pub mod function;
pub use function::*;

pub mod join;
pub use join::*;

pub mod operator;
pub use operator::*;

pub mod condition;
pub use condition::*;

pub mod table;
pub use table::*;

pub mod cte;
pub use cte::*;

pub mod view_spec;
pub use view_spec::*;

/// Common shape of anything rendered as a single `SELECT`: the main view body
/// and every CTE body.
pub trait SelectBody {
    fn tables(&self) -> &[Table];
    fn joins(&self) -> &[Join];
    fn conditions(&self) -> &[Condition];
    fn limit(&self) -> Option<u64> {
        None
    }
}
