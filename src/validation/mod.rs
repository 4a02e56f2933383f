pub mod validation_error;
pub use validation_error::*;

pub mod validator;
pub use validator::*;
