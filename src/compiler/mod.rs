pub mod compile_error;
pub use compile_error::*;

pub mod render_context;
pub use render_context::*;

pub mod resolvers;
pub use resolvers::*;

pub mod view_assembler;
pub use view_assembler::*;

pub mod view_compiler;
pub use view_compiler::*;

mod _tests;
