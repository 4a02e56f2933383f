pub mod condition_renderer;
pub use condition_renderer::*;

pub mod projection_builder;
pub use projection_builder::*;

pub mod join_resolver;
pub use join_resolver::*;

pub mod cte_resolver;
pub use cte_resolver::*;

pub mod index_emitter;
pub use index_emitter::*;
