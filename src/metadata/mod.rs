pub mod view_metadata;
pub use view_metadata::*;
