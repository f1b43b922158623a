//! CLI command implementations

pub mod get;
pub mod headers;
pub mod path;
pub mod set;

pub use get::execute as get;
pub use headers::execute as headers;
pub use path::execute as path;
pub use set::execute as set;
