pub mod datetime;
pub mod loader;
pub mod points;

pub use datetime::*;
pub use loader::*;
pub use points::*;
