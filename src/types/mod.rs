pub mod segment;
pub mod track;

pub use segment::*;
pub use track::*;
