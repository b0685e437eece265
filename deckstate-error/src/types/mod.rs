pub mod corrupt_data;
pub mod document;

pub use corrupt_data::*;
pub use document::*;
