pub mod fields;
pub mod js_module;

pub use fields::{ConfigEdit, MissingField};
