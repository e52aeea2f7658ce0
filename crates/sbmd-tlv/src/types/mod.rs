pub mod json;
pub mod type_hint;
pub mod value;

pub use type_hint::TypeHint;
pub use value::{Element, Value};
