mod type_utils;
mod document_utils;

pub use document_utils::*;
pub use type_utils::*;
