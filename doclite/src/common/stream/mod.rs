mod document_cursor;
mod projected_cursor;
pub(crate) mod filtered_stream;
pub(crate) mod map_values;
pub(crate) mod single_stream;

pub use document_cursor::*;
pub use projected_cursor::*;
