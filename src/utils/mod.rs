pub mod line_index;
pub mod quoting;

pub use line_index::LineIndex;
