//! GST aggregation engine: condition classification, per-line and
//! document-level totals

pub mod condition;
pub mod document;
pub mod line;

pub use condition::*;
pub use document::*;
pub use line::*;
