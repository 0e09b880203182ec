//! Utility modules

pub mod memory_source;
pub mod odata;
pub mod sap_date;
pub mod validation;
pub mod words;

pub use memory_source::*;
pub use validation::*;
