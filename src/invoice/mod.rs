//! Invoice preview assembly on top of the tax engine

pub mod preview;

pub use preview::*;
