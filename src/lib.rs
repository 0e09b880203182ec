//! # GST Invoice Core
//!
//! Tax aggregation for GST invoices rendered from SAP billing documents.
//!
//! ## Features
//!
//! - **Condition classification**: SAP pricing-condition codes mapped to a closed set of buckets
//! - **Line aggregation**: taxable base, IGST/CGST/SGST/UGST amounts and grand total per item
//! - **Document aggregation**: exact roll-up of line figures with amounts in words
//! - **Indian numbering**: crore/lakh/thousand amount-in-words rendering
//! - **Failure isolation**: an item whose conditions cannot be fetched degrades to zero tax
//! - **Source abstraction**: upstream-agnostic design with a trait-based billing source
//!
//! ## Quick Start
//!
//! ```rust
//! use gst_invoice_core::{aggregate_document, aggregate_line, LineItem, RawConditionRecord};
//! use bigdecimal::BigDecimal;
//!
//! let item = LineItem::new("10", "Widget", BigDecimal::from(1), "EA", BigDecimal::from(1000));
//! let records = vec![
//!     RawConditionRecord::with_rate("ZFRE", BigDecimal::from(50)),
//!     RawConditionRecord::with_rate("JOIG", BigDecimal::from(18)),
//! ];
//!
//! let line = aggregate_line(&item, &records);
//! assert_eq!(line.grand_total, BigDecimal::from(1239));
//!
//! let totals = aggregate_document(&[line], "Rupees Only");
//! assert_eq!(totals.grand_total_in_words, "One Thousand Two Hundred Thirty Nine Rupees Only");
//! ```

pub mod config;
pub mod invoice;
pub mod tax;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use invoice::*;
pub use tax::*;
pub use traits::*;
pub use types::*;

pub use utils::words::{amount_in_words, to_words};
