//! Invoice rendering settings

use serde::{Deserialize, Serialize};

/// Settings applied when building an invoice preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceSettings {
    /// Appended to every amount-in-words rendering
    pub words_unit_label: String,
    /// Width the item number is zero-padded to for pricing-condition lookups
    pub item_number_width: usize,
}

impl Default for InvoiceSettings {
    fn default() -> Self {
        Self {
            words_unit_label: "Rupees Only".to_string(),
            item_number_width: 6,
        }
    }
}

impl InvoiceSettings {
    /// Override the amount-in-words unit label
    pub fn with_unit_label(mut self, label: impl Into<String>) -> Self {
        self.words_unit_label = label.into();
        self
    }
}
