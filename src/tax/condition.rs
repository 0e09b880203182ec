//! Pricing-condition classification
//!
//! Maps SAP condition-type codes onto the closed set of buckets the line
//! aggregator understands. Unknown codes are never an error: they classify as
//! [`Bucket::Ignored`].

use serde::{Deserialize, Serialize};

use crate::types::RawConditionRecord;

/// GST component a tax condition contributes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxComponent {
    /// Integrated GST (inter-state supply)
    Igst,
    /// Central GST (intra-state, paired with SGST or UGST)
    Cgst,
    /// State GST
    Sgst,
    /// Union-territory GST
    Ugst,
}

/// Semantic bucket of a pricing condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Packing,
    Freight,
    Insurance,
    Discount,
    RoundOff,
    Tax(TaxComponent),
    /// Replaces the item's net amount as the taxable base
    BaseAmountOverride,
    Ignored,
}

impl Bucket {
    /// Bucket for a condition-type code; matching is exact and case-sensitive
    pub fn from_code(code: &str) -> Self {
        match code {
            "ZPAC" => Bucket::Packing,
            "ZFRE" => Bucket::Freight,
            "ZINS" => Bucket::Insurance,
            "ZDIS" => Bucket::Discount,
            "ZROF" => Bucket::RoundOff,
            "JOIG" => Bucket::Tax(TaxComponent::Igst),
            "JOCG" => Bucket::Tax(TaxComponent::Cgst),
            "JOSG" => Bucket::Tax(TaxComponent::Sgst),
            "JOUG" => Bucket::Tax(TaxComponent::Ugst),
            "ZVAL" => Bucket::BaseAmountOverride,
            _ => Bucket::Ignored,
        }
    }
}

/// Classify a raw pricing-condition record
pub fn classify(record: &RawConditionRecord) -> Bucket {
    Bucket::from_code(record.condition_type.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    #[test]
    fn test_known_codes() {
        let table = [
            ("ZPAC", Bucket::Packing),
            ("ZFRE", Bucket::Freight),
            ("ZINS", Bucket::Insurance),
            ("ZDIS", Bucket::Discount),
            ("ZROF", Bucket::RoundOff),
            ("JOIG", Bucket::Tax(TaxComponent::Igst)),
            ("JOCG", Bucket::Tax(TaxComponent::Cgst)),
            ("JOSG", Bucket::Tax(TaxComponent::Sgst)),
            ("JOUG", Bucket::Tax(TaxComponent::Ugst)),
            ("ZVAL", Bucket::BaseAmountOverride),
        ];

        for (code, expected) in table {
            let record = RawConditionRecord::with_rate(code, BigDecimal::from(1));
            assert_eq!(classify(&record), expected, "code {}", code);
        }
    }

    #[test]
    fn test_unknown_codes_are_ignored() {
        for code in ["PR00", "", "joig", "ZPACK", "DRV1"] {
            let record = RawConditionRecord::with_amount(code, BigDecimal::from(10));
            assert_eq!(classify(&record), Bucket::Ignored, "code {:?}", code);
        }
    }

    #[test]
    fn test_padded_code() {
        let record = RawConditionRecord::with_rate(" JOCG ", BigDecimal::from(9));
        assert_eq!(classify(&record), Bucket::Tax(TaxComponent::Cgst));
    }
}
