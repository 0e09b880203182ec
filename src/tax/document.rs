//! Document-level reduction of line breakdowns

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};

use crate::tax::line::LineBreakdown;
use crate::utils::words::amount_in_words;

/// Totals across every line of a billing document
///
/// Each figure is the plain sum of the matching per-line figure; nothing is
/// recomputed at document level, so line and document views always agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTotals {
    pub overall_base_amount: BigDecimal,
    pub overall_taxable_amount: BigDecimal,
    pub overall_igst: BigDecimal,
    pub overall_cgst: BigDecimal,
    pub overall_sgst: BigDecimal,
    pub overall_ugst: BigDecimal,
    /// IGST + CGST + SGST + UGST
    pub overall_gst: BigDecimal,
    pub overall_grand_total: BigDecimal,
    pub total_packing: BigDecimal,
    pub total_freight: BigDecimal,
    pub total_insurance: BigDecimal,
    pub total_discount: BigDecimal,
    pub total_round_off: BigDecimal,
    /// Lines that fell back to zero tax
    pub degraded_items: usize,
    pub gst_in_words: String,
    pub grand_total_in_words: String,
}

impl DocumentTotals {
    /// Reduce line breakdowns, rendering word forms with `unit_label`
    pub fn aggregate(breakdowns: &[LineBreakdown], unit_label: &str) -> Self {
        let zero = BigDecimal::zero;
        let mut totals = Self {
            overall_base_amount: zero(),
            overall_taxable_amount: zero(),
            overall_igst: zero(),
            overall_cgst: zero(),
            overall_sgst: zero(),
            overall_ugst: zero(),
            overall_gst: zero(),
            overall_grand_total: zero(),
            total_packing: zero(),
            total_freight: zero(),
            total_insurance: zero(),
            total_discount: zero(),
            total_round_off: zero(),
            degraded_items: 0,
            gst_in_words: String::new(),
            grand_total_in_words: String::new(),
        };

        for line in breakdowns {
            totals.overall_base_amount += &line.base_amount;
            totals.overall_taxable_amount += &line.taxable_amount;
            totals.overall_igst += &line.igst.amount;
            totals.overall_cgst += &line.cgst.amount;
            totals.overall_sgst += &line.sgst.amount;
            totals.overall_ugst += &line.ugst.amount;
            totals.overall_grand_total += &line.grand_total;
            totals.total_packing += &line.packing.amount;
            totals.total_freight += &line.freight.amount;
            totals.total_insurance += &line.insurance.amount;
            totals.total_discount += &line.discount_amount;
            totals.total_round_off += &line.round_off_amount;
            if line.degraded {
                totals.degraded_items += 1;
            }
        }

        totals.overall_gst = &totals.overall_igst
            + &totals.overall_cgst
            + &totals.overall_sgst
            + &totals.overall_ugst;
        totals.gst_in_words = amount_in_words(&totals.overall_gst, unit_label);
        totals.grand_total_in_words = amount_in_words(&totals.overall_grand_total, unit_label);

        totals
    }
}

/// Aggregate document totals; see [`DocumentTotals::aggregate`]
pub fn aggregate_document(breakdowns: &[LineBreakdown], unit_label: &str) -> DocumentTotals {
    DocumentTotals::aggregate(breakdowns, unit_label)
}
