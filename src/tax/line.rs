//! Per-item aggregation of pricing conditions into a taxable base, tax amounts
//! and an item grand total

use bigdecimal::{BigDecimal, Signed, Zero};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::tax::condition::{classify, Bucket, TaxComponent};
use crate::types::{LineItem, RawConditionRecord};

/// Additive charge (packing, freight, insurance) as the pricing engine reports it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChargeLine {
    /// Sum of condition rates; this is what enters the taxable base
    pub rate: BigDecimal,
    /// Sum of condition amounts, kept for reporting
    pub amount: BigDecimal,
}

/// Rate and computed amount for one GST component
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaxLine {
    /// Rate in percent (e.g. 18 for 18%)
    pub rate_percent: BigDecimal,
    /// `taxable_amount * rate_percent / 100`
    pub amount: BigDecimal,
}

impl TaxLine {
    fn on(taxable_amount: &BigDecimal, rate_percent: BigDecimal) -> Self {
        let amount = (taxable_amount * &rate_percent) / BigDecimal::from(100);
        Self {
            rate_percent,
            amount,
        }
    }
}

/// Tax breakdown of a single billing line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineBreakdown {
    /// Item this breakdown belongs to
    pub item_id: String,
    /// Net amount, or the `ZVAL` override when present
    pub base_amount: BigDecimal,
    pub packing: ChargeLine,
    pub freight: ChargeLine,
    pub insurance: ChargeLine,
    /// Discount as received; normally already negative
    pub discount_amount: BigDecimal,
    pub round_off_amount: BigDecimal,
    /// Base plus charge rates plus discount
    pub taxable_amount: BigDecimal,
    pub igst: TaxLine,
    pub cgst: TaxLine,
    pub sgst: TaxLine,
    pub ugst: TaxLine,
    /// Sum of the four tax amounts
    pub total_tax_amount: BigDecimal,
    /// Taxable amount plus taxes plus round-off
    pub grand_total: BigDecimal,
    /// Set when the item's conditions could not be fetched and no tax was applied
    pub degraded: bool,
}

/// Running sums over an item's classified conditions
#[derive(Debug, Default)]
struct ConditionSums {
    packing: ChargeLine,
    freight: ChargeLine,
    insurance: ChargeLine,
    discount: BigDecimal,
    round_off: BigDecimal,
    igst_rate: BigDecimal,
    cgst_rate: BigDecimal,
    sgst_rate: BigDecimal,
    ugst_rate: BigDecimal,
    base_override: Option<BigDecimal>,
}

impl ConditionSums {
    fn add(&mut self, record: &RawConditionRecord) {
        let rate = &record.condition_rate_value;
        let amount = &record.condition_amount;

        match classify(record) {
            Bucket::Packing => Self::add_charge(&mut self.packing, record),
            Bucket::Freight => Self::add_charge(&mut self.freight, record),
            Bucket::Insurance => Self::add_charge(&mut self.insurance, record),
            Bucket::Discount => self.discount += amount,
            Bucket::RoundOff => self.round_off += amount,
            Bucket::Tax(TaxComponent::Igst) => self.igst_rate += rate,
            Bucket::Tax(TaxComponent::Cgst) => self.cgst_rate += rate,
            Bucket::Tax(TaxComponent::Sgst) => self.sgst_rate += rate,
            Bucket::Tax(TaxComponent::Ugst) => self.ugst_rate += rate,
            Bucket::BaseAmountOverride => self.base_override = Some(amount.clone()),
            Bucket::Ignored => {
                debug!(condition_type = %record.condition_type, "ignoring pricing condition");
            }
        }
    }

    fn add_charge(charge: &mut ChargeLine, record: &RawConditionRecord) {
        charge.rate += &record.condition_rate_value;
        charge.amount += &record.condition_amount;
    }
}

impl LineBreakdown {
    /// Aggregate an item's pricing conditions
    pub fn aggregate(item: &LineItem, records: &[RawConditionRecord]) -> Self {
        let mut sums = ConditionSums::default();
        for record in records {
            sums.add(record);
        }

        let base_amount = sums
            .base_override
            .take()
            .unwrap_or_else(|| item.net_amount.clone());

        // Discount is added as received: the pricing engine already signs it negative.
        let taxable_amount = &base_amount
            + &sums.insurance.rate
            + &sums.freight.rate
            + &sums.packing.rate
            + &sums.discount;

        if taxable_amount.is_negative() {
            warn!(
                item_id = %item.item_id,
                taxable_amount = %taxable_amount,
                "negative taxable amount"
            );
        }

        let igst = TaxLine::on(&taxable_amount, sums.igst_rate);
        let cgst = TaxLine::on(&taxable_amount, sums.cgst_rate);
        let sgst = TaxLine::on(&taxable_amount, sums.sgst_rate);
        let ugst = TaxLine::on(&taxable_amount, sums.ugst_rate);

        let total_tax_amount = &igst.amount + &cgst.amount + &sgst.amount + &ugst.amount;
        let grand_total = &taxable_amount + &total_tax_amount + &sums.round_off;

        Self {
            item_id: item.item_id.clone(),
            base_amount,
            packing: sums.packing,
            freight: sums.freight,
            insurance: sums.insurance,
            discount_amount: sums.discount,
            round_off_amount: sums.round_off,
            taxable_amount,
            igst,
            cgst,
            sgst,
            ugst,
            total_tax_amount,
            grand_total,
            degraded: false,
        }
    }

    /// Zero-tax breakdown used when an item's conditions are unavailable
    pub fn fallback(item: &LineItem) -> Self {
        Self {
            item_id: item.item_id.clone(),
            base_amount: item.net_amount.clone(),
            packing: ChargeLine::default(),
            freight: ChargeLine::default(),
            insurance: ChargeLine::default(),
            discount_amount: BigDecimal::zero(),
            round_off_amount: BigDecimal::zero(),
            taxable_amount: item.net_amount.clone(),
            igst: TaxLine::default(),
            cgst: TaxLine::default(),
            sgst: TaxLine::default(),
            ugst: TaxLine::default(),
            total_tax_amount: BigDecimal::zero(),
            grand_total: item.net_amount.clone(),
            degraded: true,
        }
    }

    /// Tax line for one GST component
    pub fn tax(&self, component: TaxComponent) -> &TaxLine {
        match component {
            TaxComponent::Igst => &self.igst,
            TaxComponent::Cgst => &self.cgst,
            TaxComponent::Sgst => &self.sgst,
            TaxComponent::Ugst => &self.ugst,
        }
    }

    /// Whether the discount pushed the taxable amount below zero
    pub fn has_negative_taxable(&self) -> bool {
        self.taxable_amount.is_negative()
    }
}

/// Aggregate one billing line; see [`LineBreakdown::aggregate`]
pub fn aggregate_line(item: &LineItem, records: &[RawConditionRecord]) -> LineBreakdown {
    LineBreakdown::aggregate(item, records)
}
