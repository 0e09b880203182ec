//! Invoice preview orchestrator that fetches pricing conditions per item and
//! rolls them up into line and document totals

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::config::InvoiceSettings;
use crate::tax::{DocumentTotals, LineBreakdown};
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::{validate_document_id, validate_item_number};

/// One rendered invoice line
///
/// Document totals are repeated on every line so consumers that read a single
/// flat record per line find them without a second lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub item: LineItem,
    /// Net amount per unit
    pub unit_rate: bigdecimal::BigDecimal,
    #[serde(flatten)]
    pub breakdown: LineBreakdown,
    #[serde(flatten)]
    pub totals: DocumentTotals,
}

/// Fully aggregated invoice ready for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePreview {
    pub document: BillingDocument,
    pub lines: Vec<InvoiceLine>,
    pub totals: DocumentTotals,
}

impl InvoicePreview {
    /// Line breakdowns in item order
    pub fn breakdowns(&self) -> impl Iterator<Item = &LineBreakdown> {
        self.lines.iter().map(|line| &line.breakdown)
    }

    /// Whether any line fell back to zero tax
    pub fn is_degraded(&self) -> bool {
        self.totals.degraded_items > 0
    }
}

/// Builds invoice previews from a [`BillingSource`]
pub struct InvoiceAggregator<S: BillingSource> {
    source: S,
    settings: InvoiceSettings,
}

impl<S: BillingSource> InvoiceAggregator<S> {
    /// Create an aggregator with default settings
    pub fn new(source: S) -> Self {
        Self::with_settings(source, InvoiceSettings::default())
    }

    /// Create an aggregator with custom settings
    pub fn with_settings(source: S, settings: InvoiceSettings) -> Self {
        Self { source, settings }
    }

    /// Settings in effect
    pub fn settings(&self) -> &InvoiceSettings {
        &self.settings
    }

    /// Underlying billing source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch a billing document and aggregate it into a preview
    #[instrument(skip(self))]
    pub async fn preview(&self, document_id: &str) -> InvoiceResult<InvoicePreview> {
        validate_document_id(document_id)?;

        let (document, items) = self
            .source
            .fetch_document(document_id)
            .await?
            .ok_or_else(|| InvoiceError::DocumentNotFound(document_id.to_string()))?;

        Ok(self.aggregate(document, items).await)
    }

    /// Aggregate an already-fetched document
    ///
    /// Condition fetches run concurrently; a failed fetch degrades only its own
    /// line. Output lines keep the input item order.
    #[instrument(
        skip(self, document, items),
        fields(document_id = %document.id, items = items.len())
    )]
    pub async fn aggregate(
        &self,
        document: BillingDocument,
        items: Vec<LineItem>,
    ) -> InvoicePreview {
        let breakdowns: Vec<LineBreakdown> =
            join_all(items.iter().map(|item| self.line_breakdown(&document.id, item))).await;

        let totals = DocumentTotals::aggregate(&breakdowns, &self.settings.words_unit_label);

        info!(
            grand_total = %totals.overall_grand_total,
            degraded_items = totals.degraded_items,
            "invoice aggregated"
        );

        let lines = items
            .into_iter()
            .zip(breakdowns)
            .map(|(item, breakdown)| InvoiceLine {
                unit_rate: item.unit_rate(),
                item,
                breakdown,
                totals: totals.clone(),
            })
            .collect();

        InvoicePreview {
            document,
            lines,
            totals,
        }
    }

    async fn line_breakdown(&self, document_id: &str, item: &LineItem) -> LineBreakdown {
        match self.fetch_conditions(document_id, item).await {
            Ok(records) => LineBreakdown::aggregate(item, &records),
            Err(e) => {
                warn!(
                    document_id,
                    item_id = %item.item_id,
                    error = %e,
                    "pricing conditions unavailable, applying zero tax"
                );
                LineBreakdown::fallback(item)
            }
        }
    }

    async fn fetch_conditions(
        &self,
        document_id: &str,
        item: &LineItem,
    ) -> InvoiceResult<Vec<RawConditionRecord>> {
        let item_number = item.item_number(self.settings.item_number_width);
        validate_item_number(&item_number)?;
        self.source
            .fetch_pricing_conditions(document_id, &item_number)
            .await
    }
}
