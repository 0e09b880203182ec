//! Traits for the upstream billing-data abstraction

use async_trait::async_trait;

use crate::types::*;

/// Source of billing documents and their pricing conditions
///
/// This trait lets the aggregation core run against any upstream (an OData
/// client, a fixture set, an in-memory store) by implementing these methods.
#[async_trait]
pub trait BillingSource: Send + Sync {
    /// Fetch a billing document header with its line items
    ///
    /// Returns `Ok(None)` when the document does not exist.
    async fn fetch_document(
        &self,
        document_id: &str,
    ) -> InvoiceResult<Option<(BillingDocument, Vec<LineItem>)>>;

    /// Fetch the pricing conditions of one item
    ///
    /// `item_number` is the zero-padded item number (e.g. "000010").
    async fn fetch_pricing_conditions(
        &self,
        document_id: &str,
        item_number: &str,
    ) -> InvoiceResult<Vec<RawConditionRecord>>;
}
