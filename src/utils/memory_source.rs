//! In-memory billing source for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;
use crate::utils::odata::parse_collection;

/// What a pricing-conditions lookup answers with
#[derive(Debug, Clone)]
enum ConditionEntry {
    Records(Vec<RawConditionRecord>),
    /// Raw OData response body, parsed on every fetch
    Payload(String),
    Failure(String),
}

type ItemKey = (String, String);

/// In-memory billing source for testing and development
#[derive(Debug, Clone, Default)]
pub struct MemoryBillingSource {
    documents: Arc<RwLock<HashMap<String, (BillingDocument, Vec<LineItem>)>>>,
    conditions: Arc<RwLock<HashMap<ItemKey, ConditionEntry>>>,
}

impl MemoryBillingSource {
    /// Create a new, empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a billing document with its items
    pub fn insert_document(
        &self,
        document: BillingDocument,
        items: Vec<LineItem>,
    ) -> InvoiceResult<()> {
        self.documents
            .write()
            .map_err(|e| InvoiceError::Source(e.to_string()))?
            .insert(document.id.clone(), (document, items));
        Ok(())
    }

    /// Store the pricing conditions of one item
    pub fn insert_conditions(
        &self,
        document_id: &str,
        item_number: &str,
        records: Vec<RawConditionRecord>,
    ) -> InvoiceResult<()> {
        self.put(document_id, item_number, ConditionEntry::Records(records))
    }

    /// Store a raw OData response body as the item's conditions answer
    pub fn insert_conditions_payload(
        &self,
        document_id: &str,
        item_number: &str,
        body: impl Into<String>,
    ) -> InvoiceResult<()> {
        self.put(document_id, item_number, ConditionEntry::Payload(body.into()))
    }

    /// Make the conditions fetch for one item fail with `reason`
    pub fn fail_conditions(
        &self,
        document_id: &str,
        item_number: &str,
        reason: impl Into<String>,
    ) -> InvoiceResult<()> {
        self.put(document_id, item_number, ConditionEntry::Failure(reason.into()))
    }

    /// Clear all data
    pub fn clear(&self) -> InvoiceResult<()> {
        self.documents
            .write()
            .map_err(|e| InvoiceError::Source(e.to_string()))?
            .clear();
        self.conditions
            .write()
            .map_err(|e| InvoiceError::Source(e.to_string()))?
            .clear();
        Ok(())
    }

    fn put(
        &self,
        document_id: &str,
        item_number: &str,
        entry: ConditionEntry,
    ) -> InvoiceResult<()> {
        self.conditions
            .write()
            .map_err(|e| InvoiceError::Source(e.to_string()))?
            .insert((document_id.to_string(), item_number.to_string()), entry);
        Ok(())
    }
}

#[async_trait]
impl BillingSource for MemoryBillingSource {
    async fn fetch_document(
        &self,
        document_id: &str,
    ) -> InvoiceResult<Option<(BillingDocument, Vec<LineItem>)>> {
        Ok(self
            .documents
            .read()
            .map_err(|e| InvoiceError::Source(e.to_string()))?
            .get(document_id)
            .cloned())
    }

    async fn fetch_pricing_conditions(
        &self,
        document_id: &str,
        item_number: &str,
    ) -> InvoiceResult<Vec<RawConditionRecord>> {
        let entry = self
            .conditions
            .read()
            .map_err(|e| InvoiceError::Source(e.to_string()))?
            .get(&(document_id.to_string(), item_number.to_string()))
            .cloned();

        match entry {
            None => Ok(Vec::new()),
            Some(ConditionEntry::Records(records)) => Ok(records),
            Some(ConditionEntry::Payload(body)) => parse_collection(&body),
            Some(ConditionEntry::Failure(reason)) => Err(InvoiceError::UpstreamFetch(reason)),
        }
    }
}
