//! Core types and data structures for invoice aggregation

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::utils::sap_date::parse_sap_date;

/// One pricing-condition line from the upstream pricing engine
///
/// Numeric fields are always populated: absent or `null` values in the upstream
/// payload become zero here, so downstream arithmetic never has to guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawConditionRecord {
    /// Condition-type code (e.g. "ZFRE", "JOIG")
    #[serde(rename = "ConditionType", default)]
    pub condition_type: String,
    /// Percentage or per-unit rate
    #[serde(
        rename = "ConditionRateValue",
        default,
        deserialize_with = "decimal_or_zero"
    )]
    pub condition_rate_value: BigDecimal,
    /// Absolute currency amount
    #[serde(
        rename = "ConditionAmount",
        default,
        deserialize_with = "decimal_or_zero"
    )]
    pub condition_amount: BigDecimal,
}

impl RawConditionRecord {
    /// Create a new condition record
    pub fn new(
        condition_type: impl Into<String>,
        condition_rate_value: BigDecimal,
        condition_amount: BigDecimal,
    ) -> Self {
        Self {
            condition_type: condition_type.into(),
            condition_rate_value,
            condition_amount,
        }
    }

    /// Create a record that only carries a rate
    pub fn with_rate(condition_type: impl Into<String>, rate: BigDecimal) -> Self {
        Self::new(condition_type, rate, BigDecimal::zero())
    }

    /// Create a record that only carries an amount
    pub fn with_amount(condition_type: impl Into<String>, amount: BigDecimal) -> Self {
        Self::new(condition_type, BigDecimal::zero(), amount)
    }
}

/// One billing-document line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item number as issued by the billing system (e.g. "10")
    #[serde(rename = "BillingDocumentItem")]
    pub item_id: String,
    /// Item text
    #[serde(rename = "BillingDocumentItemText", default)]
    pub description: String,
    /// Billed quantity
    #[serde(
        rename = "BillingQuantity",
        default,
        deserialize_with = "decimal_or_zero"
    )]
    pub quantity: BigDecimal,
    /// Unit of measure
    #[serde(
        rename = "BillingQuantityUnit",
        alias = "BillingQuantityUnitSAPCode",
        default
    )]
    pub unit: String,
    /// Base sale amount before additive charges and taxes
    #[serde(rename = "NetAmount", default, deserialize_with = "decimal_or_zero")]
    pub net_amount: BigDecimal,
    /// HSN classification code, passed through for display
    #[serde(rename = "HSN", default, skip_serializing_if = "Option::is_none")]
    pub hsn: Option<String>,
    /// Batch reference, passed through for display
    #[serde(rename = "Batch", default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
}

impl LineItem {
    /// Create a new line item
    pub fn new(
        item_id: impl Into<String>,
        description: impl Into<String>,
        quantity: BigDecimal,
        unit: impl Into<String>,
        net_amount: BigDecimal,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            description: description.into(),
            quantity,
            unit: unit.into(),
            net_amount,
            hsn: None,
            batch: None,
        }
    }

    /// Attach an HSN code
    pub fn with_hsn(mut self, hsn: impl Into<String>) -> Self {
        self.hsn = Some(hsn.into());
        self
    }

    /// Net amount per unit, zero when nothing was billed
    pub fn unit_rate(&self) -> BigDecimal {
        if self.quantity.is_zero() {
            BigDecimal::zero()
        } else {
            &self.net_amount / &self.quantity
        }
    }

    /// Item number left-padded with zeros, as the pricing-conditions endpoint keys it
    pub fn item_number(&self, width: usize) -> String {
        format!("{:0>width$}", self.item_id.trim(), width = width)
    }
}

/// Billing document header
///
/// Pass-through data for the rendered invoice; none of it feeds the tax arithmetic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BillingDocument {
    #[serde(rename = "BillingDocument")]
    pub id: String,
    #[serde(rename = "BillingDocumentType", default)]
    pub document_type: Option<String>,
    #[serde(rename = "BillingDocumentDate", default, deserialize_with = "sap_date")]
    pub billing_date: Option<NaiveDate>,
    /// Invoice date; the billing system stamps it at creation
    #[serde(rename = "CreationDate", default, deserialize_with = "sap_date")]
    pub invoice_date: Option<NaiveDate>,
    #[serde(rename = "CompanyCode", default)]
    pub company_code: Option<String>,
    #[serde(rename = "FiscalYear", default)]
    pub fiscal_year: Option<String>,
    #[serde(rename = "SalesOrganization", default)]
    pub sales_organization: Option<String>,
    #[serde(rename = "DistributionChannel", default)]
    pub distribution_channel: Option<String>,
    #[serde(rename = "Division", default)]
    pub division: Option<String>,
    #[serde(rename = "SoldToParty", default)]
    pub sold_to_party: Option<String>,
    #[serde(rename = "CustomerPaymentTerms", default)]
    pub payment_terms: Option<String>,
    #[serde(rename = "YY1_VehicleNo2_BDH", default)]
    pub vehicle_number: Option<String>,
    #[serde(rename = "SDDocumentCategory", default)]
    pub document_category: Option<String>,
    #[serde(rename = "Country", default)]
    pub destination_country: Option<String>,
    /// Description of `payment_terms`, looked up separately
    #[serde(rename = "PaymentTermsName", default)]
    pub payment_terms_name: Option<String>,
    /// Customer purchase order from the referenced sales order
    #[serde(rename = "PurchaseOrderByCustomer", default)]
    pub customer_po_number: Option<String>,
    #[serde(rename = "CustomerPurchaseOrderDate", default, deserialize_with = "sap_date")]
    pub customer_po_date: Option<NaiveDate>,
    /// GSTIN registered for the shipping plant's business place
    #[serde(rename = "SellerGSTIN", default)]
    pub seller_gstin: Option<String>,
    /// Sold-to party
    #[serde(rename = "Buyer", default)]
    pub buyer: Option<Party>,
    /// Ship-to party
    #[serde(rename = "Consignee", default)]
    pub consignee: Option<Party>,
}

impl BillingDocument {
    /// Create a header with only the document id set
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Attach the sold-to party
    pub fn with_buyer(mut self, buyer: Party) -> Self {
        self.buyer = Some(buyer);
        self
    }

    /// Attach the ship-to party
    pub fn with_consignee(mut self, consignee: Party) -> Self {
        self.consignee = Some(consignee);
        self
    }

    /// Attach the seller's GSTIN
    pub fn with_seller_gstin(mut self, gstin: impl Into<String>) -> Self {
        self.seller_gstin = Some(gstin.into());
        self
    }
}

/// Business partner printed on the invoice as buyer or consignee
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Party {
    #[serde(rename = "BusinessPartner")]
    pub id: String,
    #[serde(rename = "FullName", default)]
    pub full_name: Option<String>,
    #[serde(rename = "HouseNumber", default)]
    pub house_number: Option<String>,
    #[serde(rename = "StreetName", default)]
    pub street_name: Option<String>,
    #[serde(rename = "CityName", default)]
    pub city: Option<String>,
    #[serde(rename = "CompanyPostalCode", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
    #[serde(rename = "GSTIN", default)]
    pub gstin: Option<String>,
}

impl Party {
    /// Create a party with only the business-partner id and name set
    pub fn new(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: Some(full_name.into()),
            ..Default::default()
        }
    }

    /// Take the GSTIN from the partner's tax numbers, if one is registered
    pub fn with_tax_numbers(mut self, tax_numbers: &[PartyTaxNumber]) -> Self {
        self.gstin = tax_numbers
            .iter()
            .find(|t| t.is_gstin())
            .map(|t| t.tax_number.clone());
        self
    }
}

/// One tax registration of a business partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyTaxNumber {
    /// Tax-number category; "IN3" is the Indian GSTIN
    #[serde(rename = "BPTaxType")]
    pub tax_type: String,
    #[serde(rename = "BPTaxNumber", default)]
    pub tax_number: String,
}

impl PartyTaxNumber {
    pub fn is_gstin(&self) -> bool {
        self.tax_type == "IN3" && !self.tax_number.trim().is_empty()
    }
}

/// Decimal as the upstream sends it: OData v2 quotes it, v4 emits a bare number
#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalInput {
    Text(String),
    Number(serde_json::Number),
}

/// Parse a decimal from its textual form so no binary floating point is involved
fn decimal_or_zero<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<DecimalInput>::deserialize(deserializer)? {
        None => return Ok(BigDecimal::zero()),
        Some(DecimalInput::Text(text)) => text,
        Some(DecimalInput::Number(number)) => number.to_string(),
    };

    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(BigDecimal::zero());
    }
    BigDecimal::from_str(raw).map_err(serde::de::Error::custom)
}

fn sap_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_sap_date))
}

/// Errors that can occur while building an invoice preview
#[derive(Debug, thiserror::Error)]
pub enum InvoiceError {
    #[error("Billing document not found: {0}")]
    DocumentNotFound(String),
    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(String),
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Source error: {0}")]
    Source(String),
}

impl From<serde_json::Error> for InvoiceError {
    fn from(err: serde_json::Error) -> Self {
        InvoiceError::MalformedPayload(err.to_string())
    }
}

/// Result type for invoice operations
pub type InvoiceResult<T> = Result<T, InvoiceError>;
