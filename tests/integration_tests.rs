//! Integration tests for gst-invoice-core

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use gst_invoice_core::{
    utils::MemoryBillingSource, BillingDocument, InvoiceAggregator, InvoiceError,
    InvoiceSettings, LineItem, Party, PartyTaxNumber, RawConditionRecord,
};
use std::str::FromStr;

fn item(id: &str, description: &str, quantity: i64, net: &str) -> LineItem {
    LineItem::new(
        id,
        description,
        BigDecimal::from(quantity),
        "EA",
        BigDecimal::from_str(net).unwrap(),
    )
}

fn igst(rate: i64) -> RawConditionRecord {
    RawConditionRecord::with_rate("JOIG", BigDecimal::from(rate))
}

#[tokio::test]
async fn test_complete_invoice_preview() {
    let source = MemoryBillingSource::new();
    source
        .insert_document(
            BillingDocument::new("90000012"),
            vec![
                item("10", "Copper wire", 10, "1000"),
                item("20", "Insulation tape", 4, "1000"),
            ],
        )
        .unwrap();
    source
        .insert_conditions(
            "90000012",
            "000010",
            vec![
                RawConditionRecord::new("ZFRE", BigDecimal::from(50), BigDecimal::from(50)),
                igst(18),
            ],
        )
        .unwrap();
    source
        .insert_conditions(
            "90000012",
            "000020",
            vec![
                RawConditionRecord::with_amount("ZDIS", BigDecimal::from(-100)),
                igst(18),
            ],
        )
        .unwrap();

    let aggregator = InvoiceAggregator::new(source);
    let preview = aggregator.preview("90000012").await.unwrap();

    assert_eq!(preview.lines.len(), 2);
    assert!(!preview.is_degraded());

    let first = &preview.lines[0];
    assert_eq!(first.item.item_id, "10");
    assert_eq!(first.unit_rate, BigDecimal::from(100));
    assert_eq!(first.breakdown.taxable_amount, BigDecimal::from(1050));
    assert_eq!(first.breakdown.igst.amount, BigDecimal::from(189));
    assert_eq!(first.breakdown.grand_total, BigDecimal::from(1239));

    let second = &preview.lines[1];
    assert_eq!(second.breakdown.taxable_amount, BigDecimal::from(900));
    assert_eq!(second.breakdown.grand_total, BigDecimal::from(1062));

    assert_eq!(preview.totals.overall_grand_total, BigDecimal::from(2301));
    assert_eq!(preview.totals.overall_gst, BigDecimal::from(351));
    assert_eq!(preview.totals.grand_total_in_words, "Two Thousand Three Hundred One Rupees Only");

    // Every line carries the document totals
    for line in &preview.lines {
        assert_eq!(line.totals, preview.totals);
    }
}

#[tokio::test]
async fn test_failed_item_is_isolated() {
    let source = MemoryBillingSource::new();
    source
        .insert_document(
            BillingDocument::new("90000013"),
            vec![
                item("10", "Item one", 1, "1000"),
                item("20", "Item two", 1, "500"),
                item("30", "Item three", 1, "200"),
            ],
        )
        .unwrap();
    source
        .insert_conditions("90000013", "000010", vec![igst(18)])
        .unwrap();
    source
        .fail_conditions("90000013", "000020", "503 Service Unavailable")
        .unwrap();
    source
        .insert_conditions("90000013", "000030", vec![igst(5)])
        .unwrap();

    let preview = InvoiceAggregator::new(source)
        .preview("90000013")
        .await
        .unwrap();

    let lines: Vec<_> = preview.breakdowns().collect();
    assert_eq!(lines.len(), 3);

    assert!(!lines[0].degraded);
    assert_eq!(lines[0].grand_total, BigDecimal::from(1180));

    assert!(lines[1].degraded);
    assert_eq!(lines[1].taxable_amount, BigDecimal::from(500));
    assert!(lines[1].total_tax_amount.is_zero());
    assert_eq!(lines[1].grand_total, BigDecimal::from(500));

    assert!(!lines[2].degraded);
    assert_eq!(lines[2].grand_total, BigDecimal::from(210));

    assert!(preview.is_degraded());
    assert_eq!(preview.totals.degraded_items, 1);
    assert_eq!(preview.totals.overall_grand_total, BigDecimal::from(1890));
}

#[tokio::test]
async fn test_malformed_payload_degrades_item() {
    let source = MemoryBillingSource::new();
    source
        .insert_document(
            BillingDocument::new("90000014"),
            vec![item("10", "Item", 1, "100"), item("20", "Item", 1, "100")],
        )
        .unwrap();
    source
        .insert_conditions_payload(
            "90000014",
            "000010",
            r#"{"d":{"results":[
                {"ConditionType":"JOCG","ConditionRateValue":"9.000","ConditionAmount":"9.00"},
                {"ConditionType":"JOSG","ConditionRateValue":"9.000","ConditionAmount":"9.00"},
                {"ConditionType":"PR00","ConditionRateValue":"100.00","ConditionAmount":"100.00"}
            ]}}"#,
        )
        .unwrap();
    source
        .insert_conditions_payload("90000014", "000020", "upstream exploded")
        .unwrap();

    let preview = InvoiceAggregator::new(source)
        .preview("90000014")
        .await
        .unwrap();

    assert_eq!(preview.lines[0].breakdown.cgst.amount, BigDecimal::from(9));
    assert_eq!(preview.lines[0].breakdown.sgst.amount, BigDecimal::from(9));
    assert_eq!(preview.lines[0].breakdown.grand_total, BigDecimal::from(118));
    assert!(preview.lines[1].breakdown.degraded);
    assert_eq!(preview.totals.overall_grand_total, BigDecimal::from(218));
    assert_eq!(preview.totals.gst_in_words, "Eighteen Rupees Only");
}

#[tokio::test]
async fn test_missing_document() {
    let aggregator = InvoiceAggregator::new(MemoryBillingSource::new());

    let err = aggregator.preview("90009999").await.unwrap_err();
    assert!(matches!(err, InvoiceError::DocumentNotFound(id) if id == "90009999"));

    let err = aggregator.preview("").await.unwrap_err();
    assert!(matches!(err, InvoiceError::Validation(_)));
}

#[tokio::test]
async fn test_document_without_items() {
    let source = MemoryBillingSource::new();
    source
        .insert_document(BillingDocument::new("90000015"), Vec::new())
        .unwrap();

    let preview = InvoiceAggregator::new(source)
        .preview("90000015")
        .await
        .unwrap();

    assert!(preview.lines.is_empty());
    assert!(preview.totals.overall_grand_total.is_zero());
    assert_eq!(preview.totals.gst_in_words, "Zero Rupees Only");
    assert_eq!(preview.totals.grand_total_in_words, "Zero Rupees Only");
}

#[tokio::test]
async fn test_custom_settings() {
    let source = MemoryBillingSource::new();
    let document = BillingDocument::new("90000016");
    source
        .insert_conditions("90000016", "0010", vec![igst(10)])
        .unwrap();

    let settings = InvoiceSettings {
        item_number_width: 4,
        ..InvoiceSettings::default()
    }
    .with_unit_label("Only");
    let aggregator = InvoiceAggregator::with_settings(source, settings);

    let preview = aggregator
        .aggregate(document, vec![item("10", "Item", 1, "100000")])
        .await;

    assert_eq!(preview.totals.overall_grand_total, BigDecimal::from(110000));
    assert_eq!(preview.totals.grand_total_in_words, "One Lakh Ten Thousand Only");
    assert_eq!(preview.totals.gst_in_words, "Ten Thousand Only");
}

#[tokio::test]
async fn test_preview_serializes_flat_lines() {
    let source = MemoryBillingSource::new();
    source
        .insert_document(
            BillingDocument::new("90000017"),
            vec![item("10", "Item", 1, "1000")],
        )
        .unwrap();
    source
        .insert_conditions("90000017", "000010", vec![igst(18)])
        .unwrap();

    let preview = InvoiceAggregator::new(source)
        .preview("90000017")
        .await
        .unwrap();
    let json = serde_json::to_value(&preview).unwrap();

    let line = &json["lines"][0];
    assert!(line.get("grand_total").is_some());
    assert!(line.get("overall_grand_total").is_some());
    assert!(line.get("grand_total_in_words").is_some());
    assert_eq!(line["item"]["BillingDocumentItem"], "10");
}

#[tokio::test]
async fn test_header_and_parties_pass_through() {
    let buyer = Party::new("17100001", "Shree Traders").with_tax_numbers(&[
        PartyTaxNumber {
            tax_type: "IN0".to_string(),
            tax_number: "AAACS1234F".to_string(),
        },
        PartyTaxNumber {
            tax_type: "IN3".to_string(),
            tax_number: "27AAACS1234F1Z5".to_string(),
        },
    ]);
    let consignee = Party {
        city: Some("Pune".to_string()),
        ..Party::new("17100002", "Shree Traders Warehouse")
    };

    let mut document = BillingDocument::new("90000018")
        .with_buyer(buyer)
        .with_consignee(consignee)
        .with_seller_gstin("29AABCU9603R1ZM");
    document.document_category = Some("M".to_string());
    document.destination_country = Some("IN".to_string());
    document.payment_terms = Some("NT30".to_string());
    document.payment_terms_name = Some("Net 30 days".to_string());
    document.customer_po_number = Some("PO-4471".to_string());
    document.customer_po_date = NaiveDate::from_ymd_opt(2024, 3, 5);

    let source = MemoryBillingSource::new();
    source
        .insert_document(document, vec![item("10", "Item", 1, "100")])
        .unwrap();

    let preview = InvoiceAggregator::new(source)
        .preview("90000018")
        .await
        .unwrap();
    let header = &preview.document;

    assert_eq!(header.seller_gstin.as_deref(), Some("29AABCU9603R1ZM"));
    assert_eq!(header.payment_terms_name.as_deref(), Some("Net 30 days"));
    assert_eq!(header.customer_po_number.as_deref(), Some("PO-4471"));
    assert_eq!(header.customer_po_date, NaiveDate::from_ymd_opt(2024, 3, 5));
    assert_eq!(header.document_category.as_deref(), Some("M"));
    assert_eq!(header.destination_country.as_deref(), Some("IN"));

    let buyer = header.buyer.as_ref().unwrap();
    assert_eq!(buyer.gstin.as_deref(), Some("27AAACS1234F1Z5"));
    let consignee = header.consignee.as_ref().unwrap();
    assert_eq!(consignee.city.as_deref(), Some("Pune"));
    assert!(consignee.gstin.is_none());

    let json = serde_json::to_value(&preview).unwrap();
    assert_eq!(json["document"]["Buyer"]["GSTIN"], "27AAACS1234F1Z5");
    assert_eq!(json["document"]["PurchaseOrderByCustomer"], "PO-4471");
}
