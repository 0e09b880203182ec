//! Invoice preview walkthrough against the in-memory billing source

use bigdecimal::BigDecimal;
use gst_invoice_core::{
    utils::MemoryBillingSource, BillingDocument, InvoiceAggregator, LineItem, RawConditionRecord,
};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("🧾 GST Invoice Core - Invoice Preview\n");

    let source = MemoryBillingSource::new();
    source.insert_document(
        BillingDocument::new("90000042"),
        vec![
            LineItem::new(
                "10",
                "MS Angle 50x50",
                BigDecimal::from(20),
                "KG",
                BigDecimal::from(12500),
            )
            .with_hsn("7216"),
            LineItem::new(
                "20",
                "GI Sheet 0.8mm",
                BigDecimal::from(5),
                "EA",
                BigDecimal::from(4200),
            )
            .with_hsn("7210"),
            LineItem::new(
                "30",
                "Fasteners kit",
                BigDecimal::from(1),
                "SET",
                BigDecimal::from(900),
            ),
        ],
    )?;

    // Intra-state supply with freight and a discount
    source.insert_conditions(
        "90000042",
        "000010",
        vec![
            RawConditionRecord::new("ZFRE", BigDecimal::from(350), BigDecimal::from(350)),
            RawConditionRecord::with_amount("ZDIS", BigDecimal::from(-250)),
            RawConditionRecord::with_rate("JOCG", BigDecimal::from(9)),
            RawConditionRecord::with_rate("JOSG", BigDecimal::from(9)),
            RawConditionRecord::with_amount("ZROF", BigDecimal::from_str("0.32")?),
        ],
    )?;
    source.insert_conditions_payload(
        "90000042",
        "000020",
        r#"{"d":{"results":[
            {"ConditionType":"ZPAC","ConditionRateValue":"120.00","ConditionAmount":"120.00"},
            {"ConditionType":"JOCG","ConditionRateValue":"9.000"},
            {"ConditionType":"JOSG","ConditionRateValue":"9.000"}
        ]}}"#,
    )?;
    // Item 30's lookup fails and falls back to zero tax
    source.fail_conditions("90000042", "000030", "gateway timeout")?;

    let aggregator = InvoiceAggregator::new(source);
    let preview = aggregator.preview("90000042").await?;

    for line in &preview.lines {
        let b = &line.breakdown;
        println!(
            "  Item {:>3} {:<18} taxable ₹{:>10} CGST ₹{:>8} SGST ₹{:>8} total ₹{:>10}{}",
            line.item.item_id,
            line.item.description,
            b.taxable_amount.round(2),
            b.cgst.amount.round(2),
            b.sgst.amount.round(2),
            b.grand_total.round(2),
            if b.degraded { "  (no tax data)" } else { "" }
        );
    }
    println!();

    let totals = &preview.totals;
    println!("  Taxable:     ₹{}", totals.overall_taxable_amount.round(2));
    println!("  Total GST:   ₹{}", totals.overall_gst.round(2));
    println!("  Round-off:   ₹{}", totals.total_round_off.round(2));
    println!("  Grand Total: ₹{}", totals.overall_grand_total.round(2));
    println!("  GST in words:         {}", totals.gst_in_words);
    println!("  Grand total in words: {}", totals.grand_total_in_words);
    println!();

    println!("{}", serde_json::to_string_pretty(&preview.totals)?);

    Ok(())
}
