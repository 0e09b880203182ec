//! SAP date parsing

use chrono::{DateTime, NaiveDate};

/// Parse a date as the billing system emits it
///
/// Accepts `YYYYMMDD`, the OData v2 JSON form `/Date(<millis>)/` (optionally
/// with a `+0000` offset suffix) and ISO `YYYY-MM-DD`. Anything else yields `None`.
pub fn parse_sap_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::parse_from_str(raw, "%Y%m%d").ok();
    }

    if let Some(inner) = raw
        .strip_prefix("/Date(")
        .and_then(|rest| rest.strip_suffix(")/"))
    {
        let millis = inner
            .split(|c| c == '+' || c == '-')
            .find(|part| !part.is_empty())?;
        let millis: i64 = millis.parse().ok()?;
        let millis = if inner.starts_with('-') { -millis } else { millis };
        return DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
