//! OData response envelope unwrapping
//!
//! The billing system answers in either OData v2 (`{"d": {"results": [...]}}` for
//! collections, `{"d": {...}}` for entities) or v4 (`{"value": [...]}`) form.
//! These helpers accept all of them, plus bare JSON.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::types::{InvoiceError, InvoiceResult};

/// Parse a collection payload into typed records
pub fn parse_collection<T: DeserializeOwned>(body: &str) -> InvoiceResult<Vec<T>> {
    let value: Value = serde_json::from_str(body)?;
    let results = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => {
            if let Some(values) = map.remove("value") {
                values
            } else if let Some(d) = map.remove("d") {
                match d {
                    Value::Object(mut inner) => inner.remove("results").ok_or_else(|| {
                        InvoiceError::MalformedPayload(
                            "OData v2 envelope has no results array".to_string(),
                        )
                    })?,
                    Value::Array(_) => d,
                    _ => {
                        return Err(InvoiceError::MalformedPayload(
                            "OData v2 envelope is not an object".to_string(),
                        ))
                    }
                }
            } else {
                return Err(InvoiceError::MalformedPayload(
                    "expected a 'value' or 'd' envelope".to_string(),
                ));
            }
        }
        _ => {
            return Err(InvoiceError::MalformedPayload(
                "expected a JSON array or object".to_string(),
            ))
        }
    };

    Ok(serde_json::from_value(results)?)
}

/// Parse a single-entity payload
pub fn parse_entity<T: DeserializeOwned>(body: &str) -> InvoiceResult<T> {
    let value: Value = serde_json::from_str(body)?;
    let entity = match value {
        Value::Object(mut map) if map.contains_key("d") => map.remove("d").unwrap_or(Value::Null),
        other => other,
    };
    Ok(serde_json::from_value(entity)?)
}
