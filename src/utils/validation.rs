//! Validation utilities

use crate::types::*;

/// Validate a billing document id before it is used in an upstream lookup
pub fn validate_document_id(document_id: &str) -> InvoiceResult<()> {
    if document_id.trim().is_empty() {
        return Err(InvoiceError::Validation(
            "Billing document ID cannot be empty".to_string(),
        ));
    }

    if document_id.len() > 10 {
        return Err(InvoiceError::Validation(
            "Billing document ID cannot exceed 10 characters".to_string(),
        ));
    }

    if !document_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(InvoiceError::Validation(
            "Billing document ID can only contain alphanumeric characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a zero-padded item number
pub fn validate_item_number(item_number: &str) -> InvoiceResult<()> {
    if item_number.is_empty() || item_number.len() > 6 {
        return Err(InvoiceError::Validation(format!(
            "Item number '{}' must have between 1 and 6 digits",
            item_number
        )));
    }

    if !item_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(InvoiceError::Validation(format!(
            "Item number '{}' must be numeric",
            item_number
        )));
    }

    Ok(())
}
