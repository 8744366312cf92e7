use crate::utils::error::{CostError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(CostError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CostError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(CostError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CostError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Reference amounts must be finite and non-negative.
pub fn validate_amount(table: &str, key: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(CostError::InvalidReferenceData {
            table: table.to_string(),
            key: key.to_string(),
            reason: format!("amount {} is not a finite number", amount),
        });
    }
    if amount < 0.0 {
        return Err(CostError::InvalidReferenceData {
            table: table.to_string(),
            key: key.to_string(),
            reason: format!("amount {} is negative", amount),
        });
    }
    Ok(())
}

/// Normalizes free-form income text into a number.
///
/// Anything that does not parse as a finite number becomes `None`. Currency
/// symbols, thousands separators and surrounding whitespace are ignored, so
/// `"£2,200"` and `" 2200 "` both yield `Some(2200.0)`. Zero and negative
/// values are returned as-is; deciding what they mean is the engine's job.
pub fn normalize_income(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '£' | '$' | '€' | ',' | '_') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
