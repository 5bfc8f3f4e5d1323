use crate::error::ValidationError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ValidationError::MissingField("amount"));
    }
    let value = Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;
    if value <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(value)
}

// The gateway only accepts `.` with two digits, whatever the currency's locale.
pub fn format_total(total: Decimal) -> String {
    let mut rounded = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

pub fn normalize_currency(raw: &str) -> Result<String, ValidationError> {
    let code = raw.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidCurrency(raw.to_string()));
    }
    Ok(code.to_ascii_uppercase())
}
