//! Amount parsing for user input
//!
//! Amounts arrive as free text from chat messages. Both decimal comma
//! and decimal point are accepted; the value must be strictly positive.

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};

/// Parse a user-supplied amount string into a positive decimal.
pub fn parse_amount(input: &str) -> CoreResult<Decimal> {
    let normalized = input.trim().replace(',', ".");
    let value: Decimal = normalized.parse().map_err(|_| CoreError::InvalidAmount {
        input: input.to_string(),
    })?;
    if value <= Decimal::ZERO {
        return Err(CoreError::InvalidAmount {
            input: input.to_string(),
        });
    }
    Ok(value)
}

/// Format an amount the way it is stored and displayed, two decimal places.
pub fn format_amount(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}
