//! Money helpers
//!
//! Operators type decimal amounts ("100", "12.5", "-3.25"); the engine works
//! in integer cents so that transfers never accumulate rounding error and
//! the conservation invariant can be checked with `==`.
//!
//! CRITICAL: All money values are i64 (cents)

use thiserror::Error;

/// Number of cents in one whole currency unit
pub const CENTS_PER_UNIT: i64 = 100;

/// Errors that can occur while parsing a decimal amount
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,

    #[error("Amount '{0}' is not a decimal number")]
    NotANumber(String),

    #[error("Amount '{0}' has more than two decimal places")]
    TooPrecise(String),

    #[error("Amount '{0}' is out of range")]
    OutOfRange(String),
}

/// Parse a decimal amount into cents
///
/// Accepts an optional sign, an integer part and at most two fractional
/// digits. Surrounding whitespace is ignored.
///
/// # Example
/// ```
/// use bank_transfer_core::models::money::parse_amount;
///
/// assert_eq!(parse_amount("100").unwrap(), 10_000);
/// assert_eq!(parse_amount("12.5").unwrap(), 1_250);
/// assert_eq!(parse_amount("-0.07").unwrap(), -7);
/// assert!(parse_amount("1.234").is_err());
/// ```
pub fn parse_amount(input: &str) -> Result<i64, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    let (negative, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(AmountError::NotANumber(trimmed.to_string()));
    }
    if fraction.len() > 2 {
        return Err(AmountError::TooPrecise(trimmed.to_string()));
    }

    let out_of_range = || AmountError::OutOfRange(trimmed.to_string());

    let units: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| out_of_range())?
    };
    // "5" -> 50 cents when written as "0.5"
    let cents: i64 = match fraction.len() {
        0 => 0,
        1 => i64::from(fraction.as_bytes()[0] - b'0') * 10,
        _ => fraction.parse().map_err(|_| out_of_range())?,
    };

    let magnitude = units
        .checked_mul(CENTS_PER_UNIT)
        .and_then(|v| v.checked_add(cents))
        .ok_or_else(out_of_range)?;

    Ok(if negative { -magnitude } else { magnitude })
}

/// Format cents as a decimal with exactly two fractional digits
///
/// # Example
/// ```
/// use bank_transfer_core::models::money::format_amount;
///
/// assert_eq!(format_amount(10_000), "100.00");
/// assert_eq!(format_amount(-7), "-0.07");
/// ```
pub fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    let per_unit = CENTS_PER_UNIT as u64;
    format!("{}{}.{:02}", sign, magnitude / per_unit, magnitude % per_unit)
}
