//! Decimal string <-> base unit conversion
//!
//! All comparisons between user input and on-chain values happen in base
//! units. The scale always comes from the token's own `decimals()`.

use thiserror::Error;

use crate::BaseUnits;

/// Largest decimals value whose scale factor fits in a `u128`
pub const MAX_DECIMALS: u8 = 38;

/// Errors from parsing a human-readable amount
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,
    #[error("Invalid character '{0}' in amount")]
    InvalidCharacter(char),
    #[error("Too many decimal places: token supports {max}, got {found}")]
    TooManyDecimals { max: u8, found: usize },
    #[error("Amount is too large")]
    Overflow,
    #[error("Unsupported token decimals: {0}")]
    DecimalsOutOfRange(u8),
}

/// 10^decimals, or an error when it would not fit in a u128
pub fn scale_factor(decimals: u8) -> Result<BaseUnits, AmountError> {
    if decimals > MAX_DECIMALS {
        return Err(AmountError::DecimalsOutOfRange(decimals));
    }
    Ok(10u128.pow(decimals as u32))
}

/// Convert a decimal string (e.g. `"1.5"`) to base units.
///
/// Accepts an optional fractional part (`".5"` and `"1."` are valid).
/// Signs, exponents and thousands separators are rejected, as is any
/// fraction longer than `decimals`.
pub fn to_base_units(amount: &str, decimals: u8) -> Result<BaseUnits, AmountError> {
    let scale = scale_factor(decimals)?;
    let (whole, fraction) = split_amount(amount)?;

    if fraction.len() > decimals as usize {
        return Err(AmountError::TooManyDecimals {
            max: decimals,
            found: fraction.len(),
        });
    }

    let whole_units = parse_digits(whole)?
        .checked_mul(scale)
        .ok_or(AmountError::Overflow)?;

    // Right-pad the fraction to `decimals` digits: "5" at 3 decimals -> 500
    let fraction_units = parse_digits(fraction)?
        .checked_mul(10u128.pow((decimals as usize - fraction.len()) as u32))
        .ok_or(AmountError::Overflow)?;

    whole_units
        .checked_add(fraction_units)
        .ok_or(AmountError::Overflow)
}

/// Check that `amount` is a well-formed decimal string, independent of any
/// token's precision or the size of the result.
pub fn validate_amount(amount: &str) -> Result<(), AmountError> {
    split_amount(amount).map(|_| ())
}

/// Split into whole and fractional digits, rejecting anything but digits
/// around at most one point
fn split_amount(amount: &str) -> Result<(&str, &str), AmountError> {
    let amount = amount.trim();

    let (whole, fraction) = match amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (amount, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(AmountError::Empty);
    }

    if let Some(c) = whole
        .chars()
        .chain(fraction.chars())
        .find(|c| !c.is_ascii_digit())
    {
        return Err(AmountError::InvalidCharacter(c));
    }

    Ok((whole, fraction))
}

/// Format base units as a decimal string, trimming trailing fractional zeros.
///
/// Decimals above [`MAX_DECIMALS`] are clamped.
pub fn format_base_units(value: BaseUnits, decimals: u8) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    if decimals == 0 {
        return value.to_string();
    }

    let scale = 10u128.pow(decimals as u32);
    let whole = value / scale;
    let fraction = value % scale;

    if fraction == 0 {
        return whole.to_string();
    }

    let fraction = format!("{:0width$}", fraction, width = decimals as usize);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

fn parse_digits(digits: &str) -> Result<BaseUnits, AmountError> {
    if digits.is_empty() {
        return Ok(0);
    }
    digits.parse::<BaseUnits>().map_err(|_| AmountError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ETHER: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_whole_and_fractional_amounts() {
        assert_eq!(to_base_units("1", 18).unwrap(), ONE_ETHER);
        assert_eq!(to_base_units("1.5", 18).unwrap(), ONE_ETHER + ONE_ETHER / 2);
        assert_eq!(to_base_units(".5", 6).unwrap(), 500_000);
        assert_eq!(to_base_units("2.", 6).unwrap(), 2_000_000);
        assert_eq!(to_base_units(" 0.000001 ", 6).unwrap(), 1);
        assert_eq!(to_base_units("42", 0).unwrap(), 42);
    }

    #[test]
    fn test_decimals_come_from_token() {
        // Same input, different token precision
        assert_eq!(to_base_units("1", 6).unwrap(), 1_000_000);
        assert_eq!(to_base_units("1", 8).unwrap(), 100_000_000);
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert_eq!(to_base_units("", 18), Err(AmountError::Empty));
        assert_eq!(to_base_units(".", 18), Err(AmountError::Empty));
        assert_eq!(to_base_units("-1", 18), Err(AmountError::InvalidCharacter('-')));
        assert_eq!(to_base_units("1e18", 18), Err(AmountError::InvalidCharacter('e')));
        assert_eq!(to_base_units("1.2.3", 18), Err(AmountError::InvalidCharacter('.')));
        assert_eq!(to_base_units("1,000", 18), Err(AmountError::InvalidCharacter(',')));
    }

    #[test]
    fn test_rejects_excess_precision() {
        assert_eq!(
            to_base_units("0.1234567", 6),
            Err(AmountError::TooManyDecimals { max: 6, found: 7 })
        );
        assert!(to_base_units("1.5", 0).is_err());
    }

    #[test]
    fn test_overflow_and_decimals_range() {
        assert_eq!(
            to_base_units("340282366920938463463374607431768211456", 0),
            Err(AmountError::Overflow)
        );
        assert_eq!(to_base_units("1000", 38), Err(AmountError::Overflow));
        assert_eq!(to_base_units("1", 39), Err(AmountError::DecimalsOutOfRange(39)));
    }

    #[test]
    fn test_validate_amount_ignores_magnitude() {
        assert_eq!(validate_amount("4"), Ok(()));
        assert_eq!(validate_amount("1000"), Ok(()));
        assert_eq!(validate_amount("123456789012345678901234567890.5"), Ok(()));
        assert_eq!(validate_amount("0.000000000000000000001"), Ok(()));
        assert_eq!(validate_amount(" "), Err(AmountError::Empty));
        assert_eq!(validate_amount("1e18"), Err(AmountError::InvalidCharacter('e')));
        assert_eq!(validate_amount("-4"), Err(AmountError::InvalidCharacter('-')));
    }

    #[test]
    fn test_format_base_units() {
        assert_eq!(format_base_units(ONE_ETHER + ONE_ETHER / 2, 18), "1.5");
        assert_eq!(format_base_units(3 * ONE_ETHER, 18), "3");
        assert_eq!(format_base_units(1, 6), "0.000001");
        assert_eq!(format_base_units(0, 18), "0");
        assert_eq!(format_base_units(1234, 0), "1234");
    }

    #[test]
    fn test_format_parses_back() {
        let raw = 123_456_789_000u128;
        let shown = format_base_units(raw, 9);
        assert_eq!(shown, "123.456789");
        assert_eq!(to_base_units(&shown, 9).unwrap(), raw);
    }
}
