//! # Base-Unit Arithmetic
//!
//! Conversions between display amounts (`"1.5"` BNB) and base units (wei),
//! done in 256-bit integers so no precision is lost to floating point.
//!
//! | Function | Direction |
//! |---|---|
//! | [`decimal_to_base_units`] | `"1.5"` → `1_500_000_000_000_000_000` |
//! | [`base_units_to_decimal`] | `1_500_000_000_000_000_000` → `"1.5"` |
//! | [`format_native`] | wei → fixed-precision display string |
//! | [`to_hex_quantity`] / [`parse_hex_quantity`] | wei ↔ JSON-RPC `0x` quantity |

pub use alloy_primitives::U256;

use crate::error::{Result, WalletError};

/// Decimals of every EVM native currency handled here.
pub const NATIVE_DECIMALS: usize = 18;

/// 10^18, one whole native unit in base units.
pub fn one_native_unit() -> U256 {
    U256::from(1_000_000_000_000_000_000u64)
}

/// Convert a decimal native amount to base units.
///
/// The fraction is right-padded to 18 digits; digits past the 18th are
/// truncated, never rounded. A missing whole part (`".5"`) counts as zero.
pub fn decimal_to_base_units(amount: &str) -> Result<U256> {
    let amount = amount.trim();
    lib_utils::validate_decimal_amount(amount).map_err(WalletError::InvalidAmount)?;

    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));

    let whole = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10).map_err(|e| WalletError::InvalidAmount(format!("{}: {}", amount, e)))?
    };

    let mut fraction: String = fraction.chars().take(NATIVE_DECIMALS).collect();
    while fraction.len() < NATIVE_DECIMALS {
        fraction.push('0');
    }
    let fraction = U256::from_str_radix(&fraction, 10)
        .map_err(|e| WalletError::InvalidAmount(format!("{}: {}", amount, e)))?;

    whole
        .checked_mul(one_native_unit())
        .and_then(|scaled| scaled.checked_add(fraction))
        .ok_or_else(|| WalletError::InvalidAmount(format!("{} overflows 256-bit base units", amount)))
}

/// Exact decimal rendering of a base-unit value, without trailing zeros.
pub fn base_units_to_decimal(value: U256) -> String {
    let unit = one_native_unit();
    let whole = value / unit;
    let fraction = value % unit;

    if fraction.is_zero() {
        return whole.to_string();
    }

    let fraction = format!("{:0>width$}", fraction.to_string(), width = NATIVE_DECIMALS);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

/// Render a base-unit value with exactly `precision` fractional digits.
///
/// Digits are cut, not rounded, matching what the wallet header shows.
pub fn format_native(value: U256, precision: usize) -> String {
    let unit = one_native_unit();
    let whole = value / unit;
    let fraction = format!("{:0>width$}", (value % unit).to_string(), width = NATIVE_DECIMALS);
    let precision = precision.min(NATIVE_DECIMALS);

    if precision == 0 {
        return whole.to_string();
    }
    format!("{}.{}", whole, &fraction[..precision])
}

/// JSON-RPC quantity encoding: `0x` + lowercase hex, no leading zeros.
pub fn to_hex_quantity(value: U256) -> String {
    format!("0x{:x}", value)
}

/// Parse a JSON-RPC hex quantity such as a balance returned by `eth_getBalance`.
pub fn parse_hex_quantity(value: &str) -> Result<U256> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| WalletError::Decoding(format!("Quantity must start with 0x: {}", value)))?;

    if digits.is_empty() {
        return Err(WalletError::Decoding(format!("Empty quantity: {}", value)));
    }
    U256::from_str_radix(digits, 16).map_err(|e| WalletError::Decoding(format!("Invalid quantity {}: {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(value: u128) -> U256 {
        U256::from(value)
    }

    #[test]
    fn test_decimal_to_base_units() {
        assert_eq!(decimal_to_base_units("1.5").unwrap(), wei(1_500_000_000_000_000_000));
        assert_eq!(decimal_to_base_units("0.000000000000000001").unwrap(), wei(1));
        assert_eq!(decimal_to_base_units("2").unwrap(), wei(2_000_000_000_000_000_000));
        assert_eq!(decimal_to_base_units(".25").unwrap(), wei(250_000_000_000_000_000));
        assert_eq!(decimal_to_base_units("0").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_decimal_to_base_units_truncates() {
        // 19th fractional digit is dropped, not rounded up
        assert_eq!(decimal_to_base_units("0.0000000000000000019").unwrap(), wei(1));
        assert_eq!(decimal_to_base_units("1.9999999999999999999").unwrap(), wei(1_999_999_999_999_999_999));
    }

    #[test]
    fn test_decimal_to_base_units_rejects_garbage() {
        for input in ["", ".", "-1", "1e3", "1,5", "abc", "1.2.3"] {
            assert!(
                matches!(decimal_to_base_units(input), Err(WalletError::InvalidAmount(_))),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn test_decimal_to_base_units_overflow() {
        let huge = "9".repeat(80);
        assert!(matches!(decimal_to_base_units(&huge), Err(WalletError::InvalidAmount(_))));
    }

    #[test]
    fn test_base_units_round_trip() {
        let samples = [
            U256::ZERO,
            wei(1),
            wei(999_999_999_999_999_999),
            wei(1_000_000_000_000_000_000),
            wei(1_500_000_000_000_000_000),
            wei(123_456_789_012_345_678_901_234_567),
            U256::MAX / one_native_unit() * one_native_unit(),
            U256::MAX,
        ];
        for value in samples {
            let rendered = base_units_to_decimal(value);
            assert_eq!(decimal_to_base_units(&rendered).unwrap(), value, "via {}", rendered);
        }
    }

    #[test]
    fn test_decimal_round_trip() {
        for input in ["1.5", "0.000000000000000001", "2", "42.123456789012345678", "0.1"] {
            let value = decimal_to_base_units(input).unwrap();
            assert_eq!(base_units_to_decimal(value), input);
        }
    }

    #[test]
    fn test_format_native() {
        assert_eq!(format_native(wei(1_500_000_000_000_000_000), 4), "1.5000");
        assert_eq!(format_native(wei(123_456_789_000_000_000), 4), "0.1234");
        assert_eq!(format_native(U256::ZERO, 4), "0.0000");
        assert_eq!(format_native(wei(7_000_000_000_000_000_000), 0), "7");
    }

    #[test]
    fn test_hex_quantity() {
        assert_eq!(to_hex_quantity(wei(1_500_000_000_000_000_000)), "0x14d1120d7b160000");
        assert_eq!(to_hex_quantity(U256::ZERO), "0x0");
        assert_eq!(parse_hex_quantity("0x14d1120d7b160000").unwrap(), wei(1_500_000_000_000_000_000));
        assert_eq!(parse_hex_quantity("0x0").unwrap(), U256::ZERO);
        assert_eq!(parse_hex_quantity("0X1A").unwrap(), wei(26));
        assert!(parse_hex_quantity("1234").is_err());
        assert!(parse_hex_quantity("0x").is_err());
        assert!(parse_hex_quantity("0xnothex").is_err());
    }
}
