//! # Validation Utilities
//!
//! Input validation helpers for wallet forms and configuration.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate an EVM account address: `0x` followed by exactly 40 hex digits.
///
/// Checksum casing is not verified; wallets accept both forms.
pub fn validate_evm_address(address: &str) -> Result<(), String> {
    let hex = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| format!("Address must start with 0x: {}", address))?;

    if hex.len() != 40 {
        return Err(format!("Address must be 40 hex digits after 0x, got {}", hex.len()));
    }
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("Address contains non-hex characters: {}", address));
    }
    Ok(())
}

/// Validate a non-negative decimal amount such as `1`, `1.5` or `.25`.
///
/// Signs, exponents and thousands separators are rejected.
pub fn validate_decimal_amount(amount: &str) -> Result<(), String> {
    let amount = amount.trim();
    validate_not_empty(amount, "Amount")?;

    let mut parts = amount.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();

    if whole.is_empty() && fraction.is_empty() {
        return Err(format!("Invalid amount: {}", amount));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("Invalid amount: {}", amount));
    }
    Ok(())
}

/// Validate that a URL uses the http or https scheme.
pub fn validate_http_url(url: &str) -> Result<(), String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| format!("URL must use http or https: {}", url))?;

    if rest.is_empty() {
        return Err(format!("URL has no host: {}", url));
    }
    Ok(())
}
