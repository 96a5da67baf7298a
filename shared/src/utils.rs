//! # Shared Utility Functions
//!
//! ## Address Formatting
//!
//! Functions for formatting EVM account addresses for display:
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - `0x` prefix plus 4 leading and 4 trailing hex digits
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0x8894E0a0c962CB723c1976a4421c95949bE2D4E3";
//! assert_eq!(format_address(address, 6, 4), "0x8894...D4E3");
//! ```

/// Format an address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x8894E0a0c962CB723c1976a4421c95949bE2D4E3";
/// assert_eq!(format_address(addr, 6, 4), "0x8894...D4E3");
/// assert_eq!(format_address("0x1234", 6, 4), "0x1234");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len || !address.is_ascii() {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format an address the way the dashboard header shows it (`0x1234...abcd`).
///
/// Addresses without a `0x` prefix keep four leading characters.
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// assert_eq!(truncate_address("0x8894E0a0c962CB723c1976a4421c95949bE2D4E3"), "0x8894...D4E3");
/// ```
pub fn truncate_address(address: &str) -> String {
    if address.starts_with("0x") {
        format_address(address, 6, 4)
    } else {
        format_address(address, 4, 4)
    }
}
