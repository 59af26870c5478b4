use alloy::primitives::U256;
use chrono::DateTime;

/// Base-unit decimals of the native currency (wei per ether = 10^18)
pub const NATIVE_DECIMALS: u8 = 18;

/// Truncate a hex identifier to "0xabcd...ef12" format
pub fn truncate_hex(s: &str) -> String {
    if s.len() > 14 && s.is_ascii() {
        format!("{}...{}", &s[..8], &s[s.len() - 4..])
    } else {
        s.to_string()
    }
}

/// Format a wei value in ether, e.g. 2500000000000000000 -> "2.5"
pub fn format_ether(wei: U256) -> String {
    format_u256_as_decimal(wei, NATIVE_DECIMALS)
}

/// Format a U256 value as decimal with given decimals
pub fn format_u256_as_decimal(value: U256, decimals: u8) -> String {
    if value.is_zero() {
        return "0.0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / divisor;
    let remainder = value % divisor;

    if remainder.is_zero() {
        return format!("{whole}.0");
    }

    let remainder_str = format!("{remainder}");
    let padded = format!("{:0>width$}", remainder_str, width = decimals as usize);
    let trimmed = padded.trim_end_matches('0');
    format!("{whole}.{trimmed}")
}

/// Format gas price in Gwei
pub fn format_gwei(wei: u128) -> String {
    let gwei = wei as f64 / 1e9;
    if gwei < 0.01 {
        format!("{gwei:.4} Gwei")
    } else if gwei < 10.0 {
        format!("{gwei:.2} Gwei")
    } else {
        format!("{gwei:.1} Gwei")
    }
}

/// Format a number with comma separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a Unix timestamp as a datetime string
pub fn format_timestamp(timestamp: u64) -> String {
    DateTime::from_timestamp(timestamp as i64, 0)
        .map(|dt| dt.format("%b %d, %Y %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ether() {
        assert_eq!(format_ether(U256::from(2_500_000_000_000_000_000u128)), "2.5");
        assert_eq!(format_ether(U256::from(1_000_000_000_000_000_000u128)), "1.0");
        assert_eq!(format_ether(U256::ZERO), "0.0");
        assert_eq!(format_ether(U256::from(1u64)), "0.000000000000000001");
    }

    #[test]
    fn test_truncate_hex() {
        assert_eq!(
            truncate_hex("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            "0xd8dA6B...6045"
        );
        assert_eq!(truncate_hex("0xabc"), "0xabc");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(172414), "172,414");
        assert_eq!(format_number(1_000_000), "1,000,000");
    }

    #[test]
    fn test_format_gwei() {
        assert_eq!(format_gwei(2_000_000_000), "2.00 Gwei");
        assert_eq!(format_gwei(25_000_000_000), "25.0 Gwei");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "Jan 01, 1970 00:00:00 UTC");
    }
}
