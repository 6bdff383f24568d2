use alloy::primitives::utils::parse_units;
use alloy::primitives::U256;
use anyhow::{bail, Result};

/// Fixed scale of the token's smallest unit, same convention as wei.
pub const TOKEN_DECIMALS: u32 = 18;

/// Human decimal string -> smallest-unit integer (x 10^18).
/// Rejects negative, empty and non-numeric input instead of folding it
/// to zero; over-precise fractions (more than 18 places) also fail.
pub fn parse_token(amount: &str) -> Result<U256> {
    let s = amount.trim();
    if s.is_empty() {
        bail!("amount is empty");
    }
    if s.starts_with('-') {
        bail!("amount `{s}` is negative");
    }
    match parse_units(s, "ether") {
        Ok(parsed) => Ok(parsed.into()),
        Err(e) => bail!("amount `{s}` is not a valid token amount: {e}"),
    }
}

/// Smallest-unit integer -> human decimal string, trailing zeros trimmed.
pub fn format_token(amount: U256, decimals: u32) -> String {
    let base = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / base;
    let frac = amount % base;
    if frac.is_zero() {
        return format!("{whole}");
    }
    let mut frac_str = format!("{:0width$}", frac, width = decimals as usize);
    while frac_str.ends_with('0') {
        frac_str.pop();
    }
    format!("{whole}.{frac_str}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_scales_by_ten_pow_eighteen() {
        let v = parse_token("2.5").unwrap();
        assert_eq!(v, U256::from(2_500_000_000_000_000_000u128));
        assert_eq!(parse_token("1").unwrap(), U256::from(10u64).pow(U256::from(18u64)));
        assert_eq!(parse_token("0.000000000000000001").unwrap(), U256::from(1u64));
    }

    #[test]
    fn format_five_tokens_is_bare_five() {
        let five = U256::from(5u64) * U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(format_token(five, TOKEN_DECIMALS), "5");
    }

    #[test]
    fn format_trims_trailing_zeros() {
        let v = parse_token("1.230").unwrap();
        assert_eq!(format_token(v, TOKEN_DECIMALS), "1.23");
        assert_eq!(format_token(U256::ZERO, TOKEN_DECIMALS), "0");
    }

    #[test]
    fn round_trip_holds_for_representable_amounts() {
        for s in ["1", "2.5", "0.001", "123456.789", "0.000000000000000001"] {
            let up = parse_token(s).unwrap();
            assert_eq!(format_token(up, TOKEN_DECIMALS), s, "round trip broke for {s}");
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_token("").is_err());
        assert!(parse_token("   ").is_err());
        assert!(parse_token("abc").is_err());
        assert!(parse_token("-1").is_err());
        assert!(parse_token("1.2.3").is_err());
        // 19 fractional places cannot be represented in smallest units
        assert!(parse_token("0.1234567890123456789").is_err());
    }
}
