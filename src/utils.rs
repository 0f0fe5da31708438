use alloy_primitives::U256;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Decimal scale of the native asset and of Aave's fixed-point words.
pub const NATIVE_DECIMALS: u32 = 18;

/// Convert a smallest-unit integer into its decimal-adjusted string form.
/// Exact for any `U256`/decimals pair. Trailing fractional zeros are trimmed
/// but one digit is always kept after the point, so zero renders as "0.0".
pub fn format_units(value: U256, decimals: u32) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let (whole, frac) = match U256::from(10u8).checked_pow(U256::from(decimals)) {
        Some(scale) => value.div_rem(scale),
        // Scale exceeds 2^256: the value is entirely fractional.
        None => (U256::ZERO, value),
    };

    let digits = frac.to_string();
    let mut frac = "0".repeat(decimals as usize - digits.len());
    frac.push_str(&digits);
    while frac.len() > 1 && frac.ends_with('0') {
        frac.pop();
    }

    format!("{whole}.{frac}")
}

/// Convert an 18-decimal fixed-point word into a plain decimal. Saturates at
/// `Decimal::MAX` for values outside the representable range; Aave reports
/// `u256::MAX` as the health factor of a position with no debt.
pub fn wad_to_decimal(value: U256) -> Decimal {
    Decimal::from_str(&format_units(value, NATIVE_DECIMALS)).unwrap_or(Decimal::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Reparse a formatted balance and rescale it back to smallest units.
    fn rescale(formatted: &str, decimals: u32) -> U256 {
        let (whole, frac) = formatted.split_once('.').unwrap_or((formatted, ""));
        let mut digits = String::from(whole);
        digits.push_str(frac);
        digits.push_str(&"0".repeat(decimals as usize - frac.len()));
        U256::from_str_radix(&digits, 10).unwrap()
    }

    #[test]
    fn formats_native_units() {
        let wei = U256::from(1_500_000_000_000_000_000u64);
        assert_eq!(format_units(wei, NATIVE_DECIMALS), "1.5");
    }

    #[test]
    fn formats_zero_with_fractional_digit() {
        assert_eq!(format_units(U256::ZERO, NATIVE_DECIMALS), "0.0");
    }

    #[test]
    fn formats_sub_unit_balances() {
        assert_eq!(format_units(U256::from(123u64), 6), "0.000123");
    }

    #[test]
    fn formats_zero_decimal_assets_as_integers() {
        assert_eq!(format_units(U256::from(42u64), 0), "42");
    }

    #[test]
    fn conversion_round_trips_exactly() {
        let cases = [
            (U256::from(1u64), 18),
            (U256::from(1_000_001u64), 6),
            (U256::from(987_654_321_000_000_000_000u128), 18),
            (U256::MAX, 18),
            (U256::from(5u64), 77),
        ];
        for (raw, decimals) in cases {
            let formatted = format_units(raw, decimals);
            assert_eq!(rescale(&formatted, decimals), raw, "case {raw} / {decimals}");
        }
    }

    #[test]
    fn wad_conversion_is_exact() {
        let raw = U256::from(2_500_000_000_000_000_000u64);
        assert_eq!(wad_to_decimal(raw), dec!(2.5));
    }

    #[test]
    fn wad_conversion_saturates_on_no_debt_sentinel() {
        assert_eq!(wad_to_decimal(U256::MAX), Decimal::MAX);
    }
}
