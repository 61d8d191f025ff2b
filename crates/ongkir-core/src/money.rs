//! Rupiah amounts as shown to shoppers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount the way the storefront displays prices: `Rp` prefix,
/// whole rupiah, `.` as the thousands separator (`Rp 115.000`).
#[must_use]
pub fn format_rupiah(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().normalize().to_string();
    let grouped = group_thousands(&digits);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
