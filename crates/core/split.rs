use serde::{Deserialize, Serialize};

use crate::fmt::to_fixed;

/// A three way split of a total, each share rounded to one decimal place
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSplit {
    pub partner_token_amount: f64,
    pub platform_amount: f64,
    pub platform_fee_amount: f64,
}

/// Split `total` by the given fractions, which need not sum to one.
///
/// Shares are rounded half up to one decimal, unlike the truncating rate calculators.
pub fn calculate_rate_split(
    total: f64,
    payout_split: f64,
    platform_split: f64,
    fee_split: f64,
) -> RateSplit {
    let share = |fraction: f64| round_half_up(total * fraction * 10.0) / 10.0;

    RateSplit {
        partner_token_amount: share(payout_split),
        platform_amount: share(platform_split),
        platform_fee_amount: share(fee_split),
    }
}

/// `"{label} {a}% and FP {b}%"` with one decimal on both shares
pub fn format_breakdown_message(label: &str, partner_token: f64, platform_token: f64) -> String {
    format!(
        "{label} {}% and FP {}%",
        to_fixed(partner_token, 1),
        to_fixed(platform_token, 1)
    )
}

// nearest integer, ties toward positive infinity, negative inputs keep their sign at zero
fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();

    let rounded = if x - floor >= 0.5 { floor + 1.0 } else { floor };

    if rounded == 0.0 && x.is_sign_negative() {
        -0.0
    } else {
        rounded
    }
}
