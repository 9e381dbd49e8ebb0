//! Number rendering compatible with the JavaScript front end.
//!
//! Breakdown messages are compared verbatim by existing callers, so the rounding rules of
//! `Number.prototype.toFixed` are reproduced here instead of relying on `format!`, which
//! rounds exact ties to even.

// Enough fraction digits to hold the exact decimal expansion of any finite f64
const EXACT_FRACTION_DIGITS: usize = 1_100;

/// Render `value` with exactly `digits` fraction digits, rounding like `toFixed`.
///
/// Ties round away from zero (based on the exact binary value), and negative zero renders
/// without a sign. Non-finite values render as `NaN`, `Infinity` and `-Infinity`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }

    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    let sign = if value < 0.0 { "-" } else { "" };

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());

    let (integer, fraction) = exact
        .split_once('.')
        .unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().take(digits))
        .collect();

    let round_up = fraction
        .as_bytes()
        .get(digits)
        .is_some_and(|&next| next >= b'5');

    if round_up {
        increment(&mut kept);
    }

    let integer_len = kept.len() - digits;

    let mut rendered = String::with_capacity(sign.len() + kept.len() + 1);

    rendered.push_str(sign);
    rendered.extend(kept[..integer_len].iter().map(|&b| b as char));

    if digits > 0 {
        rendered.push('.');
        rendered.extend(kept[integer_len..].iter().map(|&b| b as char));
    }

    rendered
}

/// Three fixed decimals with trailing zeros dropped: `8.775`, `1.5`, `2`.
pub fn trim_fixed(value: f64) -> String {
    let fixed = to_fixed(value, 3);

    if !fixed.contains('.') {
        return fixed;
    }

    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned()
}

// add one unit in the last place of a string of ascii digits
fn increment(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }

    digits.insert(0, b'1');
}

#[cfg(test)]
mod test {
    use test_utils::prelude::*;

    use super::*;

    #[rstest]
    #[case::whole(146.25, 2, "146.25")]
    #[case::pads(292.5, 2, "292.50")]
    #[case::zero(0.0, 2, "0.00")]
    #[case::negative_zero(-0.0, 1, "0.0")]
    #[case::one_decimal_whole(1.0, 1, "1.0")]
    #[case::exact_tie_rounds_up(0.25, 1, "0.3")]
    #[case::exact_tie_rounds_up_again(1.125, 2, "1.13")]
    #[case::below_tie_in_binary(1.005, 2, "1.00")]
    #[case::carry(9.995, 2, "9.99")]
    #[case::carry_into_integer(9.9999, 2, "10.00")]
    #[case::no_digits(2.5, 0, "3")]
    #[case::negative(-1.25, 1, "-1.3")]
    #[case::negative_rounds_to_zero(-0.001, 2, "-0.00")]
    #[case::nan(f64::NAN, 2, "NaN")]
    #[case::infinity(f64::INFINITY, 2, "Infinity")]
    #[case::negative_infinity(f64::NEG_INFINITY, 2, "-Infinity")]
    fn to_fixed_matches_javascript(
        #[case] value: f64,
        #[case] digits: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(to_fixed(value, digits), expected);
    }

    #[rstest]
    #[case::three_decimals(8.775, "8.775")]
    #[case::trailing_zeros(1.5, "1.5")]
    #[case::whole(2.0, "2")]
    #[case::zero(0.0, "0")]
    #[case::large_whole(100.0, "100")]
    #[case::rounds_to_three(1.0006, "1.001")]
    #[case::rounds_down_to_whole(1.0004, "1")]
    fn trim_fixed_drops_trailing_zeros(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(trim_fixed(value), expected);
    }
}
