use std::error::Error;

use ron::ser::{to_string_pretty, PrettyConfig};
use serde::Serialize;

pub trait ToExpectInput {
    fn to_expect_input(&self) -> String;
}

pub fn check(actual: impl ToExpectInput, expected: expect_test::Expect) {
    expected.assert_eq(actual.to_expect_input().as_str());
}

pub fn check_err(actual: impl Error, expected: expect_test::Expect) {
    expected.assert_eq(actual.to_string().as_str());
}

impl<T> ToExpectInput for T
where
    T: Serialize,
{
    fn to_expect_input(&self) -> String {
        to_string_pretty(
            self,
            PrettyConfig::new()
                .compact_arrays(false)
                .indentor("  ".to_owned()),
        )
        .unwrap()
    }
}

/// Bit-exact f64 equality, `-0.0` and `0.0` differ
#[macro_export]
macro_rules! assert_bits_eq {
    ($left:expr, $right:expr $(,)?) => {{
        let (left, right): (f64, f64) = ($left, $right);
        if left.to_bits() != right.to_bits() {
            panic!("{left:?} is not bit-identical to {right:?}");
        }
    }};
    ($left:expr, $right:expr, $($arg:tt)+) => {{
        let (left, right): (f64, f64) = ($left, $right);
        if left.to_bits() != right.to_bits() {
            panic!("{left:?} is not bit-identical to {right:?}: {}", format_args!($($arg)+));
        }
    }};
}

pub mod prelude {
    pub use expect_test::expect;
    pub use rstest::*;

    pub use crate::{assert_bits_eq, check, check_err, ToExpectInput};
}
