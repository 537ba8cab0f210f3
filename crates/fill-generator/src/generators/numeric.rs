//! Numeric value generators.

use fill_core::{FillValue, IntegerKind};
use rand::Rng;

/// Widest decimal part (integral or fractional) that fits in a `u128`.
pub const MAX_DECIMAL_DIGITS: u8 = 38;

/// Upper bound (exclusive) for floating point values.
pub const FLOAT_UPPER_BOUND: f64 = 1_000_000.0;

/// Precision and scale used for currency amounts.
const MONEY_PRECISION: u8 = 8;
const MONEY_SCALE: u8 = 2;

/// Generate an integer uniformly over `[0, kind.max_value()]`.
///
/// The range is inclusive so the widest kind never computes `max + 1`.
pub fn generate_integer<R: Rng>(rng: &mut R, kind: IntegerKind) -> FillValue {
    FillValue::Int(rng.random_range(0..=kind.max_value()))
}

/// Generate a decimal in `[0, 10^(precision-scale) - 10^-scale]` with exactly
/// `scale` fractional digits.
///
/// The integral and fractional parts are drawn independently, which is a
/// uniform draw over every value representable at this precision and scale.
/// Each part is capped at [`MAX_DECIMAL_DIGITS`] digits.
pub fn generate_decimal<R: Rng>(rng: &mut R, precision: u8, scale: u8) -> FillValue {
    FillValue::Decimal(decimal_string(rng, precision, scale))
}

/// Generate a currency amount (up to 999999.99).
pub fn generate_money<R: Rng>(rng: &mut R) -> FillValue {
    FillValue::Money(decimal_string(rng, MONEY_PRECISION, MONEY_SCALE))
}

/// Generate a floating point value in `[0, FLOAT_UPPER_BOUND)`.
pub fn generate_float<R: Rng>(rng: &mut R) -> FillValue {
    FillValue::Float(rng.random_range(0.0..FLOAT_UPPER_BOUND))
}

fn decimal_string<R: Rng>(rng: &mut R, precision: u8, scale: u8) -> String {
    let scale = scale.min(precision).min(MAX_DECIMAL_DIGITS);
    let integral_digits = precision.saturating_sub(scale).min(MAX_DECIMAL_DIGITS);

    let integral = rng.random_range(0..=max_with_digits(integral_digits));
    if scale == 0 {
        return integral.to_string();
    }

    let fraction = rng.random_range(0..=max_with_digits(scale));
    format!("{integral}.{fraction:0width$}", width = scale as usize)
}

/// `10^digits - 1`; zero digits yields zero.
fn max_with_digits(digits: u8) -> u128 {
    10u128.pow(digits as u32) - 1
}
