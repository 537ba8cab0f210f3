//! Date and time generators.

use chrono::{Duration, NaiveDate, NaiveTime};
use fill_core::types::{far_future, proleptic_min};
use fill_core::{DateTimeKind, FillValue};
use rand::Rng;

const SECONDS_PER_DAY: u32 = 86_400;

/// Generate a date-time between `min` and `max`.
///
/// Missing bounds default to the kind's range. A whole-day offset is drawn
/// from `[0, max - min)` and an hour offset from `[0, 24)`, so the result
/// always falls before `max`. When the range is empty `min` at midnight is
/// returned.
pub fn generate_datetime<R: Rng>(
    rng: &mut R,
    kind: DateTimeKind,
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
) -> FillValue {
    let (default_min, default_max) = kind.default_bounds();
    let day = random_day(rng, min.unwrap_or(default_min), max.unwrap_or(default_max));

    let midnight = day.and_time(NaiveTime::MIN);
    let hour = rng.random_range(0..24);
    let value = midnight
        .checked_add_signed(Duration::hours(hour))
        .unwrap_or(midnight);

    FillValue::DateTime(value)
}

/// Generate a date between `min` and `max` (defaults: proleptic minimum and
/// 9999-12-31).
pub fn generate_date<R: Rng>(
    rng: &mut R,
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
) -> FillValue {
    FillValue::Date(random_day(
        rng,
        min.unwrap_or_else(proleptic_min),
        max.unwrap_or_else(far_future),
    ))
}

/// Generate a time of day with whole seconds drawn from `[0, 86400)`.
pub fn generate_time<R: Rng>(rng: &mut R) -> FillValue {
    let seconds = rng.random_range(0..SECONDS_PER_DAY);
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap_or(NaiveTime::MIN);
    FillValue::Time(time)
}

fn random_day<R: Rng>(rng: &mut R, min: NaiveDate, max: NaiveDate) -> NaiveDate {
    let days = (max - min).num_days();
    if days <= 0 {
        return min;
    }
    let offset = rng.random_range(0..days);
    min.checked_add_signed(Duration::days(offset)).unwrap_or(min)
}
