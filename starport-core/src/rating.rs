//! Derived rating computation.

use chrono::{DateTime, Datelike};

/// Fixed reference year the rating formula counts back from.
pub const REFERENCE_YEAR: i32 = 3019;

/// UTC calendar year of an epoch-millisecond timestamp.
pub fn production_year(epoch_millis: i64) -> Option<i32> {
    DateTime::from_timestamp_millis(epoch_millis).map(|date| date.year())
}

/// Round a value half away from zero to two decimal places.
pub fn round_half_up(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rating of a ship from its used state, speed, and production year.
///
/// `rating = round(80 * speed * k / (3019 - prod_year + 1), 2)` where `k`
/// is 0.5 for used ships and 1 otherwise. Validation keeps production
/// years below 3019, so the denominator is always at least 2.
pub fn ship_rating(is_used: bool, speed: f64, prod_year: i32) -> f64 {
    let wear = if is_used { 0.5 } else { 1.0 };
    let raw = (80.0 * speed * wear) / f64::from(REFERENCE_YEAR - prod_year + 1);
    round_half_up(raw)
}

#[cfg(test)]
mod tests {
    use super::{production_year, round_half_up, ship_rating};
    use chrono::{TimeZone, Utc};

    #[test]
    fn zeus_example_rates_at_0_33() {
        // 80 * 0.5 / (3019 - 2900 + 1) = 40 / 120
        assert_eq!(ship_rating(false, 0.5, 2900), 0.33);
    }

    #[test]
    fn used_ships_rate_at_half() {
        assert_eq!(ship_rating(true, 0.5, 2900), 0.17);
    }

    #[test]
    fn newest_ships_rate_highest() {
        // Denominator bottoms out at 2 for the last valid year.
        assert_eq!(ship_rating(false, 0.98, 3018), 39.2);
    }

    #[test]
    fn rounding_is_half_up_at_two_decimals() {
        assert_eq!(round_half_up(0.125), 0.13);
        assert_eq!(round_half_up(0.124), 0.12);
        assert_eq!(round_half_up(0.5), 0.5);
    }

    #[test]
    fn production_year_reads_utc_calendar_year() {
        let millis = Utc
            .with_ymd_and_hms(2900, 1, 1, 0, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(production_year(millis), Some(2900));
        assert_eq!(production_year(i64::MAX), None);
    }
}
