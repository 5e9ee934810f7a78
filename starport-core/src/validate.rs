//! Field validity predicates for ship mutations and filters.

use chrono::{DateTime, Datelike};

use crate::error::{Result, StarportError};

/// Maximum accepted length for name and planet strings.
pub const NAME_MAX_CHARS: usize = 50;

/// First production year accepted by the catalog (inclusive).
pub const MIN_PROD_YEAR: i32 = 2800;

/// First production year rejected by the catalog (exclusive upper bound).
pub const MAX_PROD_YEAR: i32 = 3019;

/// A name or planet is valid when non-empty and at most 50 characters.
pub fn valid_string(value: &str) -> bool {
    !value.is_empty() && value.chars().count() <= NAME_MAX_CHARS
}

/// A production date is valid when its UTC year lies in [2800, 3019).
///
/// Millisecond values outside chrono's representable range are invalid.
pub fn valid_production_date(epoch_millis: i64) -> bool {
    DateTime::from_timestamp_millis(epoch_millis)
        .map(|date| (MIN_PROD_YEAR..MAX_PROD_YEAR).contains(&date.year()))
        .unwrap_or(false)
}

/// A crew size is valid strictly between 1 and 9999.
pub fn valid_crew_size(crew_size: i32) -> bool {
    crew_size > 1 && crew_size < 9999
}

/// A speed is valid strictly between 0.01 and 0.99.
pub fn valid_speed(speed: f64) -> bool {
    speed > 0.01 && speed < 0.99
}

/// A rating filter bound is valid when finite; there is no upper bound.
pub fn valid_rating(rating: f64) -> bool {
    rating.is_finite()
}

/// Identifiers must be positive; anything else is a bad request.
pub fn ensure_valid_id(id: i64) -> Result<i64> {
    if id > 0 {
        Ok(id)
    } else {
        Err(StarportError::BadRequest(format!("invalid ship id: {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ensure_valid_id, valid_crew_size, valid_production_date, valid_rating, valid_speed,
        valid_string,
    };
    use crate::error::StarportError;
    use chrono::{TimeZone, Utc};

    fn millis_of(year: i32) -> i64 {
        Utc.with_ymd_and_hms(year, 6, 1, 0, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn strings_must_be_non_empty_and_bounded() {
        assert!(valid_string("Zeus"));
        assert!(valid_string(&"x".repeat(50)));
        assert!(!valid_string(""));
        assert!(!valid_string(&"x".repeat(51)));
    }

    #[test]
    fn production_year_bounds_are_half_open() {
        assert!(valid_production_date(millis_of(2800)));
        assert!(valid_production_date(millis_of(3018)));
        assert!(!valid_production_date(millis_of(2799)));
        assert!(!valid_production_date(millis_of(3019)));
    }

    #[test]
    fn present_day_dates_are_rejected() {
        assert!(!valid_production_date(millis_of(2024)));
        assert!(!valid_production_date(0));
    }

    #[test]
    fn unrepresentable_millis_are_rejected() {
        assert!(!valid_production_date(i64::MAX));
    }

    #[test]
    fn crew_size_bounds_are_exclusive() {
        assert!(valid_crew_size(2));
        assert!(valid_crew_size(9998));
        assert!(!valid_crew_size(1));
        assert!(!valid_crew_size(9999));
        assert!(!valid_crew_size(0));
    }

    #[test]
    fn speed_bounds_are_exclusive() {
        assert!(valid_speed(0.011));
        assert!(valid_speed(0.5));
        assert!(valid_speed(0.989));
        assert!(!valid_speed(0.01));
        assert!(!valid_speed(0.99));
    }

    #[test]
    fn rating_must_be_finite() {
        assert!(valid_rating(0.0));
        assert!(valid_rating(1_000_000.0));
        assert!(!valid_rating(f64::INFINITY));
        assert!(!valid_rating(f64::NAN));
    }

    #[test]
    fn ids_must_be_positive() {
        assert_eq!(ensure_valid_id(1), Ok(1));
        assert!(matches!(
            ensure_valid_id(0),
            Err(StarportError::BadRequest(_))
        ));
        assert!(matches!(
            ensure_valid_id(-5),
            Err(StarportError::BadRequest(_))
        ));
    }
}
