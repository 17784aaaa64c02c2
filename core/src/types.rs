//! Shared primitive types and default policy constants.

/// Operating year of the storefront, counted from 1 (first year open).
pub type Year = u32;

/// Calendar month, 1..=12.
pub type Month = u32;

/// Currency amount. Never negative for engine outputs.
pub type Money = f64;

/// Whole person-minutes. Allocation is done in minutes so that
/// block totals add up exactly.
pub type Minutes = u64;

pub const MONTHS_PER_YEAR: Month = 12;
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Calendar-averaging constant used to convert weekly figures to monthly.
pub const DEFAULT_WEEKS_PER_MONTH: f64 = 4.3;

/// Tolerance for share sums in distribution profiles.
pub const SHARE_TOLERANCE: f64 = 1e-6;

/// Convert hours to whole minutes. Returns None when `hours` is not a
/// non-negative whole number of minutes.
pub fn hours_to_minutes(hours: f64) -> Option<Minutes> {
    if !hours.is_finite() || hours < 0.0 {
        return None;
    }
    let minutes = hours * MINUTES_PER_HOUR;
    let rounded = minutes.round();
    if (minutes - rounded).abs() > 1e-6 {
        return None;
    }
    Some(rounded as Minutes)
}

pub fn minutes_to_hours(minutes: Minutes) -> f64 {
    minutes as f64 / MINUTES_PER_HOUR
}
