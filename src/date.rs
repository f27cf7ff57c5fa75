//! A hash tuned for 10-character calendar-date keys, and the linear-probing
//! table specialized with it.

use crate::hasher::{KeyHasher, PolynomialHasher};
use crate::linear_probe::LinearProbeTable;
use crate::table::TableSizes;

/// Growth sequence for the date table: multiples of 366, so the store always
/// partitions into whole 366-slot year bands.
pub const DATE_SIZES: &[usize] = &[366, 4 * 366, 16 * 366];

/// Cumulative days before each month in a non-leap year.
const DAYS_BEFORE_MONTH: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
/// The year mapped to band zero.
const EPOCH_YEAR: i64 = 1970;
/// Slots reserved per year band; wide enough for a leap year.
const YEAR_SPAN: usize = 366;

/// One parsed calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Date {
    /// Four-digit year.
    year: i64,
    /// Month of year, 1-12.
    month: u32,
    /// Day of month, 1-31.
    day: u32,
}

impl Date {
    /// Parses a 10-character key in any of the supported formats:
    /// `DD/MM/YYYY`, `DD-MM-YYYY`, `YYYY/MM/DD`, `YYYY-MM-DD`.
    ///
    /// The year is recognised by field width: a 4-character first field
    /// means year-first, anything else means day-first. Returns `None` for
    /// keys that are not dates at all.
    fn parse(key: &str) -> Option<Self> {
        if key.chars().count() != 10 {
            return None;
        }
        let delimiter = if key.contains('/') { '/' } else { '-' };
        let mut fields = key.split(delimiter);
        let first = fields.next()?;
        let second = fields.next()?;
        let third = fields.next()?;
        if fields.next().is_some() {
            return None;
        }
        let (year, month, day) =
            if first.len() == 4 { (first, second, third) } else { (third, second, first) };
        Some(Self {
            year: year.parse().ok()?,
            month: month.parse().ok()?,
            day: day.parse().ok()?,
        })
    }

    /// Gregorian leap-year rule.
    fn is_leap_year(self) -> bool {
        self.year % 4 == 0 && (self.year % 100 != 0 || self.year % 400 == 0)
    }

    /// Ordinal day within the year, 1-366.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn day_of_year(self) -> usize {
        let month_index = self.month.saturating_sub(1) as usize;
        let before = DAYS_BEFORE_MONTH.get(month_index).copied().unwrap_or(0);
        let leap_shift = u32::from(self.is_leap_year() && self.month > 2);
        (before + leap_shift + self.day) as usize
    }
}

/// Hash strategy for calendar-date keys.
///
/// With a capacity of `c * 366`, the store is treated as `c` contiguous
/// 366-slot bands, one per `year mod c`; within a band the slot is the
/// date's ordinal day. Two dates only collide when their years are `c`
/// apart, so a stream of dates within a few years hashes almost perfectly.
///
/// Keys that do not parse as dates fall back to the plain polynomial hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateHasher {
    /// Fallback for keys that violate the date-key precondition.
    fallback: PolynomialHasher,
}

impl KeyHasher for DateHasher {
    #[allow(
        clippy::arithmetic_side_effects,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    fn position(&self, key: &str, capacity: usize) -> usize {
        let Some(date) = Date::parse(key) else {
            return self.fallback.position(key, capacity);
        };
        if capacity == 0 {
            return 0;
        }
        let bands = (capacity / YEAR_SPAN).max(1) as i64;
        let band = (date.year - EPOCH_YEAR).rem_euclid(bands) as usize;
        (band * YEAR_SPAN + date.day_of_year() - 1) % capacity
    }
}

/// A linear-probing table keyed by 10-character date strings.
pub type DateTable<V> = LinearProbeTable<V, DateHasher>;

impl<V: Clone> LinearProbeTable<V, DateHasher> {
    /// Creates a date table over the fixed 366-multiple growth sequence.
    /// Once the last capacity is reached the table stops growing and `set`
    /// eventually reports the table as full.
    #[must_use]
    pub fn for_dates() -> Self {
        Self::from_parts(TableSizes::from_static(DATE_SIZES), DateHasher::default())
    }
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::table::HashTable;

    /// Every date of 2025 in `YYYY-MM-DD` form.
    fn dates_of_2025() -> Vec<String> {
        let month_lengths = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        let mut dates = Vec::new();
        for (month_index, &length) in month_lengths.iter().enumerate() {
            for day in 1..=length {
                dates.push(format!("2025-{:02}-{day:02}", month_index + 1));
            }
        }
        dates
    }

    #[test]
    fn test_all_formats_hash_alike() {
        let hasher = DateHasher::default();
        let positions: Vec<usize> = ["17/03/2025", "17-03-2025", "2025/03/17", "2025-03-17"]
            .iter()
            .map(|key| hasher.position(key, 366))
            .collect();
        assert!(positions.iter().all(|&p| p == positions[0]));
    }

    #[test]
    fn test_first_of_january_maps_to_band_start() {
        let hasher = DateHasher::default();
        // 2025 is the only band at capacity 366, so Jan 1 lands on slot 0.
        assert_eq!(hasher.position("2025-01-01", 366), 0);
        assert_eq!(hasher.position("2025-12-31", 366), 364);
    }

    #[test]
    fn test_leap_day_counts_february() {
        let hasher = DateHasher::default();
        // 2024 is a leap year: Feb 29 is ordinal day 60.
        assert_eq!(hasher.position("29/02/2024", 366), 59);
        // March 1 shifts by one in a leap year only.
        assert_eq!(hasher.position("01/03/2024", 366), 60);
        assert_eq!(hasher.position("01/03/2025", 366), 59);
    }

    #[test]
    fn test_years_fill_distinct_bands() {
        let hasher = DateHasher::default();
        let capacity = 4 * 366;
        let jan1: Vec<usize> = ["2024-01-01", "2025-01-01", "2026-01-01", "2027-01-01"]
            .iter()
            .map(|key| hasher.position(key, capacity))
            .collect();
        // (year - 1970) mod 4 picks the band.
        assert_eq!(jan1, vec![2 * 366, 3 * 366, 0, 366]);
    }

    #[test]
    fn test_single_year_is_collision_free() {
        let hasher = DateHasher::default();
        let mut positions: Vec<usize> =
            dates_of_2025().iter().map(|key| hasher.position(key, 366)).collect();
        positions.sort_unstable();
        positions.dedup();
        assert_eq!(positions.len(), 365);
    }

    #[test]
    fn test_malformed_key_falls_back() {
        let hasher = DateHasher::default();
        let fallback = PolynomialHasher;
        for key in ["not-a-date", "key1", "2025-13", "12345678901"] {
            assert_eq!(hasher.position(key, 366), fallback.position(key, 366));
        }
    }

    #[test]
    fn test_growth_stops_after_one_resize_for_a_year() {
        let mut table: DateTable<String> = DateTable::for_dates();
        assert_eq!(table.capacity(), 366);

        for date in dates_of_2025() {
            assert_eq!(table.set(&date, date.clone()), Ok(()));
        }

        // 365 entries cross the two-thirds threshold of 366 exactly once.
        assert_eq!(table.capacity(), 4 * 366);
        assert_eq!(table.len(), 365);
        for date in dates_of_2025() {
            assert_eq!(table.get(&date), Ok(&date));
        }
    }

    #[test]
    fn test_round_trip_across_formats() {
        let mut table: DateTable<u32> = DateTable::for_dates();
        assert_eq!(table.set("04/07/2026", 1), Ok(()));
        assert_eq!(table.set("2026-12-25", 2), Ok(()));

        assert_eq!(table.get("04/07/2026"), Ok(&1));
        assert_eq!(table.get("2026-12-25"), Ok(&2));
        assert!(!table.contains("05/07/2026"));
    }
}
