//! Shift window derivation.
//!
//! The business day for asset tracking is a fixed nightly window: 19:00 on
//! the shift date through 04:00 the following day, in UTC+05:30. The offset
//! is a business constant and never follows the host locale.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};

use crate::error::{Result, TimecardError};

/// Fixed business offset for shift arithmetic, in seconds east of UTC.
pub const BUSINESS_TZ_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60; // UTC+05:30

/// Local wall-clock hour the shift opens on the shift date.
pub const SHIFT_START_HOUR: u32 = 19;

/// Local wall-clock hour the shift closes on the following day.
pub const SHIFT_END_HOUR: u32 = 4;

/// Returns the fixed business offset (UTC+05:30).
pub fn business_offset() -> FixedOffset {
    FixedOffset::east_opt(BUSINESS_TZ_OFFSET_SECS).expect("business offset is in range")
}

/// The canonical nightly shift window, normalized to UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ShiftWindow {
    /// Derives the window for a shift date: 19:00:00.000 local on the date
    /// through 04:00:00.000 local on the following calendar day.
    ///
    /// Fails only on calendar overflow at the representable date boundary;
    /// ordinary far-past or far-future dates are not validated.
    pub fn for_date(date: NaiveDate) -> Result<Self> {
        let next_day = date
            .succ_opt()
            .ok_or(TimecardError::ShiftWindowOutOfRange(date))?;

        let start = local_instant(date, SHIFT_START_HOUR)
            .ok_or(TimecardError::ShiftWindowOutOfRange(date))?;
        let end = local_instant(next_day, SHIFT_END_HOUR)
            .ok_or(TimecardError::ShiftWindowOutOfRange(date))?;

        Ok(Self { start, end })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

fn local_instant(date: NaiveDate, hour: u32) -> Option<DateTime<Utc>> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
    date.and_time(time)
        .and_local_timezone(business_offset())
        .single()
        .map(|instant| instant.with_timezone(&Utc))
}

/// Parses a caller-supplied `YYYY-MM-DD` shift date.
pub fn parse_shift_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|err| {
        TimecardError::InvalidShiftDate {
            value: value.to_string(),
            reason: err.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_bounds_are_fixed_offset_instants() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let window = ShiftWindow::for_date(date).unwrap();

        // 19:00+05:30 is 13:30Z; 04:00+05:30 next day is 22:30Z same day.
        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2024, 3, 1, 13, 30, 0).unwrap()
        );
        assert_eq!(
            window.end,
            Utc.with_ymd_and_hms(2024, 3, 1, 22, 30, 0).unwrap()
        );
    }

    #[test]
    fn window_spans_nine_hours() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let window = ShiftWindow::for_date(date).unwrap();
        assert_eq!(window.duration(), Duration::hours(9));
    }

    #[test]
    fn window_rolls_over_month_end() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let window = ShiftWindow::for_date(date).unwrap();
        assert_eq!(
            window.end,
            Utc.with_ymd_and_hms(2024, 12, 31, 22, 30, 0).unwrap()
        );
        assert_eq!(window.duration(), Duration::hours(9));
    }

    #[test]
    fn window_handles_leap_day() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let window = ShiftWindow::for_date(date).unwrap();
        // End lands on Feb 29 04:00+05:30.
        assert_eq!(
            window.end,
            Utc.with_ymd_and_hms(2024, 2, 28, 22, 30, 0).unwrap()
        );
    }

    #[test]
    fn parses_shift_date() {
        let date = parse_shift_date("2024-03-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn parses_shift_date_with_surrounding_whitespace() {
        let date = parse_shift_date("  2024-03-01\n").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn rejects_malformed_shift_date() {
        assert!(parse_shift_date("03/01/2024").is_err());
        assert!(parse_shift_date("2024-13-01").is_err());
        assert!(parse_shift_date("soon").is_err());
    }
}
