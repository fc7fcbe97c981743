use chrono::NaiveDateTime;

use crate::model::attendance::AttendanceStatus;

/// Durations are reported in hours, rounded to 2 decimal places.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

pub fn work_duration_hours(on: NaiveDateTime, off: NaiveDateTime) -> f64 {
    let seconds = (off - on).num_seconds() as f64;
    round_hours(seconds / 3600.0)
}

/// Maps a worked duration onto a day status. Branch order is significant:
/// the full-day band is checked first and the half-day band is half-open,
/// [4.0, 8.0). The trailing arm is unreachable for finite durations and only
/// absorbs non-finite arithmetic.
pub fn classify(duration_hours: f64) -> AttendanceStatus {
    if duration_hours >= 8.0 {
        AttendanceStatus::Present
    } else if duration_hours >= 4.0 && duration_hours < 8.0 {
        AttendanceStatus::HalfDay
    } else if duration_hours < 4.0 {
        AttendanceStatus::EarlyLeave
    } else {
        AttendanceStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn duration_band_boundaries() {
        assert_eq!(classify(3.99), AttendanceStatus::EarlyLeave);
        assert_eq!(classify(4.0), AttendanceStatus::HalfDay);
        assert_eq!(classify(7.99), AttendanceStatus::HalfDay);
        assert_eq!(classify(8.0), AttendanceStatus::Present);
        assert_eq!(classify(8.01), AttendanceStatus::Present);
    }

    #[test]
    fn zero_duration_is_early_leave() {
        assert_eq!(classify(0.0), AttendanceStatus::EarlyLeave);
    }

    #[test]
    fn non_finite_duration_falls_through() {
        assert_eq!(classify(f64::NAN), AttendanceStatus::Approved);
    }

    #[test]
    fn duration_is_rounded_to_two_decimals() {
        // 8h 29m 45s = 8.495833... -> 8.5
        assert_eq!(work_duration_hours(at(9, 0, 0), at(17, 29, 45)), 8.5);
        // 3m = 0.05h exactly
        assert_eq!(work_duration_hours(at(9, 0, 0), at(9, 3, 0)), 0.05);
    }

    #[test]
    fn rounded_duration_crosses_band_edge() {
        // 7h 59m 51s rounds to 8.0 and therefore classifies as Present.
        let duration = work_duration_hours(at(9, 0, 0), at(16, 59, 51));
        assert_eq!(duration, 8.0);
        assert_eq!(classify(duration), AttendanceStatus::Present);
    }
}
