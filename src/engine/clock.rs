use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// Single source of "now" and "today" for the whole engine. The office runs on
/// one fixed UTC offset (default +05:30); every timestamp and calendar date is
/// normalized through this type instead of ad hoc offset arithmetic.
#[derive(Debug, Clone, Copy)]
pub struct CalendarClock {
    offset: FixedOffset,
}

impl CalendarClock {
    pub fn from_offset_minutes(minutes: i32) -> Self {
        let offset =
            FixedOffset::east_opt(minutes * 60).expect("TZ_OFFSET_MINUTES out of range");
        Self { offset }
    }

    /// Current wall-clock time in the configured zone.
    pub fn now(&self) -> NaiveDateTime {
        self.normalize(Utc::now())
    }

    /// Current calendar day in the configured zone; the natural-key component
    /// of every attendance record.
    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    pub fn normalize(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.offset).naive_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn normalizes_into_configured_offset() {
        let clock = CalendarClock::from_offset_minutes(330);
        let instant = Utc.with_ymd_and_hms(2026, 3, 10, 20, 0, 0).unwrap();

        let local = clock.normalize(instant);
        assert_eq!(local.to_string(), "2026-03-11 01:30:00");
    }

    #[test]
    fn calendar_day_rolls_over_with_offset() {
        let clock = CalendarClock::from_offset_minutes(330);
        let before_midnight = Utc.with_ymd_and_hms(2026, 3, 10, 18, 29, 59).unwrap();
        let after_midnight = Utc.with_ymd_and_hms(2026, 3, 10, 18, 30, 0).unwrap();

        assert_eq!(
            clock.normalize(before_midnight).date().to_string(),
            "2026-03-10"
        );
        assert_eq!(
            clock.normalize(after_midnight).date().to_string(),
            "2026-03-11"
        );
    }

    #[test]
    fn utc_offset_is_identity() {
        let clock = CalendarClock::from_offset_minutes(0);
        let instant = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(clock.normalize(instant), instant.naive_utc());
    }
}
