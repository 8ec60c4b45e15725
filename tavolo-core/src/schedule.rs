use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// A single open-close window within one calendar day, minute granularity.
///
/// Venues post two of these as free-text `"HH:MM-HH:MM"` fields, one for
/// weekdays and one for weekends. Overnight windows (close before open) are
/// not representable and are rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursWindow {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HoursParseError {
    #[error("expected HH:MM-HH:MM, got {0:?}")]
    MissingSeparator(String),
    #[error("invalid time of day: {0:?}")]
    InvalidTime(String),
    #[error("closing time {close} is before opening time {open}")]
    Inverted { open: NaiveTime, close: NaiveTime },
}

fn parse_time(s: &str) -> Result<NaiveTime, HoursParseError> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| HoursParseError::InvalidTime(s.to_string()))
}

impl HoursWindow {
    /// Parse a `"HH:MM-HH:MM"` field. A closing time of `"24:00"` (end of
    /// day, present in real venue data) is normalized to `23:59`.
    pub fn parse(s: &str) -> Result<Self, HoursParseError> {
        let (open_str, close_str) = s
            .split_once('-')
            .ok_or_else(|| HoursParseError::MissingSeparator(s.to_string()))?;

        let open = parse_time(open_str.trim())?;
        let close_str = close_str.trim();
        let close = if close_str == "24:00" {
            parse_time("23:59")?
        } else {
            parse_time(close_str)?
        };

        if close < open {
            return Err(HoursParseError::Inverted { open, close });
        }

        Ok(Self { open, close })
    }

    /// Whether a time of day falls inside the window. Both bounds are
    /// inclusive: a reservation at the exact closing minute is allowed,
    /// matching the behavior venues have always had. Seconds are ignored,
    /// the window is minute-granular.
    pub fn contains(&self, t: NaiveTime) -> bool {
        let hm = (t.hour(), t.minute());
        (self.open.hour(), self.open.minute()) <= hm && hm <= (self.close.hour(), self.close.minute())
    }
}

/// A venue's posted schedule: one window for weekdays, one for weekends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub weekday: HoursWindow,
    pub weekend: HoursWindow,
}

impl OperatingHours {
    pub fn from_strs(weekdays_hours: &str, weekend_hours: &str) -> Result<Self, HoursParseError> {
        Ok(Self {
            weekday: HoursWindow::parse(weekdays_hours)?,
            weekend: HoursWindow::parse(weekend_hours)?,
        })
    }

    fn is_weekend(day: Weekday) -> bool {
        matches!(day, Weekday::Sat | Weekday::Sun)
    }

    /// Decide whether a proposed reservation time is bookable.
    ///
    /// `now` is injected rather than read from the clock, so the decision is
    /// deterministic and testable. Pure: no I/O, no logging, no panics —
    /// every outcome is a value.
    pub fn decide(&self, requested: NaiveDateTime, now: NaiveDateTime) -> WindowDecision {
        if requested < now {
            return WindowDecision::Rejected(RejectionReason::InPast);
        }

        if Self::is_weekend(requested.weekday()) {
            if self.weekend.contains(requested.time()) {
                WindowDecision::Accepted
            } else {
                WindowDecision::Rejected(RejectionReason::OutsideWeekendHours)
            }
        } else if self.weekday.contains(requested.time()) {
            WindowDecision::Accepted
        } else {
            WindowDecision::Rejected(RejectionReason::OutsideWeekdayHours)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    InPast,
    OutsideWeekdayHours,
    OutsideWeekendHours,
    MalformedHours,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowDecision {
    Accepted,
    Rejected(RejectionReason),
}

impl WindowDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, WindowDecision::Accepted)
    }
}

/// String-level entry point: checks the past bound, then parses the venue's
/// raw hour fields and applies the window check. Unparseable hours come back
/// as `Rejected(MalformedHours)` — the past check still wins over a parse
/// failure, since a past timestamp is unbookable no matter what the venue
/// posted.
pub fn validate_reservation_time(
    weekdays_hours: &str,
    weekend_hours: &str,
    requested: NaiveDateTime,
    now: NaiveDateTime,
) -> WindowDecision {
    if requested < now {
        return WindowDecision::Rejected(RejectionReason::InPast);
    }

    match OperatingHours::from_strs(weekdays_hours, weekend_hours) {
        Ok(hours) => hours.decide(requested, now),
        Err(_) => WindowDecision::Rejected(RejectionReason::MalformedHours),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn hours() -> OperatingHours {
        OperatingHours::from_strs("09:00-18:00", "10:00-22:00").unwrap()
    }

    #[test]
    fn weekday_time_inside_window_is_accepted() {
        // 2024-01-01 is a Monday
        let now = at(2024, 1, 1, 8, 0);
        let decision = hours().decide(at(2024, 1, 1, 10, 0), now);
        assert_eq!(decision, WindowDecision::Accepted);
    }

    #[test]
    fn weekday_time_before_open_is_rejected() {
        let now = at(2024, 1, 1, 8, 0);
        let decision = hours().decide(at(2024, 1, 1, 8, 30), now);
        assert_eq!(
            decision,
            WindowDecision::Rejected(RejectionReason::OutsideWeekdayHours)
        );
    }

    #[test]
    fn weekend_time_after_close_is_rejected() {
        // 2024-01-06 is a Saturday
        let now = at(2024, 1, 6, 12, 0);
        let decision = hours().decide(at(2024, 1, 6, 23, 0), now);
        assert_eq!(
            decision,
            WindowDecision::Rejected(RejectionReason::OutsideWeekendHours)
        );
    }

    #[test]
    fn weekend_time_inside_window_is_accepted() {
        let now = at(2024, 1, 6, 9, 0);
        let decision = hours().decide(at(2024, 1, 7, 11, 30), now);
        assert_eq!(decision, WindowDecision::Accepted);
    }

    #[test]
    fn past_timestamp_is_rejected_regardless_of_hours() {
        let now = at(2024, 1, 1, 12, 0);
        let decision = hours().decide(at(2024, 1, 1, 10, 0), now);
        assert_eq!(decision, WindowDecision::Rejected(RejectionReason::InPast));
    }

    #[test]
    fn past_check_wins_over_malformed_hours() {
        let decision =
            validate_reservation_time("garbage", "also garbage", at(2024, 1, 1, 10, 0), at(2024, 1, 1, 12, 0));
        assert_eq!(decision, WindowDecision::Rejected(RejectionReason::InPast));
    }

    #[test]
    fn malformed_hours_are_a_rejection_not_a_panic() {
        let decision =
            validate_reservation_time("09:00/18:00", "10:00-22:00", at(2024, 1, 1, 10, 0), at(2024, 1, 1, 8, 0));
        assert_eq!(
            decision,
            WindowDecision::Rejected(RejectionReason::MalformedHours)
        );
    }

    #[test]
    fn exact_opening_minute_is_accepted() {
        let now = at(2024, 1, 1, 8, 0);
        assert!(hours().decide(at(2024, 1, 1, 9, 0), now).is_accepted());
    }

    #[test]
    fn exact_closing_minute_is_accepted() {
        // Inclusive upper bound: booking at the closing minute is allowed.
        let now = at(2024, 1, 1, 8, 0);
        assert!(hours().decide(at(2024, 1, 1, 18, 0), now).is_accepted());
    }

    #[test]
    fn seconds_are_ignored_at_the_closing_bound() {
        let now = at(2024, 1, 1, 8, 0);
        let closing_with_seconds = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(18, 0, 45)
            .unwrap();
        assert!(hours().decide(closing_with_seconds, now).is_accepted());
    }

    #[test]
    fn minute_after_close_is_rejected() {
        let now = at(2024, 1, 1, 8, 0);
        assert_eq!(
            hours().decide(at(2024, 1, 1, 18, 1), now),
            WindowDecision::Rejected(RejectionReason::OutsideWeekdayHours)
        );
    }

    #[test]
    fn parses_midnight_close_as_end_of_day() {
        let window = HoursWindow::parse("18:00-24:00").unwrap();
        assert_eq!(window.close, NaiveTime::from_hms_opt(23, 59, 0).unwrap());
        assert!(window.contains(NaiveTime::from_hms_opt(23, 59, 0).unwrap()));
    }

    #[test]
    fn rejects_overnight_windows() {
        let err = HoursWindow::parse("22:00-02:00").unwrap_err();
        assert!(matches!(err, HoursParseError::Inverted { .. }));
    }

    #[test]
    fn rejects_missing_separator_and_bad_times() {
        assert!(matches!(
            HoursWindow::parse("0900 to 1800"),
            Err(HoursParseError::MissingSeparator(_))
        ));
        assert!(matches!(
            HoursWindow::parse("25:00-26:00"),
            Err(HoursParseError::InvalidTime(_))
        ));
    }

    #[test]
    fn tolerates_whitespace_around_times() {
        let window = HoursWindow::parse(" 09:00 - 18:00 ").unwrap();
        assert_eq!(window.open, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }
}
