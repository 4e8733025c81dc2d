//! Day numbering for Date columns.
//!
//! A Date column stores the calendar day on which an instant falls, as a
//! count of days since 1970-01-01. Which calendar day an instant falls on
//! depends on the time zone, so the numbering is configured once per stream.

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, TimeZone, Utc};

use crate::error::ConfigError;

/// `NaiveDate::num_days_from_ce()` of 1970-01-01.
pub const UNIX_EPOCH_DAY: i64 = 719_163;

/// Time zone used to map instants to calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZoneSetting {
    /// Coordinated Universal Time
    #[default]
    Utc,
    /// The process's local time zone
    Local,
    /// A fixed offset from UTC
    Fixed(FixedOffset),
}

impl std::str::FromStr for TimeZoneSetting {
    type Err = ConfigError;

    /// Accepts `UTC`, `Z`, `local`, or an offset such as `+03:00`, `-0530`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
            return Ok(TimeZoneSetting::Utc);
        }
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(TimeZoneSetting::Local);
        }
        parse_offset(trimmed)
            .map(TimeZoneSetting::Fixed)
            .ok_or_else(|| ConfigError::InvalidTimeZone {
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for TimeZoneSetting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeZoneSetting::Utc => write!(f, "UTC"),
            TimeZoneSetting::Local => write!(f, "local"),
            TimeZoneSetting::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Maps epoch seconds to day numbers under a fixed time zone setting.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayNumbering {
    zone: TimeZoneSetting,
}

impl DayNumbering {
    pub fn new(zone: TimeZoneSetting) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> TimeZoneSetting {
        self.zone
    }

    /// Day number (days since 1970-01-01) of the calendar date on which
    /// `epoch_seconds` falls in the configured zone.
    ///
    /// Saturates at the `i32` bounds for instants outside chrono's range.
    pub fn to_day_num(&self, epoch_seconds: i64) -> i32 {
        let Some(instant) = DateTime::<Utc>::from_timestamp(epoch_seconds, 0) else {
            return if epoch_seconds < 0 { i32::MIN } else { i32::MAX };
        };
        let date = match self.zone {
            TimeZoneSetting::Utc => instant.date_naive(),
            TimeZoneSetting::Local => Local.from_utc_datetime(&instant.naive_utc()).date_naive(),
            TimeZoneSetting::Fixed(offset) => {
                offset.from_utc_datetime(&instant.naive_utc()).date_naive()
            }
        };
        days_since_epoch(date)
    }
}

/// Days between 1970-01-01 and `date`.
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    let days = i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAY;
    days.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
