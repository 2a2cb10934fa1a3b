use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day with no time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayParseError {
    input: String,
}

impl fmt::Display for DayParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid day '{}' (expected YYYY-MM-DD or an ISO-8601 timestamp)",
            self.input
        )
    }
}

impl std::error::Error for DayParseError {}

impl Day {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// The day `days` calendar days after this one.
    pub fn offset(self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Parses a stored day, reading timestamps in the local time zone.
    ///
    /// Plain dates and naive date-times are taken as written. A timestamp
    /// with an offset names an instant; it is converted to local time first,
    /// so a local midnight saved as UTC reads back as the same calendar day.
    pub fn parse(input: &str) -> Result<Self, DayParseError> {
        Self::parse_in(input, &Local)
    }

    /// Same as [`Day::parse`], converting timestamps into `tz`.
    pub fn parse_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<Self, DayParseError> {
        let trimmed = input.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DAY_FORMAT) {
            return Ok(Self(date));
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(instant.with_timezone(tz).date_naive()));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self(naive.date()));
            }
        }
        Err(DayParseError {
            input: input.to_string(),
        })
    }
}

impl From<NaiveDate> for Day {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl From<Day> for NaiveDate {
    fn from(value: Day) -> Self {
        value.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for Day {
    type Err = DayParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Day {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Day::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// De-duplicates by calendar day and sorts ascending.
pub fn sort_unique_days<I>(days: I) -> Vec<Day>
where
    I: IntoIterator<Item = Day>,
{
    let mut unique: Vec<Day> = days.into_iter().collect();
    unique.sort_unstable();
    unique.dedup();
    unique
}

/// Consecutive days starting at `start`, one per slot.
pub fn consecutive_days(start: Day, count: usize) -> Vec<Day> {
    (0..count).map(|i| start.offset(i as i64)).collect()
}

/// Resolves the day sequence a schedule is built over.
///
/// A non-empty selection is de-duplicated and sorted. An empty selection
/// falls back to one consecutive day per sprint slot starting at `today`.
/// With no sprint slots at all there is nowhere to place a day, so the
/// result is empty.
pub fn effective_days(selected: &[Day], sprint_count: usize, today: Day) -> Vec<Day> {
    if sprint_count == 0 {
        return Vec::new();
    }
    if !selected.is_empty() {
        return sort_unique_days(selected.iter().copied());
    }
    sort_unique_days(consecutive_days(today, sprint_count))
}

/// Adds `day` to the selection, or removes every entry on that calendar day
/// when it is already selected.
pub fn toggle_day(selected: &mut Vec<Day>, day: Day) {
    if selected.contains(&day) {
        selected.retain(|d| *d != day);
    } else {
        selected.push(day);
    }
}

/// Longest span [`days_in_range`] will expand.
pub const MAX_RANGE_DAYS: usize = 3660;

/// All days from `start` to `end` inclusive. Empty when `start > end`;
/// `None` when the range holds more than [`MAX_RANGE_DAYS`] days.
pub fn days_in_range(start: Day, end: Day) -> Option<Vec<Day>> {
    if start > end {
        return Some(Vec::new());
    }
    let span = (end.date() - start.date()).num_days();
    if span >= MAX_RANGE_DAYS as i64 {
        return None;
    }
    Some((0..=span).map(|i| start.offset(i)).collect())
}
