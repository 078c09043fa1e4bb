//! Calendar date types for logbook.
//!
//! [`DateKey`] is the canonical identity of a day (`YYYY-MM-DD`) and
//! [`YearMonth`] is the month cursor used for navigation.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Storage format of a [`DateKey`].
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar day in its canonical `YYYY-MM-DD` form.
///
/// Two keys are equal iff their string forms are equal. Parsing only accepts
/// the zero-padded canonical spelling, so `2025-10-6` is rejected rather than
/// silently becoming a second key for the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Wrap a calendar date.
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a key from year, month and day, if they name a real date.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The underlying calendar date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The month this day belongs to.
    #[must_use]
    pub fn month(&self) -> YearMonth {
        YearMonth::containing(self.0)
    }

    /// Human label such as `Oct 6, 2025`.
    #[must_use]
    pub fn label(&self) -> String {
        self.0.format("%b %-d, %Y").to_string()
    }

    /// Short weekday name such as `Mon`.
    #[must_use]
    pub fn weekday_label(&self) -> String {
        self.0.format("%a").to_string()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| Error::invalid_date(s))?;
        let key = Self(date);
        // chrono tolerates unpadded fields; only the canonical spelling is a key
        if key.to_string() != s {
            return Err(Error::invalid_date(s));
        }
        Ok(key)
    }
}

impl TryFrom<String> for DateKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// A calendar month, stored as its first day.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// Build a month from a year and a 1-based month number.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self(date - Days::new(u64::from(date.day0())))
    }

    /// Calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month number, 1 through 12.
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// First day of the month.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// The following month, or `None` past the end of the calendar.
    #[must_use]
    pub fn succ(&self) -> Option<Self> {
        self.shifted(1)
    }

    /// The preceding month, or `None` before the start of the calendar.
    #[must_use]
    pub fn pred(&self) -> Option<Self> {
        self.shifted(-1)
    }

    /// The month `months` away from this one, in either direction.
    #[must_use]
    pub fn shifted(&self, months: i32) -> Option<Self> {
        let step = Months::new(months.unsigned_abs());
        if months < 0 {
            self.0.checked_sub_months(step).map(Self)
        } else {
            self.0.checked_add_months(step).map(Self)
        }
    }

    /// Every day of the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.0.month();
        self.0.iter_days().take_while(move |d| d.month() == month)
    }

    /// Long title such as `October 2025`.
    #[must_use]
    pub fn title(&self) -> String {
        self.0.format("%B %Y").to_string()
    }

    /// Short selector label such as `Oct 25`.
    #[must_use]
    pub fn short_label(&self) -> String {
        self.0.format("%b %y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&format!("{s}-01"), DATE_FORMAT)
            .map_err(|_| Error::invalid_month(s))?;
        let month = Self(date);
        if month.to_string() != s {
            return Err(Error::invalid_month(s));
        }
        Ok(month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(month: YearMonth) -> Self {
        month.to_string()
    }
}
