// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{Error, Result};
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Time zone designator attached to an [`InstantValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timezone {
    /// No zone; the civil time is read as-is wherever it is used
    Floating,

    /// Coordinated Universal Time (`Z` suffix)
    Utc,

    /// An Olson zone from the time zone database (`TZID=` prefix)
    Named(Tz),

    /// A bare UTC offset, which iCalendar text cannot carry
    Offset(FixedOffset),
}

impl Timezone {
    /// Resolve a `TZID` parameter value against the time zone database
    #[must_use]
    pub fn from_tzid(name: &str) -> Option<Self> {
        match name.parse::<Tz>().ok()? {
            Tz::UTC => Some(Self::Utc),
            tz => Some(Self::Named(tz)),
        }
    }

    #[must_use]
    pub const fn is_floating(&self) -> bool {
        matches!(self, Self::Floating)
    }

    #[must_use]
    pub const fn is_utc(&self) -> bool {
        matches!(self, Self::Utc)
    }

    #[must_use]
    pub const fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }

    /// Olson name of a named zone
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Named(tz) => Some(tz.name()),
            _ => None,
        }
    }
}

/// A civil date-time together with its time zone designator
///
/// The six civil fields are always present; a date-only value has a
/// midnight time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstantValue {
    local: NaiveDateTime,
    zone: Timezone,
}

impl InstantValue {
    /// Build an instant from its civil fields
    ///
    /// Returns `None` if the fields are not a real calendar date and time,
    /// if the local time falls in a daylight-saving gap of a named zone, or
    /// if the local or UTC year falls outside 0000 to 9999.
    #[must_use]
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        zone: Timezone,
    ) -> Option<Self> {
        let local = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;

        if let Timezone::Named(tz) = zone
            && tz.from_local_datetime(&local).earliest().is_none()
        {
            return None;
        }

        Self::checked_from_local(local, zone)
    }

    /// Wrap an already-valid civil date-time
    pub(crate) const fn from_local(local: NaiveDateTime, zone: Timezone) -> Self {
        Self { local, zone }
    }

    /// The civil (wall clock) date-time
    #[must_use]
    pub const fn local(&self) -> NaiveDateTime {
        self.local
    }

    #[must_use]
    pub const fn zone(&self) -> Timezone {
        self.zone
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.local.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.local.month()
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.local.day()
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    #[must_use]
    pub fn minute(&self) -> u32 {
        self.local.minute()
    }

    #[must_use]
    pub fn second(&self) -> u32 {
        self.local.second()
    }
}

impl fmt::Display for InstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::datetime::format_datetime(self))
    }
}

impl FromStr for InstantValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::datetime::parse_datetime(s)
    }
}

impl Serialize for InstantValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A signed iCalendar duration
///
/// Components are stored exactly as given; the accessors below expose the
/// normalized view (days carried into weeks, minutes into hours). Seconds
/// are never carried into minutes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationValue {
    negative: bool,
    months: u32,
    weeks: u32,
    days: u32,
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl DurationValue {
    /// A positive duration from its week, day and time components
    #[must_use]
    pub const fn new(weeks: u32, days: u32, hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            negative: false,
            months: 0,
            weeks,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// The same magnitudes with the opposite sign
    #[must_use]
    pub const fn negated(self) -> Self {
        Self {
            negative: !self.negative,
            ..self
        }
    }

    /// Add a month component; such durations cannot be formatted
    #[must_use]
    pub const fn with_months(self, months: u32) -> Self {
        Self { months, ..self }
    }

    const fn sign(&self) -> i64 {
        if self.negative { -1 } else { 1 }
    }

    #[must_use]
    pub fn delta_months(&self) -> i64 {
        self.sign() * i64::from(self.months)
    }

    #[must_use]
    pub fn delta_days(&self) -> i64 {
        self.sign() * (i64::from(self.weeks) * 7 + i64::from(self.days))
    }

    #[must_use]
    pub fn delta_minutes(&self) -> i64 {
        self.sign() * (i64::from(self.hours) * 60 + i64::from(self.minutes))
    }

    #[must_use]
    pub fn delta_seconds(&self) -> i64 {
        self.sign() * i64::from(self.seconds)
    }

    #[must_use]
    pub fn weeks(&self) -> u64 {
        self.delta_days().unsigned_abs() / 7
    }

    #[must_use]
    pub fn days(&self) -> u64 {
        self.delta_days().unsigned_abs() % 7
    }

    #[must_use]
    pub fn hours(&self) -> u64 {
        self.delta_minutes().unsigned_abs() / 60
    }

    #[must_use]
    pub fn minutes(&self) -> u64 {
        self.delta_minutes().unsigned_abs() % 60
    }

    #[must_use]
    pub fn seconds(&self) -> u64 {
        self.delta_seconds().unsigned_abs()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.delta_months() == 0
            && self.delta_days() == 0
            && self.delta_minutes() == 0
            && self.delta_seconds() == 0
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.is_zero()
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative && !self.is_zero()
    }

    fn normalized(&self) -> (i64, i64, i64, i64) {
        (
            self.delta_months(),
            self.delta_days(),
            self.delta_minutes(),
            self.delta_seconds(),
        )
    }
}

impl PartialEq for DurationValue {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for DurationValue {}

impl FromStr for DurationValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::duration::parse_duration(s)
    }
}

/// A closed interval of time whose end never precedes its start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodValue {
    start: InstantValue,
    end: InstantValue,
}

impl PeriodValue {
    /// Build a period from its two bounds
    ///
    /// # Errors
    ///
    /// Returns [`Error::Ordering`] if `end` is chronologically before `start`.
    pub fn new(start: InstantValue, end: InstantValue) -> Result<Self> {
        if end.cmp_instant(&start) == Ordering::Less {
            return Err(Error::Ordering {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> InstantValue {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> InstantValue {
        self.end
    }

    /// Elapsed time from start to end
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInstant`] if the span does not fit a duration.
    pub fn duration(&self) -> Result<DurationValue> {
        self.end
            .duration_since(&self.start)
            .ok_or_else(|| Error::invalid_instant(&crate::period::format_period(self)))
    }
}

impl fmt::Display for PeriodValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::period::format_period(self))
    }
}

impl FromStr for PeriodValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::period::parse_period(s)
    }
}
