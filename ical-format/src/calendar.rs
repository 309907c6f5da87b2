// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar arithmetic over [`InstantValue`] and [`DurationValue`], backed
//! by `chrono` and `chrono-tz`.
//!
//! Floating instants are read as UTC whenever they have to be placed on the
//! absolute timeline (comparison, zone conversion).

use crate::models::{DurationValue, InstantValue, Timezone};
use chrono::{DateTime, Datelike, Months, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;
use std::cmp::Ordering;
use std::ops::RangeInclusive;

/// Years the four-digit iCalendar form can carry
const YEARS: RangeInclusive<i32> = 0..=9999;

/// Place a wall clock time in a named zone
///
/// Ambiguous times take the earlier offset. Times inside a transition gap
/// take the offset in effect a day before, which moves them past the gap.
/// Returns `None` at the ends of the supported date range.
fn resolve_local(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    if let Some(resolved) = tz.from_local_datetime(&local).earliest() {
        return Some(resolved);
    }

    let offset = tz
        .offset_from_utc_datetime(&local.checked_sub_signed(TimeDelta::days(1))?)
        .fix();
    let utc = local.checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))?;
    Some(tz.from_utc_datetime(&utc))
}

/// UTC wall clock time of a civil time in `zone`
fn checked_utc(local: NaiveDateTime, zone: Timezone) -> Option<NaiveDateTime> {
    match zone {
        Timezone::Floating | Timezone::Utc => Some(local),
        Timezone::Named(tz) => resolve_local(tz, local).map(|resolved| resolved.naive_utc()),
        Timezone::Offset(offset) => {
            local.checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
        }
    }
}

/// Civil time in `zone` of a UTC wall clock time
fn checked_local(utc: NaiveDateTime, zone: Timezone) -> Option<NaiveDateTime> {
    match zone {
        Timezone::Floating | Timezone::Utc => Some(utc),
        Timezone::Named(tz) => {
            YEARS.contains(&utc.year()).then(|| tz.from_utc_datetime(&utc).naive_local())
        }
        Timezone::Offset(offset) => {
            utc.checked_add_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
        }
    }
}

impl InstantValue {
    /// Wrap a civil date-time whose local and UTC years both fit four digits
    pub(crate) fn checked_from_local(local: NaiveDateTime, zone: Timezone) -> Option<Self> {
        let utc = checked_utc(local, zone)?;
        (YEARS.contains(&local.year()) && YEARS.contains(&utc.year()))
            .then(|| Self::from_local(local, zone))
    }

    /// The instant as a UTC wall clock time
    #[must_use]
    pub fn utc_naive(&self) -> NaiveDateTime {
        // in range for every instant built through `checked_from_local`
        checked_utc(self.local(), self.zone()).unwrap_or_else(|| self.local())
    }

    /// The same instant expressed in another zone
    ///
    /// Converting to [`Timezone::Floating`] keeps the UTC wall clock time.
    /// Returns `None` if the result falls outside years 0000 to 9999.
    #[must_use]
    pub fn with_zone(&self, zone: Timezone) -> Option<Self> {
        if zone == self.zone() {
            return Some(*self);
        }

        Self::checked_from_local(checked_local(self.utc_naive(), zone)?, zone)
    }

    #[must_use]
    pub fn to_utc(&self) -> Self {
        Self::from_local(self.utc_naive(), Timezone::Utc)
    }

    /// Chronological ordering on the absolute timeline
    #[must_use]
    pub fn cmp_instant(&self, other: &Self) -> Ordering {
        self.utc_naive().cmp(&other.utc_naive())
    }

    /// Add a duration
    ///
    /// Months and days move the wall clock date; hours, minutes and seconds
    /// move along the absolute timeline. Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, duration: &DurationValue) -> Option<Self> {
        let mut local = self.local();

        let months = duration.delta_months();
        if months != 0 {
            let step = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
            local = if months > 0 {
                local.checked_add_months(step)?
            } else {
                local.checked_sub_months(step)?
            };
        }

        local = local.checked_add_signed(TimeDelta::try_days(duration.delta_days())?)?;
        // every component shares the sign, so time cannot bring it back
        if !YEARS.contains(&local.year()) {
            return None;
        }

        let elapsed = TimeDelta::try_seconds(
            duration
                .delta_minutes()
                .checked_mul(60)?
                .checked_add(duration.delta_seconds())?,
        )?;

        let local = match self.zone() {
            Timezone::Named(tz) => {
                let utc = resolve_local(tz, local)?
                    .naive_utc()
                    .checked_add_signed(elapsed)?;
                checked_local(utc, self.zone())?
            }
            _ => local.checked_add_signed(elapsed)?,
        };

        Self::checked_from_local(local, self.zone())
    }

    /// Duration that, added to `earlier`, lands on this instant
    ///
    /// Whole days are counted on `earlier`'s wall clock; the remainder is
    /// absolute time split into minutes and seconds. Returns `None` if the
    /// span does not fit the duration components.
    #[must_use]
    pub fn duration_since(&self, earlier: &Self) -> Option<DurationValue> {
        let (from, to, negative) = match self.cmp_instant(earlier) {
            Ordering::Less => (self, earlier, true),
            _ => (earlier, self, false),
        };

        let to_local = checked_local(to.utc_naive(), from.zone())?;
        let mut days = to_local
            .date()
            .signed_duration_since(from.local().date())
            .num_days()
            .max(0);

        let mut anchor = from.checked_add(&day_span(days)?)?;
        while days > 0 && anchor.cmp_instant(to) == Ordering::Greater {
            days -= 1;
            anchor = from.checked_add(&day_span(days)?)?;
        }

        let remainder = to
            .utc_naive()
            .signed_duration_since(anchor.utc_naive())
            .num_seconds();
        let remainder = u64::try_from(remainder).ok()?;

        let duration = DurationValue::new(
            0,
            u32::try_from(days).ok()?,
            0,
            u32::try_from(remainder / 60).ok()?,
            u32::try_from(remainder % 60).ok()?,
        );

        Some(if negative { duration.negated() } else { duration })
    }
}

fn day_span(days: i64) -> Option<DurationValue> {
    Some(DurationValue::new(0, u32::try_from(days).ok()?, 0, 0, 0))
}
