// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::datetime::{format_datetime, parse_datetime};
use crate::duration::{format_duration, parse_duration};
use crate::error::{Error, Result, ValueKind};
use crate::models::PeriodValue;

/// Split a period at the `/` separating its two halves
///
/// Zone names contain `/` (`America/New_York`), so the search starts after
/// the start's `TZID=<zone>:` prefix when there is one.
fn split_period(text: &str) -> Option<(&str, &str)> {
    let search_from = if text.starts_with("TZID=") {
        text.find(':').map_or(0, |colon| colon + 1)
    } else {
        0
    };

    let slash = search_from + text[search_from..].find('/')?;
    Some((&text[..slash], &text[slash + 1..]))
}

/// Whether the end of a period is written as a duration rather than a date-time
fn is_duration_shaped(text: &str) -> bool {
    let unsigned = text
        .strip_prefix('+')
        .or_else(|| text.strip_prefix('-'))
        .unwrap_or(text);
    unsigned.starts_with('P')
}

/// Parse an iCalendar PERIOD value
///
/// Both `start/end` and `start/duration` forms are accepted; the duration
/// form is resolved to an end instant.
///
/// # Errors
///
/// - [`Error::Format`] if there is no `/` or nothing before it, or if either
///   half fails to parse
/// - [`Error::InvalidInstant`] if the end computed from a duration falls
///   outside years 0000 to 9999
/// - [`Error::Ordering`] if the end is before the start
pub fn parse_period(text: &str) -> Result<PeriodValue> {
    trace!("Parsing period: {}", text);

    let (start_text, end_text) =
        split_period(text).ok_or_else(|| Error::format(ValueKind::Period, text))?;
    if start_text.is_empty() {
        return Err(Error::format(ValueKind::Period, text));
    }

    let start = parse_datetime(start_text)?;
    let end = if is_duration_shaped(end_text) {
        let duration = parse_duration(end_text)?;
        start
            .checked_add(&duration)
            .ok_or_else(|| Error::invalid_instant(text))?
    } else {
        parse_datetime(end_text)?
    };

    PeriodValue::new(start, end)
}

/// Format a period as `start/end`
#[must_use]
pub fn format_period(period: &PeriodValue) -> String {
    format!(
        "{}/{}",
        format_datetime(&period.start()),
        format_datetime(&period.end())
    )
}

/// Format a period as `start/duration`
///
/// # Errors
///
/// Returns [`Error::InvalidInstant`] if the span cannot be expressed as a
/// duration.
pub fn format_period_with_duration(period: &PeriodValue) -> Result<String> {
    let duration = period.duration()?;
    Ok(format!(
        "{}/{}",
        format_datetime(&period.start()),
        format_duration(&duration)?
    ))
}
