// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{Error, Result, ValueKind};
use crate::models::{InstantValue, Timezone};
use regex::Regex;
use std::sync::LazyLock;

/// Civil fields in the order they appear in iCalendar date-time text
#[derive(Debug, Clone, Copy)]
enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

/// One accepted date-time shape, selected by exact length
struct Layout {
    len: usize,
    fields: &'static [Field],
    pattern: Regex,
}

#[allow(clippy::expect_used)]
static LAYOUTS: LazyLock<[Layout; 4]> = LazyLock::new(|| {
    use Field::{Day, Hour, Minute, Month, Second, Year};

    let layout = |len: usize, fields: &'static [Field], pattern: &str| Layout {
        len,
        fields,
        pattern: Regex::new(pattern).expect("valid date-time layout regex"),
    };

    [
        layout(
            15,
            &[Year, Month, Day, Hour, Minute, Second],
            r"^(\d{4})(\d\d)(\d\d)T(\d\d)(\d\d)(\d\d)$",
        ),
        layout(
            13,
            &[Year, Month, Day, Hour, Minute],
            r"^(\d{4})(\d\d)(\d\d)T(\d\d)(\d\d)$",
        ),
        layout(11, &[Year, Month, Day, Hour], r"^(\d{4})(\d\d)(\d\d)T(\d\d)$"),
        layout(8, &[Year, Month, Day], r"^(\d{4})(\d\d)(\d\d)$"),
    ]
});

/// Strip the zone designator, returning the bare timestamp and its zone
fn split_zone(text: &str) -> Result<(&str, Timezone)> {
    if let Some(rest) = text.strip_prefix("TZID=")
        && let Some((name, body)) = rest.split_once(':')
        && !name.is_empty()
    {
        let zone = Timezone::from_tzid(name).ok_or_else(|| Error::UnknownTimezone {
            zone: name.to_string(),
            input: text.to_string(),
        })?;
        return Ok((body, zone));
    }

    if let Some(body) = text.strip_suffix('Z') {
        return Ok((body, Timezone::Utc));
    }

    Ok((text, Timezone::Floating))
}

/// Parse an iCalendar DATE or DATE-TIME value
///
/// Accepts `YYYYMMDD`, `YYYYMMDDThh`, `YYYYMMDDThhmm` and `YYYYMMDDThhmmss`,
/// optionally prefixed with `TZID=<zone>:` or suffixed with `Z`.
///
/// # Errors
///
/// - [`Error::Format`] if the text has none of the accepted shapes
/// - [`Error::UnknownTimezone`] if the `TZID` is not in the zone database
/// - [`Error::InvalidInstant`] if the fields are not a real date and time
pub fn parse_datetime(text: &str) -> Result<InstantValue> {
    trace!("Parsing date-time: {}", text);

    let (body, zone) = split_zone(text)?;

    let layout = LAYOUTS
        .iter()
        .find(|layout| layout.len == body.len())
        .ok_or_else(|| Error::format(ValueKind::DateTime, text))?;
    let captures = layout
        .pattern
        .captures(body)
        .ok_or_else(|| Error::format(ValueKind::DateTime, text))?;

    // year, month, day, hour, minute, second
    let mut values = [0_u32; 6];
    for (index, field) in layout.fields.iter().enumerate() {
        values[*field as usize] = captures[index + 1]
            .parse()
            .map_err(|_| Error::format(ValueKind::DateTime, text))?;
    }
    let [year, month, day, hour, minute, second] = values;
    let year = i32::try_from(year).map_err(|_| Error::format(ValueKind::DateTime, text))?;

    InstantValue::new(year, month, day, hour, minute, second, zone)
        .ok_or_else(|| Error::invalid_instant(text))
}

/// Format an instant as an iCalendar DATE or DATE-TIME value
///
/// Midnight is written as a bare date. Instants in a bare UTC offset are
/// converted to UTC first, since the text form cannot carry an offset.
#[must_use]
pub fn format_datetime(instant: &InstantValue) -> String {
    let base = if instant.hour() == 0 && instant.minute() == 0 && instant.second() == 0 {
        format!(
            "{:04}{:02}{:02}",
            instant.year(),
            instant.month(),
            instant.day()
        )
    } else {
        format!(
            "{:04}{:02}{:02}T{:02}{:02}{:02}",
            instant.year(),
            instant.month(),
            instant.day(),
            instant.hour(),
            instant.minute(),
            instant.second()
        )
    };

    match instant.zone() {
        Timezone::Floating => base,
        Timezone::Utc => format!("{base}Z"),
        Timezone::Named(tz) => format!("TZID={}:{base}", tz.name()),
        Timezone::Offset(_) => format_datetime(&instant.to_utc()),
    }
}
