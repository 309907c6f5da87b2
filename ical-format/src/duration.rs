// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{Error, Result, ValueKind};
use crate::models::DurationValue;
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-])?P(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
        .expect("valid duration regex")
});

/// Parse an iCalendar DURATION value (`[+-]P[nW][nD][T[nH][nM][nS]]`)
///
/// Components are kept exactly as written: `P22D` stays 22 days rather than
/// becoming 3 weeks and 1 day.
///
/// # Errors
///
/// Returns [`Error::Format`] if the text does not match the grammar, if no
/// component is present (`P`, `PT`), or if a component overflows.
pub fn parse_duration(text: &str) -> Result<DurationValue> {
    trace!("Parsing duration: {}", text);

    let captures = DURATION
        .captures(text)
        .ok_or_else(|| Error::format(ValueKind::Duration, text))?;

    // weeks, days, hours, minutes, seconds
    let mut components = [0_u32; 5];
    let mut present = false;
    for (index, component) in components.iter_mut().enumerate() {
        if let Some(group) = captures.get(index + 2) {
            *component = group
                .as_str()
                .parse()
                .map_err(|_| Error::format(ValueKind::Duration, text))?;
            present = true;
        }
    }

    if !present {
        return Err(Error::format(ValueKind::Duration, text));
    }

    let [weeks, days, hours, minutes, seconds] = components;
    let duration = DurationValue::new(weeks, days, hours, minutes, seconds);

    Ok(if captures.get(1).is_some_and(|sign| sign.as_str() == "-") {
        duration.negated()
    } else {
        duration
    })
}

/// Format a duration as an iCalendar DURATION value
///
/// Days are carried into weeks and minutes into hours. Any duration with no
/// day, minute or second delta is written as `+PT0S`.
///
/// # Errors
///
/// Returns [`Error::Unrepresentable`] if the duration has a month component.
pub fn format_duration(duration: &DurationValue) -> Result<String> {
    if duration.delta_months() != 0 {
        return Err(Error::Unrepresentable {
            months: duration.delta_months(),
        });
    }

    if duration.delta_days() == 0 && duration.delta_minutes() == 0 && duration.delta_seconds() == 0
    {
        return Ok("+PT0S".to_string());
    }

    let mut ical = String::from(if duration.is_positive() { "+P" } else { "-P" });

    if duration.delta_days() != 0 {
        if duration.weeks() != 0 {
            ical.push_str(&format!("{}W", duration.weeks()));
        }
        if duration.days() != 0 {
            ical.push_str(&format!("{}D", duration.days()));
        }
    }

    if duration.delta_minutes() != 0 || duration.delta_seconds() != 0 {
        ical.push('T');
        if duration.hours() != 0 {
            ical.push_str(&format!("{}H", duration.hours()));
        }
        if duration.minutes() != 0 {
            ical.push_str(&format!("{}M", duration.minutes()));
        }
        if duration.seconds() != 0 {
            ical.push_str(&format!("{}S", duration.seconds()));
        }
    }

    trace!("Formatted duration: {}", ical);
    Ok(ical)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weeks_and_time() {
        let duration = parse_duration("+P3WT4H55S").unwrap();
        assert_eq!(duration.weeks(), 3);
        assert_eq!(duration.days(), 0);
        assert_eq!(duration.hours(), 4);
        assert_eq!(duration.minutes(), 0);
        assert_eq!(duration.seconds(), 55);
        assert!(duration.is_positive());
        assert_eq!(format_duration(&duration).unwrap(), "+P3WT4H55S");
    }

    #[test]
    fn test_parse_days_carry_on_format() {
        let duration = parse_duration("P22DT4H25M3S").unwrap();
        assert_eq!(duration.delta_days(), 22);
        assert_eq!(duration.weeks(), 3);
        assert_eq!(duration.days(), 1);
        assert_eq!(duration.hours(), 4);
        assert_eq!(duration.minutes(), 25);
        assert_eq!(duration.seconds(), 3);
        assert_eq!(format_duration(&duration).unwrap(), "+P3W1DT4H25M3S");
    }

    #[test]
    fn test_parse_negative() {
        let duration = parse_duration("-P1W2D").unwrap();
        assert!(duration.is_negative());
        assert_eq!(duration.delta_days(), -9);
        assert_eq!(format_duration(&duration).unwrap(), "-P1W2D");

        let duration = parse_duration("-PT15M").unwrap();
        assert_eq!(duration.delta_minutes(), -15);
        assert_eq!(format_duration(&duration).unwrap(), "-PT15M");
    }

    #[test]
    fn test_parse_rejects_empty_durations() {
        for text in ["P", "+P", "-P", "PT", "+PT", "-PT"] {
            assert!(
                matches!(
                    parse_duration(text),
                    Err(Error::Format { kind: ValueKind::Duration, .. })
                ),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_bad_grammar() {
        for text in [
            "",
            "3W",
            "P1H",
            "P1Y",
            "P1M",
            "p1d",
            "P-3W",
            "P3DT4H5M6",
            "P1D1W",
            "PT1S1M",
            " P1D",
            "P99999999999D",
        ] {
            assert!(parse_duration(text).is_err(), "{text} should be rejected");
        }
    }

    #[test]
    fn test_parse_keeps_uncarried_components() {
        let duration = parse_duration("PT90M90S").unwrap();
        assert_eq!(duration.delta_minutes(), 90);
        assert_eq!(duration.delta_seconds(), 90);
        assert_eq!(format_duration(&duration).unwrap(), "+PT1H30M90S");
    }

    #[test]
    fn test_parse_trailing_time_marker() {
        let duration = parse_duration("P1DT").unwrap();
        assert_eq!(format_duration(&duration).unwrap(), "+P1D");
    }

    #[test]
    fn test_canonical_zero() {
        assert_eq!(format_duration(&DurationValue::default()).unwrap(), "+PT0S");
        assert_eq!(
            format_duration(&DurationValue::default().negated()).unwrap(),
            "+PT0S"
        );
        assert_eq!(format_duration(&parse_duration("-P0D").unwrap()).unwrap(), "+PT0S");
        assert_eq!(format_duration(&parse_duration("PT0H0M0S").unwrap()).unwrap(), "+PT0S");
    }

    #[test]
    fn test_format_rejects_months() {
        let duration = DurationValue::new(0, 1, 0, 0, 0).with_months(2);
        assert!(matches!(
            format_duration(&duration),
            Err(Error::Unrepresentable { months: 2 })
        ));

        // a month-only duration is rejected before the zero check
        let months_only = DurationValue::default().with_months(1);
        assert!(format_duration(&months_only).is_err());
    }

    #[test]
    fn test_format_omits_zero_components() {
        let duration = DurationValue::new(2, 0, 0, 0, 0);
        assert_eq!(format_duration(&duration).unwrap(), "+P2W");

        let duration = DurationValue::new(0, 0, 1, 0, 0);
        assert_eq!(format_duration(&duration).unwrap(), "+PT1H");

        let duration = DurationValue::new(0, 7, 0, 0, 0);
        assert_eq!(format_duration(&duration).unwrap(), "+P1W");
    }

    #[test]
    fn test_round_trip_preserves_deltas() {
        for text in ["P15DT5H0M20S", "P2W", "-PT10H11M12S", "+P3DT4H5M6S", "PT30S", "P22D"] {
            let duration = parse_duration(text).unwrap();
            let reparsed = parse_duration(&format_duration(&duration).unwrap()).unwrap();
            assert_eq!(reparsed, duration, "{text}");
            assert_eq!(reparsed.is_negative(), duration.is_negative());
        }
    }
}
