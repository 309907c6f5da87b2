// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use anyhow::Result;
use chrono::FixedOffset;
use ical_format::{
    DurationValue, Error, InstantValue, PeriodValue, Timezone, format_datetime, format_duration,
    format_period, format_period_with_duration, parse_datetime, parse_duration, parse_period,
};

/// Parsing a UTC timestamp yields the matching civil fields in UTC
#[test]
fn test_parse_utc_timestamp() -> Result<()> {
    let instant = parse_datetime("20030117T032900Z")?;

    assert_eq!(instant.year(), 2003);
    assert_eq!(instant.month(), 1);
    assert_eq!(instant.day(), 17);
    assert_eq!(instant.hour(), 3);
    assert_eq!(instant.minute(), 29);
    assert_eq!(instant.second(), 0);
    assert!(instant.zone().is_utc());
    Ok(())
}

/// Instants in floating, UTC and named zones survive format then parse
#[test]
fn test_datetime_round_trip_across_zones() -> Result<()> {
    let zones = [
        Timezone::Floating,
        Timezone::Utc,
        Timezone::from_tzid("Australia/Sydney").ok_or_else(|| anyhow::anyhow!("missing zone"))?,
    ];

    for zone in zones {
        for (hour, minute, second) in [(0, 0, 0), (23, 59, 59), (12, 0, 1)] {
            let instant = InstantValue::new(1999, 12, 31, hour, minute, second, zone)
                .ok_or_else(|| anyhow::anyhow!("invalid test instant"))?;
            let text = format_datetime(&instant);
            assert_eq!(parse_datetime(&text)?, instant, "round trip of {text}");
        }
    }
    Ok(())
}

/// A bare offset cannot be written, so the instant is converted to UTC
#[test]
fn test_offset_zone_formats_as_utc() -> Result<()> {
    let offset = FixedOffset::west_opt(3600).ok_or_else(|| anyhow::anyhow!("bad offset"))?;
    let instant = InstantValue::new(2003, 1, 17, 15, 30, 0, Timezone::Offset(offset))
        .ok_or_else(|| anyhow::anyhow!("invalid test instant"))?;

    assert_eq!(format_datetime(&instant), "20030117T163000Z");
    assert_eq!(instant.to_string(), "20030117T163000Z");
    Ok(())
}

#[test]
fn test_duration_weeks_and_time_round_trip() -> Result<()> {
    let duration = parse_duration("+P3WT4H55S")?;
    assert_eq!(format_duration(&duration)?, "+P3WT4H55S");
    Ok(())
}

#[test]
fn test_duration_days_are_carried_into_weeks() -> Result<()> {
    let duration = parse_duration("P22DT4H25M3S")?;

    assert_eq!(duration.weeks(), 3);
    assert_eq!(duration.days(), 1);
    assert_eq!(duration.hours(), 4);
    assert_eq!(duration.minutes(), 25);
    assert_eq!(duration.seconds(), 3);
    assert_eq!(format_duration(&duration)?, "+P3W1DT4H25M3S");
    Ok(())
}

#[test]
fn test_duration_without_components_is_rejected() {
    let result = parse_duration("+PT");
    assert!(matches!(result, Err(Error::Format { .. })));
    if let Err(err) = result {
        assert!(err.to_string().contains("+PT"));
    }
}

#[test]
fn test_zero_duration_is_unsigned() -> Result<()> {
    assert_eq!(format_duration(&DurationValue::new(0, 0, 0, 0, 0))?, "+PT0S");
    assert_eq!(
        format_duration(&DurationValue::new(0, 0, 0, 0, 0).negated())?,
        "+PT0S"
    );
    Ok(())
}

/// format then parse keeps the normalized deltas and the sign
#[test]
fn test_duration_round_trip() -> Result<()> {
    let samples = [
        DurationValue::new(0, 22, 4, 25, 3),
        DurationValue::new(1, 9, 0, 0, 0).negated(),
        DurationValue::new(0, 0, 0, 125, 0),
        DurationValue::new(0, 0, 0, 0, 3600),
        DurationValue::new(52, 0, 0, 0, 1).negated(),
    ];

    for duration in samples {
        let text = format_duration(&duration)?;
        let reparsed = parse_duration(&text)?;
        assert_eq!(reparsed, duration, "round trip of {text}");
        assert_eq!(reparsed.delta_days(), duration.delta_days());
        assert_eq!(
            reparsed.delta_minutes() * 60 + reparsed.delta_seconds(),
            duration.delta_minutes() * 60 + duration.delta_seconds()
        );
        assert_eq!(reparsed.is_negative(), duration.is_negative());
    }
    Ok(())
}

#[test]
fn test_duration_with_months_is_unrepresentable() {
    let duration = DurationValue::new(0, 0, 0, 0, 0).with_months(14);
    assert!(matches!(
        format_duration(&duration),
        Err(Error::Unrepresentable { months: 14 })
    ));
}

#[test]
fn test_period_end_before_start_is_rejected() {
    for text in [
        "20030117T032900Z/20030117T032859Z",
        "20030118/20030117",
        "TZID=Europe/London:20030117T120000/20030117T115959Z",
        "20030117T032900Z/-P1D",
    ] {
        assert!(
            matches!(parse_period(text), Err(Error::Ordering { .. })),
            "{text} should be rejected"
        );
    }
}

#[test]
fn test_period_both_forms() -> Result<()> {
    let explicit = parse_period("19970101T180000Z/19970102T070000Z")?;
    let with_duration = parse_period("19970101T180000Z/PT13H")?;

    assert_eq!(explicit, with_duration);
    assert_eq!(
        format_period(&explicit),
        "19970101T180000Z/19970102T070000Z"
    );
    assert_eq!(
        format_period_with_duration(&explicit)?,
        "19970101T180000Z/+PT13H"
    );
    Ok(())
}

#[test]
fn test_period_value_traits() -> Result<()> {
    let period: PeriodValue = "19970101/P1W".parse()?;
    assert_eq!(period.to_string(), "19970101/19970108");
    assert_eq!(format_duration(&period.duration()?)?, "+P1W");
    Ok(())
}
