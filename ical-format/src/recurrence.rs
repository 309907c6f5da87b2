// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::datetime::{format_datetime, parse_datetime};
use crate::error::{Error, Result, ValueKind};
use crate::models::{InstantValue, Timezone};
use chrono::Utc;
use rrule::RRuleSet;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Keys that bound an expansion rather than describe the rule itself
const BOUND_KEYS: [&str; 2] = ["dtstart", "dtend"];

/// A single recurrence parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Scalar keyword value such as `freq` or `count`
    Text(String),

    /// Comma-separated `BY*` value
    List(Vec<String>),

    /// Parsed `until`, or a caller-supplied bound such as `dtstart`
    Instant(InstantValue),
}

/// Normalized recurrence rule parameters, keyed by lower-cased keyword
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecurrenceParams {
    entries: BTreeMap<String, ParamValue>,
}

impl RecurrenceParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert) for an instant value
    #[must_use]
    pub fn with_instant(mut self, key: &str, instant: InstantValue) -> Self {
        self.insert(key, ParamValue::Instant(instant));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ParamValue) -> Option<ParamValue> {
        self.entries.insert(key.into(), value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            ParamValue::Text(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.entries.get(key)? {
            ParamValue::List(values) => Some(values),
            _ => None,
        }
    }

    #[must_use]
    pub fn instant(&self, key: &str) -> Option<InstantValue> {
        match self.entries.get(key)? {
            ParamValue::Instant(instant) => Some(*instant),
            _ => None,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rule entries with `freq` first, then the rest in key order
    fn rule_entries(&self) -> Vec<(&str, &ParamValue)> {
        let mut entries: Vec<_> = self
            .entries()
            .filter(|(key, _)| !BOUND_KEYS.contains(key))
            .collect();
        entries.sort_by_key(|(key, _)| *key != "freq");
        entries
    }
}

/// Translate an RRULE value into normalized parameters
///
/// Keywords are lower-cased, as are all values except `until`. `BY*`
/// values become lists. The tokens are merged into `extra` (a token wins
/// over an extra entry with the same key) and a textual `until` is finally
/// replaced by the parsed instant. Keywords are not validated; that is left
/// to the recurrence engine.
///
/// # Errors
///
/// - [`Error::Format`] if a token has no `=`
/// - any error from [`parse_datetime`] for the `until` value
pub fn parse_recurrence(text: &str, extra: RecurrenceParams) -> Result<RecurrenceParams> {
    trace!("Parsing recurrence rule: {}", text);

    let mut params = extra;

    for token in text.split(';').filter(|token| !token.is_empty()) {
        let (name, value) = token
            .split_once('=')
            .ok_or_else(|| Error::format(ValueKind::Recurrence, text))?;

        let name = name.to_ascii_lowercase();
        let value = if name == "until" {
            value.to_string()
        } else {
            value.to_ascii_lowercase()
        };

        let value = if name.starts_with("by") {
            ParamValue::List(value.split(',').map(String::from).collect())
        } else {
            ParamValue::Text(value)
        };

        params.insert(name, value);
    }

    if let Some(until) = params.text("until") {
        let until = parse_datetime(until)?;
        params.insert("until", ParamValue::Instant(until));
    }

    Ok(params)
}

/// Format parameters back into an RRULE value
///
/// Keywords and textual values are upper-cased. A named-zone `until` is
/// written in UTC, since a rule cannot carry a `TZID`. `dtstart` and
/// `dtend` are not part of the rule and are left out.
#[must_use]
pub fn format_recurrence(params: &RecurrenceParams) -> String {
    params
        .rule_entries()
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                ParamValue::Text(text) => text.to_ascii_uppercase(),
                ParamValue::List(values) => values.join(",").to_ascii_uppercase(),
                ParamValue::Instant(instant) if instant.zone().is_named() => {
                    format_datetime(&instant.to_utc())
                }
                ParamValue::Instant(instant) => format_datetime(instant),
            };
            format!("{}={value}", key.to_ascii_uppercase())
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// `DTSTART` line for the recurrence engine
///
/// Named zones keep their wall clock so expansion follows daylight-saving
/// changes; every other zone is handed over in UTC.
fn engine_dtstart(start: &InstantValue) -> String {
    match start.zone() {
        Timezone::Named(tz) => format!(
            "DTSTART;TZID={}:{}",
            tz.name(),
            start.local().format("%Y%m%dT%H%M%S")
        ),
        _ => format!("DTSTART:{}", start.utc_naive().format("%Y%m%dT%H%M%SZ")),
    }
}

/// RRULE line for the recurrence engine, with `UNTIL` normalized to UTC
fn engine_rule(params: &RecurrenceParams) -> Result<String> {
    let mut parts = Vec::new();

    for (key, value) in params.rule_entries() {
        let value = match (key, value) {
            ("until", ParamValue::Text(text)) => until_to_utc(&parse_datetime(text)?),
            (_, ParamValue::Instant(instant)) => until_to_utc(instant),
            (_, ParamValue::Text(text)) => text.to_ascii_uppercase(),
            (_, ParamValue::List(values)) => values.join(",").to_ascii_uppercase(),
        };
        parts.push(format!("{}={value}", key.to_ascii_uppercase()));
    }

    Ok(format!("RRULE:{}", parts.join(";")))
}

/// Floating times are read as UTC, matching how `DTSTART` is handed over
fn until_to_utc(until: &InstantValue) -> String {
    until.utc_naive().format("%Y%m%dT%H%M%SZ").to_string()
}

/// Occurrences of a recurrence rule, produced by the `rrule` engine
///
/// Built from parameters carrying a `dtstart` instant and, optionally, a
/// `dtend` instant that bounds the occurrences (inclusive).
#[derive(Debug, Clone)]
pub struct RecurrenceSet {
    set: RRuleSet,
    start: InstantValue,
    end: Option<InstantValue>,
}

impl RecurrenceSet {
    /// Hand normalized parameters to the recurrence engine
    ///
    /// # Errors
    ///
    /// - [`Error::MissingParameter`] if there is no `dtstart` instant
    /// - [`Error::Recurrence`] if the engine rejects the rule
    /// - any error from [`parse_datetime`] for a textual `until`
    pub fn new(params: &RecurrenceParams) -> Result<Self> {
        let start = params
            .instant("dtstart")
            .ok_or(Error::MissingParameter("dtstart"))?;
        let end = params.instant("dtend");

        let text = format!("{}\n{}", engine_dtstart(&start), engine_rule(params)?);
        debug!("Handing recurrence to engine: {}", text.replace('\n', " "));

        let set = text.parse::<RRuleSet>()?;

        Ok(Self { set, start, end })
    }

    /// The instant the recurrence is anchored at
    #[must_use]
    pub const fn start(&self) -> InstantValue {
        self.start
    }

    /// Lazily iterate occurrences in increasing order
    ///
    /// Occurrences are expressed in the zone of `dtstart`. Every call starts
    /// over from the first occurrence; a rule without `COUNT`, `UNTIL` or
    /// `dtend` runs until year 9999.
    pub fn iter(&self) -> impl Iterator<Item = InstantValue> + '_ {
        let zone = self.start.zone();

        (&self.set)
            .into_iter()
            .map_while(move |occurrence| {
                InstantValue::checked_from_local(
                    occurrence.with_timezone(&Utc).naive_utc(),
                    Timezone::Utc,
                )?
                .with_zone(zone)
            })
            .take_while(move |occurrence| {
                self.end
                    .is_none_or(|end| occurrence.cmp_instant(&end) != Ordering::Greater)
            })
    }

    /// Collect at most `limit` occurrences
    #[must_use]
    pub fn take(&self, limit: usize) -> Vec<InstantValue> {
        self.iter().take(limit).collect()
    }
}
