// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fmt;
use thiserror::Error;

/// The iCalendar value grammar a piece of text was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    DateTime,
    Duration,
    Period,
    Recurrence,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DateTime => "date-time",
            Self::Duration => "duration",
            Self::Period => "period",
            Self::Recurrence => "recurrence rule",
        };
        f.write_str(name)
    }
}

/// Errors raised by the codecs and the recurrence bridge
#[derive(Debug, Error)]
pub enum Error {
    /// Text does not match the grammar for its value type
    #[error("invalid iCalendar {kind}: '{input}'")]
    Format { kind: ValueKind, input: String },

    /// A `TZID=` prefix names a zone missing from the time zone database
    #[error("unknown time zone '{zone}' in '{input}'")]
    UnknownTimezone { zone: String, input: String },

    /// The fields parsed but do not name a real calendar instant
    #[error("'{input}' does not name a valid calendar date-time")]
    InvalidInstant { input: String },

    /// A period ends before it starts
    #[error("period end {end} is before its start {start}")]
    Ordering { start: String, end: String },

    /// iCalendar durations have no month or year designators
    #[error("cannot represent a duration of {months} month(s) in iCalendar")]
    Unrepresentable { months: i64 },

    /// Recurrence expansion needs a parameter that was not supplied
    #[error("recurrence parameter '{0}' is required")]
    MissingParameter(&'static str),

    /// The recurrence engine rejected the normalized rule
    #[error("recurrence rule rejected: {0}")]
    Recurrence(#[from] rrule::RRuleError),
}

impl Error {
    pub(crate) fn format(kind: ValueKind, input: &str) -> Self {
        Self::Format {
            kind,
            input: input.to_string(),
        }
    }

    pub(crate) fn invalid_instant(input: &str) -> Self {
        Self::InvalidInstant {
            input: input.to_string(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
