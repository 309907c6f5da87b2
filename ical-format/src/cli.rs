// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ical_format::{
    RecurrenceParams, RecurrenceSet, format_datetime, format_duration, format_period,
    format_period_with_duration, format_recurrence, parse_datetime, parse_duration, parse_period,
    parse_recurrence,
};
use serde_json::{Value, json};
use std::path::PathBuf;

/// Parse and format iCalendar date-time, duration, period and recurrence values
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a DATE or DATE-TIME value (or path to file containing it)
    Datetime { value: String },

    /// Parse a DURATION value (or path to file containing it)
    Duration { value: String },

    /// Parse a PERIOD value (or path to file containing it)
    Period {
        value: String,

        /// Write the period as start/duration instead of start/end
        #[arg(long)]
        with_duration: bool,
    },

    /// Normalize an RRULE value (or path to file containing it)
    Rrule {
        value: String,

        /// First occurrence; when given, occurrences are listed
        #[arg(long)]
        dtstart: Option<String>,

        /// Last instant an occurrence may fall on
        #[arg(long)]
        dtend: Option<String>,

        /// Maximum number of occurrences to list
        #[arg(long, env = "ICAL_FORMAT_LIMIT", default_value = "10")]
        limit: usize,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Run the selected command, producing its JSON report
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be loaded or is not a valid
    /// value of the requested kind.
    pub fn run(&self) -> Result<Value> {
        match &self.command {
            Command::Datetime { value } => {
                let text = load_value_or_file(value)?;
                let instant = parse_datetime(&text)?;
                let zone = instant.zone();
                Ok(json!({
                    "input": text,
                    "canonical": format_datetime(&instant),
                    "utc": format_datetime(&instant.to_utc()),
                    "floating": zone.is_floating(),
                    "tzid": zone.name(),
                }))
            }
            Command::Duration { value } => {
                let text = load_value_or_file(value)?;
                let duration = parse_duration(&text)?;
                Ok(json!({
                    "input": text,
                    "canonical": format_duration(&duration)?,
                    "negative": duration.is_negative(),
                    "weeks": duration.weeks(),
                    "days": duration.days(),
                    "hours": duration.hours(),
                    "minutes": duration.minutes(),
                    "seconds": duration.seconds(),
                }))
            }
            Command::Period {
                value,
                with_duration,
            } => {
                let text = load_value_or_file(value)?;
                let period = parse_period(&text)?;
                let canonical = if *with_duration {
                    format_period_with_duration(&period)?
                } else {
                    format_period(&period)
                };
                Ok(json!({
                    "input": text,
                    "canonical": canonical,
                    "start": period.start(),
                    "end": period.end(),
                }))
            }
            Command::Rrule {
                value,
                dtstart,
                dtend,
                limit,
            } => {
                let text = load_value_or_file(value)?;
                let mut extra = RecurrenceParams::new();
                if let Some(dtstart) = dtstart {
                    let dtstart = parse_datetime(dtstart).context("Invalid --dtstart")?;
                    extra = extra.with_instant("dtstart", dtstart);
                }
                if let Some(dtend) = dtend {
                    let dtend = parse_datetime(dtend).context("Invalid --dtend")?;
                    extra = extra.with_instant("dtend", dtend);
                }

                let params = parse_recurrence(&text, extra)?;
                let occurrences = if dtstart.is_some() {
                    let set = RecurrenceSet::new(&params)?;
                    debug!("Expanding at most {} occurrences", limit);
                    Some(set.take(*limit))
                } else {
                    None
                };

                Ok(json!({
                    "input": text,
                    "canonical": format_recurrence(&params),
                    "params": params,
                    "occurrences": occurrences,
                }))
            }
        }
    }
}

/// Load a value either directly or from a file
///
/// If the value exists as a file path, read its contents.
/// Otherwise, return the value as-is.
fn load_value_or_file(value: &str) -> Result<String> {
    let path = PathBuf::from(value);

    if path.exists() && path.is_file() {
        debug!("Loading value from file: {}", value);
        let contents =
            std::fs::read_to_string(&path).context(format!("Failed to read file: {value}"))?;
        Ok(contents.trim().to_string())
    } else {
        debug!("Using value directly (not a file path)");
        Ok(value.to_string())
    }
}
