// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parsing and formatting of iCalendar (RFC 2445) date-time, duration,
//! period and recurrence-rule strings.
//!
//! ```
//! use ical_format::{format_duration, parse_duration};
//!
//! let duration = parse_duration("P22DT4H25M3S")?;
//! assert_eq!(format_duration(&duration)?, "+P3W1DT4H25M3S");
//! # Ok::<(), ical_format::Error>(())
//! ```

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

#[macro_use]
extern crate tracing;

pub mod calendar;
pub mod datetime;
pub mod duration;
pub mod error;
pub mod models;
pub mod period;
pub mod recurrence;

pub use datetime::{format_datetime, parse_datetime};
pub use duration::{format_duration, parse_duration};
pub use error::{Error, Result, ValueKind};
pub use models::{DurationValue, InstantValue, PeriodValue, Timezone};
pub use period::{format_period, format_period_with_duration, parse_period};
pub use recurrence::{
    ParamValue, RecurrenceParams, RecurrenceSet, format_recurrence, parse_recurrence,
};
