// src/data/datetime.rs

//! Regular expression ("regex") building blocks for header grammars and
//! functions to transform matched datetime substrings to chrono
//! [`DateTime`] instances.
//!
//! Parsing a datetime from a header line requires:
//! 1. a header grammar regex match on the [`Line`] (done by the
//!    [`Recognizer`])
//! 2. copying the matched datetime substring into a small stack buffer,
//!    normalizing it for chrono
//! 3. calling chrono [`parse_from_str`] with a hardcoded [`strftime`]
//!    pattern
//!
//! The most relevant documents to understand this file are:
//! - `chrono` crate [`strftime`] format.
//! - `regex` crate [Regular Expression syntax].
//!
//! [`Line`]: crate::data::line::Line
//! [`Recognizer`]: crate::readers::recognizer::Recognizer
//! [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html
//! [`parse_from_str`]: https://docs.rs/chrono/0.4.40/chrono/naive/struct.NaiveDateTime.html#method.parse_from_str
//! [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html
//! [Regular Expression syntax]: https://docs.rs/regex/1.11.1/regex/index.html#syntax

#![allow(non_upper_case_globals)]

use crate::common::ScanError;
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::buffer_to_String_noraw;

#[doc(hidden)]
pub use ::chrono::{
    DateTime,
    Datelike,
    NaiveDate,
    NaiveDateTime,
    NaiveTime,
    Timelike,
    Utc,
};
use ::const_format::concatcp;
use ::lazy_static::lazy_static;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// DateTime typing, strings, and formatting
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A _Year_ in a date
pub type Year = i32;

/// A chrono [`DateTime`] type used in _logscan_.
///
/// Log datetimes carry no timezone; they are taken as UTC wall time.
///
/// [`DateTime`]: https://docs.rs/chrono/0.4.40/chrono/struct.DateTime.html
pub type DateTimeL = DateTime<Utc>;
pub type DateTimeLOpt = Option<DateTimeL>;

/// Crate `chrono` [`strftime`] formatting pattern, passed to
/// chrono `parse_from_str`.
///
/// [`strftime`]: https://docs.rs/chrono/0.4.40/chrono/format/strftime/index.html
pub type DateTimePattern_str = str;

/// Regular expression capture group name, used within the regular
/// expression and for later retrieval via [`regex::bytes::Captures::name`].
pub type CaptureGroupName = str;

/// Regular expression capture group pattern, used within a
/// [`RegexPattern`].
pub type CaptureGroupPattern = str;

/// A regular expression, passed to [`regex::bytes::Regex::new`].
pub type RegexPattern = str;

/// Year of [`PLACEHOLDER_DATE`].
pub const PLACEHOLDER_YEAR: Year = 2010;

lazy_static! {
    /// Date used for a time-of-day only header (the NLog style). That header
    /// has no date so every such entry gets this date.
    pub static ref PLACEHOLDER_DATE: NaiveDate =
        NaiveDate::from_ymd_opt(PLACEHOLDER_YEAR, 1, 1).unwrap();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// regex capture group names and patterns
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Disable Unicode so `.` and negated classes match any byte.
/// Message text is not required to be UTF-8.
pub const RP_NOUNICODE: &RegexPattern = r"(?-u)";
/// Regex anchor, beginning of the line
pub const RP_BEG: &RegexPattern = r"^";
/// Regex anchor, end of the line
pub const RP_END: &RegexPattern = r"$";
/// one whitespace
pub const RP_BLANK: &RegexPattern = r"\s";
/// one or more whitespace
pub const RP_BLANKS: &RegexPattern = r"\s+";
/// left bracket
pub const RP_LB: &RegexPattern = r"\[";
/// right bracket
pub const RP_RB: &RegexPattern = r"\]";

pub const CGN_DATETIME: &CaptureGroupName = "datetime";
pub const CGN_TIME: &CaptureGroupName = "time";
pub const CGN_THREAD: &CaptureGroupName = "thread";
pub const CGN_LEVEL: &CaptureGroupName = "level";
pub const CGN_USER: &CaptureGroupName = "user";
pub const CGN_MACHINE: &CaptureGroupName = "machine";
pub const CGN_SOURCE: &CaptureGroupName = "source";
pub const CGN_MESSAGE: &CaptureGroupName = "message";

/// All capture group names, for tests.
pub const CGN_ALL: [&CaptureGroupName; 8] = [
    CGN_DATETIME,
    CGN_TIME,
    CGN_THREAD,
    CGN_LEVEL,
    CGN_USER,
    CGN_MACHINE,
    CGN_SOURCE,
    CGN_MESSAGE,
];

// Names used in the upcoming capture group pattern variable values (`CGP_*`) *MUST*
// match the values of previous capture group name values (`CGN_*`).

/// date `YYYY-MM-DD`
pub const RP_YMD: &RegexPattern = r"[12][0-9]{3}-[01][0-9]-[0-3][0-9]";
/// time `HH:MM:SS`, seconds not range limited
pub const RP_HMS_LOOSE: &RegexPattern = r"[0-2][0-9]:[0-5][0-9]:[0-9]{2}";
/// time `HH:MM:SS`
pub const RP_HMS: &RegexPattern = r"[0-2][0-9]:[0-5][0-9]:[0-5][0-9]";
/// comma then fractional seconds of any length
pub const RP_FRACTIONAL: &RegexPattern = r"(?:,[0-9]+)?";

/// `2019-06-22 19:34:13,510`
pub const CGP_DATETIME: &CaptureGroupPattern =
    concatcp!("(?P<", CGN_DATETIME, ">", RP_YMD, " ", RP_HMS_LOOSE, RP_FRACTIONAL, ")");
/// `03:00:28`
pub const CGP_TIME: &CaptureGroupPattern = concatcp!("(?P<", CGN_TIME, ">", RP_HMS, ")");
/// `[26] ` (optional)
pub const CGP_THREAD_OPT: &CaptureGroupPattern =
    concatcp!("(?:", RP_LB, "(?P<", CGN_THREAD, r">[^\]]+)", RP_RB, RP_BLANK, ")?");
/// `ERROR`
pub const CGP_LEVEL_UPPER: &CaptureGroupPattern = concatcp!("(?P<", CGN_LEVEL, ">[A-Z]+)");
/// `[Debug]`
pub const CGP_LEVEL_BRACKETED: &CaptureGroupPattern =
    concatcp!(RP_LB, "(?P<", CGN_LEVEL, r">[^\]]+)", RP_RB);
/// `[USER]`
pub const CGP_USER: &CaptureGroupPattern = concatcp!(RP_LB, "(?P<", CGN_USER, r">[^\]]+)", RP_RB);
/// `[Machine]`
pub const CGP_MACHINE: &CaptureGroupPattern =
    concatcp!(RP_LB, "(?P<", CGN_MACHINE, r">[^\]]+)", RP_RB);
/// `[Source.Levels]`
pub const CGP_SOURCE: &CaptureGroupPattern =
    concatcp!(RP_LB, "(?P<", CGN_SOURCE, r">[^\]]+)", RP_RB);
/// remainder of the line, possibly empty
pub const CGP_MESSAGE: &CaptureGroupPattern = concatcp!("(?P<", CGN_MESSAGE, ">.*)");

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// datetime substring to DateTimeL
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `strftime` pattern for a [`CGP_DATETIME`] match after normalizing.
/// `%.f` is optional when parsing.
pub const DTP_YmdHMSf: &DateTimePattern_str = "%Y-%m-%d %H:%M:%S%.f";
/// `strftime` pattern for a [`CGP_TIME`] match.
pub const DTP_HMS: &DateTimePattern_str = "%H:%M:%S";

/// Buffer size for the normalized datetime; `YYYY-MM-DD HH:MM:SS.nnnnnnnnn`.
///
/// Fractional digits past nanoseconds do not fit and are truncated.
const DT_BUFFER_SZ: usize = 29;

/// Copy `data` into `buffer`, normalizing the fractional seconds separator
/// `,` to `.`. Returns count of bytes copied.
fn datetime_to_buffer(
    data: &[u8],
    buffer: &mut [u8; DT_BUFFER_SZ],
) -> usize {
    let mut at: usize = 0;
    for byte_ in data.iter().take(DT_BUFFER_SZ) {
        buffer[at] = match byte_ {
            b',' => b'.',
            b => *b,
        };
        at += 1;
    }

    at
}

/// chrono parses second `60` as a leap second, represented as a nanosecond
/// value of one second or more. Log datetimes never have leap seconds.
#[inline(always)]
fn is_leap_second(nt: &NaiveTime) -> bool {
    nt.nanosecond() >= 1_000_000_000
}

/// Transform a [`CGP_DATETIME`] match, e.g. `2019-06-22 19:34:13,510`, to a
/// [`DateTimeL`].
///
/// A regex match does not guarantee a valid datetime, e.g. month `19` or
/// second `60`. Those return a `ScanError::DateTime`.
pub fn bytes_to_datetime_ymdhmsf(data: &[u8]) -> Result<DateTimeL, ScanError> {
    defn!("({:?})", buffer_to_String_noraw(data));
    let mut buffer: [u8; DT_BUFFER_SZ] = [0; DT_BUFFER_SZ];
    let copiedn = datetime_to_buffer(data, &mut buffer);
    let buffer_s: &str = std::str::from_utf8(&buffer[..copiedn])?;
    match NaiveDateTime::parse_from_str(buffer_s, DTP_YmdHMSf) {
        Ok(ndt) if is_leap_second(&ndt.time()) => {
            defx!("leap second {:?}", ndt);
            Err(ScanError::DateTime {
                data: buffer_s.to_string(),
                source: None,
            })
        }
        Ok(ndt) => {
            defx!("return {:?}", ndt);
            Ok(ndt.and_utc())
        }
        Err(err) => {
            defx!("parse_from_str({:?}, {:?}) failed {}", buffer_s, DTP_YmdHMSf, err);
            Err(ScanError::DateTime {
                data: buffer_s.to_string(),
                source: Some(err),
            })
        }
    }
}

/// Transform a [`CGP_TIME`] match, e.g. `03:00:28`, to a [`DateTimeL`] on
/// the [`PLACEHOLDER_DATE`].
pub fn bytes_to_datetime_hms(data: &[u8]) -> Result<DateTimeL, ScanError> {
    defn!("({:?})", buffer_to_String_noraw(data));
    let data_s: &str = std::str::from_utf8(data)?;
    match NaiveTime::parse_from_str(data_s, DTP_HMS) {
        Ok(nt) if is_leap_second(&nt) => {
            defx!("leap second {:?}", nt);
            Err(ScanError::DateTime {
                data: data_s.to_string(),
                source: None,
            })
        }
        Ok(nt) => {
            let ndt: NaiveDateTime = PLACEHOLDER_DATE.and_time(nt);
            defx!("return {:?}", ndt);
            Ok(ndt.and_utc())
        }
        Err(err) => {
            defx!("parse_from_str({:?}, {:?}) failed {}", data_s, DTP_HMS, err);
            Err(ScanError::DateTime {
                data: data_s.to_string(),
                source: Some(err),
            })
        }
    }
}

/// Create a [`DateTimeL`] from the passed arguments. Helper for tests.
///
/// Returns `None` if any value is out of range.
pub fn ymdhmsn(
    year: Year,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
    nano: u32,
) -> DateTimeLOpt {
    let nd = NaiveDate::from_ymd_opt(year, month, day)?;
    let ndt = nd.and_hms_nano_opt(hour, min, sec, nano)?;

    Some(ndt.and_utc())
}
