// src/readers/recognizer.rs

//! Implements a [`Recognizer`], the assembler of [`LogEntry`s] from
//! [`Line`s] of one known format.
//!
//! Each format is a [`RecognizerKind`]. The grammar of each kind is declared
//! once in [`HEADER_GRAMMARS`].
//!
//! [`LogEntry`s]: crate::data::logentry::LogEntry
//! [`Line`s]: crate::data::line::Line
//! [`HEADER_GRAMMARS`]: self::HEADER_GRAMMARS

use crate::common::{Count, ScanError};
use crate::data::datetime::{
    bytes_to_datetime_hms,
    bytes_to_datetime_ymdhmsf,
    RegexPattern,
    CGN_DATETIME,
    CGN_LEVEL,
    CGN_MACHINE,
    CGN_MESSAGE,
    CGN_SOURCE,
    CGN_THREAD,
    CGN_TIME,
    CGN_USER,
    CGP_DATETIME,
    CGP_LEVEL_BRACKETED,
    CGP_LEVEL_UPPER,
    CGP_MACHINE,
    CGP_MESSAGE,
    CGP_SOURCE,
    CGP_THREAD_OPT,
    CGP_TIME,
    CGP_USER,
    RP_BEG,
    RP_BLANK,
    RP_BLANKS,
    RP_END,
    RP_NOUNICODE,
};
use crate::data::line::Line;
use crate::data::logentry::LogEntry;
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::buffer_to_String_noraw;

use std::fmt;

use ::const_format::{assertcp_eq, concatcp};
use ::lazy_static::lazy_static;
use ::regex::bytes::{Captures, Regex};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// RecognizerKind
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The closed set of log formats a [`Recognizer`] can assemble.
///
/// The discriminant is the index into [`HEADER_GRAMMARS`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum RecognizerKind {
    /// `2019-06-22 19:34:13,510 [26] ERROR message`
    ///
    /// Date and time with optional fractional seconds, optional bracketed
    /// thread, an upper-case level, then the message.
    Log4Net = 0,
    /// `03:00:28 [Debug] [USER] [Machine] [Source.Levels] message`
    ///
    /// Time of day only, bracketed level, user, machine and source, then the
    /// message. The date is always [`PLACEHOLDER_DATE`].
    ///
    /// [`PLACEHOLDER_DATE`]: static@crate::data::datetime::PLACEHOLDER_DATE
    NLog = 1,
}

/// Recognizers tried, in this order, by a default [`EntryScanner`].
///
/// [`EntryScanner`]: crate::readers::entryscanner::EntryScanner
pub const RECOGNIZERS_DEFAULT: [RecognizerKind; 2] = [
    RecognizerKind::Log4Net,
    RecognizerKind::NLog,
];

impl RecognizerKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RecognizerKind::Log4Net => "log4net",
            RecognizerKind::NLog => "nlog",
        }
    }

    /// The [`HeaderGrammar`] of this kind.
    pub fn grammar(&self) -> &'static HeaderGrammar {
        &HEADER_GRAMMARS[*self as usize]
    }

    /// The compiled [`Regex`] of this kind's header grammar.
    pub fn regex(&self) -> &'static Regex {
        &HEADER_GRAMMARS_REGEX_VEC[*self as usize]
    }
}

impl fmt::Display for RecognizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// header grammars
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Transform the regex captures of a matched header line into a new
/// [`LogEntry`].
pub type HeaderToEntry = for<'a> fn(&Captures<'a>) -> Result<LogEntry<'a>, ScanError>;

/// How to recognize and take apart the header line of one format.
///
/// Tested in test `test_HEADER_GRAMMARS_test_cases`.
pub struct HeaderGrammar {
    pub kind: RecognizerKind,
    /// Regex pattern for [`captures`]. Must match the entire line.
    ///
    /// [`captures`]: https://docs.rs/regex/1.11.1/regex/bytes/struct.Regex.html#method.captures
    pub regex_pattern: &'static RegexPattern,
    /// Create a `LogEntry` from the `regex_pattern` captures.
    pub header_to_entry: HeaderToEntry,
    /// Hardcoded self-test cases; header lines that must match.
    pub _test_cases: &'static [&'static str],
}

impl fmt::Debug for HeaderGrammar {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("HeaderGrammar")
            .field("kind", &self.kind)
            .field("regex_pattern", &self.regex_pattern)
            .finish()
    }
}

/// Header grammar of [`RecognizerKind::Log4Net`].
pub const RP_LOG4NET: &RegexPattern = concatcp!(
    RP_NOUNICODE,
    RP_BEG,
    CGP_DATETIME,
    RP_BLANK,
    CGP_THREAD_OPT,
    CGP_LEVEL_UPPER,
    RP_BLANKS,
    CGP_MESSAGE,
    RP_END
);

/// Header grammar of [`RecognizerKind::NLog`].
pub const RP_NLOG: &RegexPattern = concatcp!(
    RP_NOUNICODE,
    RP_BEG,
    CGP_TIME,
    RP_BLANK,
    CGP_LEVEL_BRACKETED,
    RP_BLANK,
    CGP_USER,
    RP_BLANK,
    CGP_MACHINE,
    RP_BLANK,
    CGP_SOURCE,
    RP_BLANKS,
    CGP_MESSAGE,
    RP_END
);

/// Get the bytes of capture group `name`, if it participated in the match.
#[inline(always)]
fn capture<'a>(
    captures: &Captures<'a>,
    name: &str,
) -> Option<Line<'a>> {
    captures
        .name(name)
        .map(|match_| match_.as_bytes())
}

fn header_to_entry_log4net<'a>(captures: &Captures<'a>) -> Result<LogEntry<'a>, ScanError> {
    let dt = bytes_to_datetime_ymdhmsf(capture(captures, CGN_DATETIME).unwrap_or_default())?;
    let mut entry = LogEntry::new(
        dt,
        capture(captures, CGN_LEVEL).unwrap_or_default(),
        capture(captures, CGN_MESSAGE).unwrap_or_default(),
    );
    entry.thread = capture(captures, CGN_THREAD);

    Ok(entry)
}

fn header_to_entry_nlog<'a>(captures: &Captures<'a>) -> Result<LogEntry<'a>, ScanError> {
    let dt = bytes_to_datetime_hms(capture(captures, CGN_TIME).unwrap_or_default())?;
    let mut entry = LogEntry::new(
        dt,
        capture(captures, CGN_LEVEL).unwrap_or_default(),
        capture(captures, CGN_MESSAGE).unwrap_or_default(),
    );
    entry.user = capture(captures, CGN_USER);
    entry.machine = capture(captures, CGN_MACHINE);
    entry.source = capture(captures, CGN_SOURCE);

    Ok(entry)
}

/// Count of [`HEADER_GRAMMARS`].
pub const HEADER_GRAMMARS_LEN: usize = 2;

// one grammar per kind, indexed by discriminant
assertcp_eq!(RECOGNIZERS_DEFAULT.len(), HEADER_GRAMMARS_LEN);
assertcp_eq!(RecognizerKind::NLog as usize, HEADER_GRAMMARS_LEN - 1);

/// Built-in [`HeaderGrammar`]s, indexed by [`RecognizerKind`].
pub static HEADER_GRAMMARS: [HeaderGrammar; HEADER_GRAMMARS_LEN] = [
    HeaderGrammar {
        kind: RecognizerKind::Log4Net,
        regex_pattern: RP_LOG4NET,
        header_to_entry: header_to_entry_log4net,
        _test_cases: &[
            "2019-06-22 19:34:13,510 [26] ERROR Something failed",
            "2019-06-22 19:34:13 [main thread] INFO started",
            "2019-06-22 19:34:13,5 WARN no thread",
            "2019-06-22 19:34:13,123456789012 DEBUG  [x] bracketed message",
            "2019-06-22 19:34:13,510 [26] FATAL ",
        ],
    },
    HeaderGrammar {
        kind: RecognizerKind::NLog,
        regex_pattern: RP_NLOG,
        header_to_entry: header_to_entry_nlog,
        _test_cases: &[
            "03:00:28 [Debug] [USER] [Machine] [Source.Levels] message",
            "23:59:59 [Error] [svc account] [HOST-01] [App.Db]   padded message",
            "00:00:00 [Info] [u] [m] [s] [bracketed] message",
        ],
    },
];

lazy_static! {
    /// Run-time created copy of [`HEADER_GRAMMARS`] with compiled
    /// [`Regex`].
    ///
    /// [`Regex`]: https://docs.rs/regex/1.11.1/regex/bytes/struct.Regex.html
    pub(crate) static ref HEADER_GRAMMARS_REGEX_VEC: Vec<Regex> =
        HEADER_GRAMMARS.iter().map(
            |x| Regex::new(x.regex_pattern).unwrap()
        ).collect();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Recognizer
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Assembles [`LogEntry`]s of one [`RecognizerKind`] from a sequence of
/// [`Line`]s.
///
/// At most one `LogEntry` is "open". A header line closes the open
/// `LogEntry`, returning it, and opens a new one. Any other line is appended
/// to the open `LogEntry`.
///
/// [`Line`]: crate::data::line::Line
pub struct Recognizer<'a> {
    kind: RecognizerKind,
    /// The `LogEntry` still accepting continuation lines.
    entry_open: Option<LogEntry<'a>>,
    /// `Count` of header lines matched.
    headers_matched: Count,
    /// `Count` of continuation lines appended.
    continuations: Count,
}

impl fmt::Debug for Recognizer<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("Recognizer")
            .field("kind", &self.kind)
            .field("entry_open", &self.entry_open.is_some())
            .field("headers_matched", &self.headers_matched)
            .field("continuations", &self.continuations)
            .finish()
    }
}

impl<'a> Recognizer<'a> {
    pub fn new(kind: RecognizerKind) -> Recognizer<'a> {
        defñ!("({:?})", kind);
        Recognizer {
            kind,
            entry_open: None,
            headers_matched: 0,
            continuations: 0,
        }
    }

    pub fn kind(&self) -> RecognizerKind {
        self.kind
    }

    /// Is there an open `LogEntry`?
    pub fn is_entry_open(&self) -> bool {
        self.entry_open.is_some()
    }

    /// `Count` of header lines matched.
    pub fn count_headers_matched(&self) -> Count {
        self.headers_matched
    }

    /// `Count` of continuation lines appended.
    pub fn count_continuations(&self) -> Count {
        self.continuations
    }

    /// Process one line.
    ///
    /// - header line, no open entry: open a new entry, return `Ok(None)`.
    /// - header line, an open entry: open a new entry, return the previously
    ///   open entry.
    /// - other line, an open entry: append the line to the open entry,
    ///   return `Ok(None)`.
    /// - other line, no open entry: return `Err(ScanError::UnknownData)`.
    ///
    /// A header line with a bad datetime returns the parse error. The open
    /// entry, if any, is left as-is.
    pub fn consume(
        &mut self,
        line: Line<'a>,
    ) -> Result<Option<LogEntry<'a>>, ScanError> {
        defn!("{}: {:?}", self.kind, buffer_to_String_noraw(line));
        match self.kind.regex().captures(line) {
            Some(captures) => {
                let entry_new: LogEntry<'a> = match (self.kind.grammar().header_to_entry)(&captures) {
                    Ok(entry) => entry,
                    Err(err) => {
                        defx!("{}: header_to_entry error {}", self.kind, err);
                        return Err(err);
                    }
                };
                self.headers_matched += 1;
                let entry_prev: Option<LogEntry<'a>> = self.entry_open.replace(entry_new);
                defx!("{}: header; return entry {}", self.kind, entry_prev.is_some());

                Ok(entry_prev)
            }
            None => match self.entry_open.as_mut() {
                Some(entry) => {
                    entry.push(line);
                    self.continuations += 1;
                    defx!("{}: continuation", self.kind);

                    Ok(None)
                }
                None => {
                    defx!("{}: UnknownData", self.kind);

                    Err(ScanError::UnknownData)
                }
            },
        }
    }

    /// Close and return the open entry, if any. For use at end of input.
    pub fn flush(&mut self) -> Option<LogEntry<'a>> {
        defñ!("{}: entry_open {}", self.kind, self.entry_open.is_some());
        self.entry_open.take()
    }
}
