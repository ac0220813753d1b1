// src/data/logentry.rs

//! Implements a [`LogEntry`] struct.
//!
//! [`LogEntry`]: crate::data::logentry::LogEntry

use crate::common::Count;
use crate::data::datetime::DateTimeL;
use crate::data::line::{clone_bytes_slices, ClonedSlices, Line, Lines};

use std::fmt;

use ::bstr::ByteSlice;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// --------
// LogEntry

/// A `LogEntry` has information about a "log message" that spans one or
/// more [`Line`]s.
///
/// The first `Line` is a header line; it holds the datetime and other
/// fields. The trailing text of the header line is the first element of
/// `message`. Each continuation line is one more element of `message`.
///
/// Every field borrows from the scanned buffer; nothing is copied.
/// Fields a header grammar does not have are `None`.
///
/// [`Line`]: crate::data::line::Line
pub struct LogEntry<'a> {
    /// Parsed DateTime instance.
    pub(crate) dt: DateTimeL,
    /// Severity, e.g. `ERROR` or `Debug`.
    pub(crate) level: Line<'a>,
    pub(crate) thread: Option<Line<'a>>,
    pub(crate) user: Option<Line<'a>>,
    pub(crate) machine: Option<Line<'a>>,
    pub(crate) source: Option<Line<'a>>,
    /// Header line trailing text then continuation lines, in order.
    pub(crate) message: Lines<'a>,
}

impl fmt::Debug for LogEntry<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("LogEntry")
            .field("dt", &self.dt)
            .field("level", &self.level.as_bstr())
            .field("thread", &self.thread.map(|x| x.as_bstr()))
            .field("user", &self.user.map(|x| x.as_bstr()))
            .field("machine", &self.machine.map(|x| x.as_bstr()))
            .field("source", &self.source.map(|x| x.as_bstr()))
            .field(
                "message",
                &self
                    .message
                    .iter()
                    .map(|x| x.as_bstr())
                    .collect::<Vec<&::bstr::BStr>>(),
            )
            .finish()
    }
}

impl<'a> LogEntry<'a> {
    /// Default [`with_capacity`] for `message`. Most entries are one line,
    /// the header line.
    ///
    /// [`with_capacity`]: std::vec::Vec#method.with_capacity
    const MESSAGE_WITH_CAPACITY: usize = 1;

    /// Create a `LogEntry` from a header line's fields. The other optional
    /// fields are `None`.
    pub fn new(
        dt: DateTimeL,
        level: Line<'a>,
        message_first: Line<'a>,
    ) -> LogEntry<'a> {
        let mut message = Lines::with_capacity(LogEntry::MESSAGE_WITH_CAPACITY);
        message.push(message_first);

        LogEntry {
            dt,
            level,
            thread: None,
            user: None,
            machine: None,
            source: None,
            message,
        }
    }

    /// Return a reference to `self.dt`
    pub fn dt(&self) -> &DateTimeL {
        &self.dt
    }

    pub fn level(&self) -> Line<'a> {
        self.level
    }

    pub fn thread(&self) -> Option<Line<'a>> {
        self.thread
    }

    pub fn user(&self) -> Option<Line<'a>> {
        self.user
    }

    pub fn machine(&self) -> Option<Line<'a>> {
        self.machine
    }

    pub fn source(&self) -> Option<Line<'a>> {
        self.source
    }

    /// The message lines; header line trailing text first.
    pub fn message(&self) -> &[Line<'a>] {
        self.message.as_slice()
    }

    /// Append a continuation line to the message.
    pub fn push(
        &mut self,
        line: Line<'a>,
    ) {
        self.message.push(line);
        defñ!("self.message.len() is now {}", self.message.len());
    }

    /// Count of [`Line`]s in `self.message`.
    ///
    /// [`Line`]: crate::data::line::Line
    pub fn count_message_lines(&self) -> Count {
        self.message.len() as Count
    }

    /// Sum of lengths of all message lines.
    pub fn count_message_bytes(&self) -> Count {
        self.message
            .iter()
            .map(|line| line.len() as Count)
            .sum()
    }

    /// Owned copy of the message lines, independent of the scanned buffer.
    pub fn message_cloned(&self) -> ClonedSlices {
        clone_bytes_slices(self.message.as_slice())
    }

    /// Message lines joined with `'\n'`, with non-UTF-8 bytes replaced.
    ///
    /// Allocates; intended for display or testing.
    #[allow(non_snake_case)]
    pub fn message_to_String_lossy(&self) -> String {
        let mut s_ = String::with_capacity(self.count_message_bytes() as usize + self.message.len());
        for (i, line) in self.message.iter().enumerate() {
            if i != 0 {
                s_.push('\n');
            }
            s_.push_str(&line.to_str_lossy());
        }

        s_
    }
}
