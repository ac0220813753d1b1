// src/data/mod.rs

//! The `data` module is specialized data containers for
//! [`Line`]s and [`LogEntry`]s.
//!
//! ## Definitions of data
//!
//! ### Line
//!
//! A "line" is sequence of bytes residing in the scanned buffer that:
//!
//! * begin after a prior "line" or the beginning of the buffer (after any
//!   UTF-8 byte order mark).
//! * end with a newline character `'\n'` or the end of the buffer.
//!
//! A "line" never includes its terminating `'\n'`, nor a `'\r'` immediately
//! preceding that `'\n'`.
//!
//! A "line" is a borrowed slice, a [`Line`], found by a [`LineScanner`].
//!
//! ### Header line
//!
//! A "header line" is a "line" that entirely matches the grammar of one of
//! the [`Recognizer`]s. A header line begins a new "log entry".
//!
//! ### Continuation line
//!
//! A "continuation line" is any "line" following a header line that is not
//! itself a header line.
//!
//! ### Log Entry
//!
//! A "log entry" is one header line followed by zero or more continuation
//! lines. A log entry is represented by a [`LogEntry`] and found by an
//! [`EntryScanner`].
//!
//! A `LogEntry` represents a "log message".
//!
//! <br/>
//!
//! Also see [_Overview of readers_].
//!
//! [_Overview of readers_]: crate::readers
//! [`Line`]: crate::data::line::Line
//! [`LogEntry`]: crate::data::logentry::LogEntry
//! [`LineScanner`]: crate::readers::linescanner::LineScanner
//! [`Recognizer`]: crate::readers::recognizer::Recognizer
//! [`EntryScanner`]: crate::readers::entryscanner::EntryScanner

pub mod datetime;
pub mod line;
pub mod logentry;
