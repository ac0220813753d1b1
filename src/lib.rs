// src/lib.rs

//! _logscan_ scans a line-oriented application log of _unknown_ format and
//! reconstructs the log entries within, including entries whose message
//! spans many lines (e.g. an embedded stack trace). No log data is copied;
//! every field of a [`LogEntry`] borrows from the scanned buffer.
//!
//! A [`ByteSliceScanner`] splits a buffer into lines. An [`EntryScanner`]
//! feeds each line to every [`Recognizer`] until exactly one of them claims
//! the data, then feeds all remaining lines to that one `Recognizer` which
//! folds continuation lines into the open entry.
//!
//! ```
//! use logscan::readers::linescanner::ByteSliceScanner;
//! use logscan::readers::entryscanner::EntryScanner;
//!
//! let data = b"2019-06-22 19:34:13,510 [26] ERROR failed\n  at Foo.Bar()\n";
//! let linescanner = ByteSliceScanner::new(data, "app.log");
//! let mut entryscanner = EntryScanner::new(linescanner);
//! while entryscanner.scan() {
//!     let entry = entryscanner.entry().unwrap();
//!     assert_eq!(entry.count_message_lines(), 2);
//! }
//! assert!(entryscanner.error().is_none());
//! ```
//!
//! Also see [_Definitions of data_] and [_Overview of readers_].
//!
//! [`LogEntry`]: crate::data::logentry::LogEntry
//! [`ByteSliceScanner`]: crate::readers::linescanner::ByteSliceScanner
//! [`EntryScanner`]: crate::readers::entryscanner::EntryScanner
//! [`Recognizer`]: crate::readers::recognizer::Recognizer
//! [_Definitions of data_]: crate::data
//! [_Overview of readers_]: crate::readers

pub mod common;
pub mod data;
pub mod debug;
pub mod readers;
#[cfg(test)]
pub mod tests;
