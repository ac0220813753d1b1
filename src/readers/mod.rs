// src/readers/mod.rs

//! "Readers" for _logscan_.
//!
//! ## Overview of readers
//!
//! * An [`EntryScanner`] drives a [`LineScanner`] and [`Recognizer`]s to
//!   derive [`LogEntry`s].
//! * A `Recognizer` folds [`Line`s] of one known format into `LogEntry`s.
//! * A `LineScanner`, e.g. a [`ByteSliceScanner`], derives `Line`s from a
//!   buffer.
//!
//! <br/>
//!
//! * Only `u8` bytes are handled. Nothing is converted to `char` except
//!   for debug printing.
//! * Nothing is copied; every `Line` and `LogEntry` field borrows the
//!   scanned buffer.
//!
//! <br/>
//!
//! Also see [_Definitions of data_].
//!
//! <br/>
//!
//! _These are not rust "Readers"; these structs do not implement the trait
//! [`Read`]. These are "readers" in an informal sense._
//!
//! [_Definitions of data_]: crate::data
//! [`Read`]: std::io::Read
//! [`Line`s]: crate::data::line::Line
//! [`LogEntry`s]: crate::data::logentry::LogEntry
//! [`ByteSliceScanner`]: crate::readers::linescanner::ByteSliceScanner
//! [`LineScanner`]: crate::readers::linescanner::LineScanner
//! [`Recognizer`]: crate::readers::recognizer::Recognizer
//! [`EntryScanner`]: crate::readers::entryscanner::EntryScanner

pub mod entryscanner;
pub mod linescanner;
pub mod recognizer;
pub mod summary;
