// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

use crate::readers::recognizer::RecognizerKind;

use ::thiserror::Error;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// names, offsets, counts
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// `F`ake `Path` or `F`ile `Path`.
///
/// Only used for diagnostics; no file is ever opened by this crate.
pub type FPath = String;

/// Offset into the scanned buffer in bytes.
///
/// The buffer is entirely in memory so this is a `usize`.
pub type FileOffset = usize;

/// General purpose counter.
pub type Count = u64;

/// Sequence of owned Bytes
pub type Bytes = Vec<u8>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Lines
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Single-byte newLine char as u8
#[allow(non_upper_case_globals)]
pub const NLu8: u8 = 10;
/// Single-byte Carriage-Return char as u8
#[allow(non_upper_case_globals)]
pub const CRu8: u8 = 13;
/// UTF-8 Byte Order Mark
pub const BOM_UTF8: [u8; 3] = [0xEF, 0xBB, 0xBF];

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// custom Results enums for various *Scanner functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

// XXX: ripped from '\.rustup\toolchains\beta-x86_64-pc-windows-msvc\lib\rustlib\src\rust\library\core\src\result.rs'
//      https://doc.rust-lang.org/src/core/result.rs.html#481-495

/// `Result` Extended
/// for incremental entry searching functions
#[derive(Debug, PartialEq)]
pub enum ResultS3<T, E> {
    /// Contains the success data
    Found(T),
    /// Input is exhausted, or other condition that means "Done", nothing to
    /// return, but no bad errors happened
    Done,
    /// Contains the error value, something bad happened
    Err(E),
}

impl<T, E> ResultS3<T, E> {
    // Querying the contained values

    /// Returns `true` if the result is [`Found`](ResultS3::Found) or [`Done`](ResultS3::Done).
    #[must_use = "if you intended to assert that this is ok, consider `.unwrap()` instead"]
    #[inline(always)]
    pub const fn is_ok(&self) -> bool {
        matches!(*self, ResultS3::Found(_) | ResultS3::Done)
    }

    /// Returns `true` if the result is [`Err`](ResultS3::Err).
    #[must_use = "if you intended to assert that this is err, consider `.unwrap_err()` instead"]
    #[inline(always)]
    pub const fn is_err(&self) -> bool {
        !self.is_ok()
    }

    /// Returns `true` if the result is [`Done`](ResultS3::Done).
    #[inline(always)]
    pub const fn is_done(&self) -> bool {
        matches!(*self, ResultS3::Done)
    }

    // Adapter for each variant

    /// Converts from `ResultS3<T, E>` to [`Option<T>`].
    ///
    /// Converts `self` into an [`Option<T>`], consuming `self`,
    /// and discarding the error, if any.
    #[inline(always)]
    pub fn ok(self) -> Option<T> {
        match self {
            ResultS3::Found(x) => Some(x),
            ResultS3::Done => None,
            ResultS3::Err(_) => None,
        }
    }

    /// Converts from `ResultS3<T, E>` to [`Option<E>`].
    ///
    /// Converts `self` into an [`Option<E>`], consuming `self`,
    /// and discarding the success value, if any.
    #[inline(always)]
    pub fn err(self) -> Option<E> {
        match self {
            ResultS3::Found(_) => None,
            ResultS3::Done => None,
            ResultS3::Err(x) => Some(x),
        }
    }
}

impl<T, E> std::fmt::Display for ResultS3<T, E>
where
    E: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultS3::Found(_) => { write!(f, "ResultS3::Found") },
            ResultS3::Done => { write!(f, "ResultS3::Done") },
            ResultS3::Err(err) => { write!(f, "ResultS3::Err({})", err) },
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Errors of [`Recognizer`]s and the [`EntryScanner`].
///
/// Only `UnknownData` is not a "real" error. It is how a `Recognizer` tells
/// the `EntryScanner` that a line is not its format. It never escapes
/// [`EntryScanner::scan`].
///
/// All other variants are fatal; scanning halts and the error is retained
/// for [`EntryScanner::error`].
///
/// [`Recognizer`]: crate::readers::recognizer::Recognizer
/// [`EntryScanner`]: crate::readers::entryscanner::EntryScanner
/// [`EntryScanner::scan`]: crate::readers::entryscanner::EntryScanner#method.scan
/// [`EntryScanner::error`]: crate::readers::entryscanner::EntryScanner#method.error
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ScanError {
    /// Line does not match the header grammar and no entry is open.
    #[error("unknown data")]
    UnknownData,
    /// More than one recognizer claimed the same line during detection.
    #[error("ambiguous data; line claimed by recognizers {first} and {second}")]
    AmbiguousData {
        first: RecognizerKind,
        second: RecognizerKind,
    },
    /// A header matched but its datetime substring did not parse, or
    /// parsed to a leap second. A leap second has no `source`.
    #[error("failed to parse datetime {data:?}")]
    DateTime {
        data: String,
        #[source]
        source: Option<::chrono::ParseError>,
    },
    /// A header field expected to be ASCII was not valid UTF-8.
    #[error("header field is not valid UTF-8; {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// The underlying [`LineScanner`] reported an error.
    ///
    /// [`LineScanner`]: crate::readers::linescanner::LineScanner
    #[error("line scanner error; {0}")]
    LineScanner(String),
}

impl ScanError {
    /// Is this the non-fatal "not my format" signal?
    #[inline(always)]
    pub const fn is_unknown_data(&self) -> bool {
        matches!(*self, ScanError::UnknownData)
    }
}
