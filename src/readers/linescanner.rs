// src/readers/linescanner.rs

//! Implements the [`LineScanner`] trait and a [`ByteSliceScanner`],
//! the finder of [`Line`s] within an in-memory buffer.
//!
//! [`Line`s]: crate::data::line::Line

use crate::common::{Count, FPath, FileOffset, BOM_UTF8, CRu8, NLu8};
use crate::data::line::Line;
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::buffer_to_String_noraw;

use std::fmt;
use std::io::Error;

use ::memchr::memchr;
use ::more_asserts::debug_assert_le;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LineScanner
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Something that yields [`Line`]s one at a time, in order.
///
/// A returned `Line` borrows the underlying data for `'a`, not the
/// `LineScanner`, so `Line`s may be kept while scanning continues.
///
/// _XXX: not a rust "Reader"; does not implement trait [`Read`]._
///
/// [`Line`]: crate::data::line::Line
/// [`Read`]: std::io::Read
pub trait LineScanner<'a> {
    /// Advance to the next line. Return `false` if there are no more lines.
    fn scan(&mut self) -> bool;

    /// The most recently scanned line, without line terminator.
    fn bytes(&self) -> Line<'a>;

    /// Last error of reading the underlying data.
    fn error(&self) -> Option<&Error>;

    /// The read cursor; offset of the next line to scan.
    fn position(&self) -> FileOffset;

    /// The read cursor.
    ///
    /// XXX: this is the cursor, the same as `position`, _not_ the data
    ///      length. Callers rely on it as-is.
    fn length(&self) -> FileOffset;

    /// Move the read cursor.
    fn seek(&mut self, pos: FileOffset);

    /// Name of the scanned data, for diagnostics.
    fn filename(&self) -> &str;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ByteSliceScanner
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A [`LineScanner`] over an immutable byte slice already in memory.
///
/// A leading UTF-8 byte order mark is skipped. All offsets are relative to
/// the data after the byte order mark.
///
/// Lines end at `'\n'`; a `'\r'` before the `'\n'` is not part of the line.
/// Data after the last `'\n'` is one more line, if not empty.
///
/// Reading can not fail so [`error`] is always `None`.
///
/// [`error`]: LineScanner::error
pub struct ByteSliceScanner<'a> {
    /// The data after any byte order mark.
    data: &'a [u8],
    /// Read cursor.
    beg: FileOffset,
    /// One past the last byte of `data`.
    end: FileOffset,
    /// The most recently scanned line.
    current: Line<'a>,
    filename: FPath,
    /// `Count` of `Line`s returned by `scan`.
    lines_processed: Count,
}

impl fmt::Debug for ByteSliceScanner<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("ByteSliceScanner")
            .field("filename", &self.filename)
            .field("beg", &self.beg)
            .field("end", &self.end)
            .field("current.len()", &self.current.len())
            .field("lines_processed", &self.lines_processed)
            .finish()
    }
}

impl<'a> ByteSliceScanner<'a> {
    /// Create a new `ByteSliceScanner` over `data`.
    ///
    /// `filename` is only used for diagnostics.
    pub fn new(
        data: &'a [u8],
        filename: &str,
    ) -> ByteSliceScanner<'a> {
        defn!("(data.len() {}, {:?})", data.len(), filename);
        let data: &'a [u8] = skip_bom(data);
        defx!("data.len() {} after skip_bom", data.len());

        ByteSliceScanner {
            data,
            beg: 0,
            end: data.len(),
            current: &data[0..0],
            filename: FPath::from(filename),
            lines_processed: 0,
        }
    }

    /// `Count` of `Line`s returned by `scan`.
    pub fn count_lines_processed(&self) -> Count {
        self.lines_processed
    }
}

/// Return `data` without a leading UTF-8 byte order mark.
pub fn skip_bom(data: &[u8]) -> &[u8] {
    match data.strip_prefix(&BOM_UTF8[..]) {
        Some(data_) => data_,
        None => data,
    }
}

impl<'a> LineScanner<'a> for ByteSliceScanner<'a> {
    fn scan(&mut self) -> bool {
        let rest: &'a [u8] = &self.data[self.beg..self.end];
        match memchr(NLu8, rest) {
            None => {
                // trailing data without a newline
                self.current = rest;
                let found: bool = self.beg != self.end;
                self.beg = self.end;
                if found {
                    self.lines_processed += 1;
                }
                defñ!("last line {}; {:?}", found, buffer_to_String_noraw(self.current));

                found
            }
            Some(at) => {
                let line: &'a [u8] = &rest[..at];
                self.current = match line.split_last() {
                    Some((&CRu8, line_)) => line_,
                    _ => line,
                };
                self.beg += at + 1;
                debug_assert_le!(self.beg, self.end);
                self.lines_processed += 1;
                defñ!("line {:?}, next {}", buffer_to_String_noraw(self.current), self.beg);

                true
            }
        }
    }

    fn bytes(&self) -> Line<'a> {
        self.current
    }

    fn error(&self) -> Option<&Error> {
        None
    }

    fn position(&self) -> FileOffset {
        self.beg
    }

    fn length(&self) -> FileOffset {
        self.beg
    }

    /// Out of range `pos` is clamped to the end of the data.
    fn seek(&mut self, pos: FileOffset) {
        defñ!("({}), end {}", pos, self.end);
        self.beg = std::cmp::min(pos, self.end);
    }

    fn filename(&self) -> &str {
        self.filename.as_str()
    }
}
