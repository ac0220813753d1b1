// src/tests/common.rs

//! Common data and helpers for tests.

#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

use crate::common::{Count, ResultS3, ScanError};
use crate::data::logentry::LogEntry;
use crate::readers::entryscanner::EntryScanner;
use crate::readers::linescanner::{ByteSliceScanner, LineScanner};

use ::lazy_static::lazy_static;

/// Name passed to every `ByteSliceScanner` in tests.
pub const FILENAME_TEST: &str = "test.log";

/// Three Log4Net entries; the first spans three lines.
pub const LOG4NET_3: &[u8] = b"\
2019-06-22 19:34:13,510 [26] ERROR Something failed
System.Exception: boom
   at Foo.Bar() in Foo.cs:line 12
2019-06-22 19:34:14,001 [26] INFO recovered
2019-06-22 19:34:15 [main thread] WARN low disk
";

/// Two NLog entries; the second spans two lines.
pub const NLOG_2: &[u8] = b"\
03:00:28 [Debug] [USER] [Machine] [Source.Levels] first
03:00:29 [Error] [USER] [Machine] [Source.Levels] second
  detail line
";

/// Lines before the first header line that no recognizer claims.
pub const PREAMBLE_2_LOG4NET_1: &[u8] = b"\
# log opened
-----------
2019-06-22 19:34:13,510 [26] ERROR after preamble
";

/// Nothing any recognizer claims.
pub const UNKNOWN_3: &[u8] = b"\
foo
bar
baz
";

lazy_static! {
    /// `LOG4NET_3` with a byte order mark and `"\r\n"` line endings.
    pub static ref LOG4NET_3_BOM_CRLF: Vec<u8> = {
        let mut data: Vec<u8> = Vec::from(&crate::common::BOM_UTF8[..]);
        for byte_ in LOG4NET_3.iter() {
            if *byte_ == b'\n' {
                data.push(b'\r');
            }
            data.push(*byte_);
        }
        data
    };
}

/// Create a `ByteSliceScanner` named `FILENAME_TEST`.
pub fn new_ByteSliceScanner(data: &[u8]) -> ByteSliceScanner<'_> {
    ByteSliceScanner::new(data, FILENAME_TEST)
}

/// Collect all `Line`s of a `LineScanner`.
pub fn scan_all_lines<'a, S: LineScanner<'a>>(linescanner: &mut S) -> Vec<&'a [u8]> {
    let mut lines: Vec<&'a [u8]> = Vec::new();
    while linescanner.scan() {
        lines.push(linescanner.bytes());
    }

    lines
}

/// Collect all `LogEntry`s of an `EntryScanner` using `scan`.
pub fn scan_all_entries<'a, S: LineScanner<'a>>(
    entryscanner: &mut EntryScanner<'a, S>,
) -> Vec<LogEntry<'a>> {
    let mut entries: Vec<LogEntry<'a>> = Vec::new();
    while entryscanner.scan() {
        entries.push(entryscanner.take_entry().unwrap());
    }

    entries
}

/// Count `Found` results of `find_next_entry` until `Done` or `Err`.
pub fn count_found<'a, S: LineScanner<'a>>(
    entryscanner: &mut EntryScanner<'a, S>,
) -> (Count, Option<ScanError>) {
    let mut count: Count = 0;
    loop {
        match entryscanner.find_next_entry() {
            ResultS3::Found(_) => count += 1,
            ResultS3::Done => return (count, None),
            ResultS3::Err(err) => return (count, Some(err)),
        }
    }
}
