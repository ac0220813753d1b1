// src/tests/entryscanner_tests.rs

//! tests for `entryscanner.rs`

#![allow(non_snake_case)]

use crate::common::{Count, FileOffset, ResultS3, ScanError};
use crate::data::datetime::{ymdhmsn, PLACEHOLDER_DATE};
use crate::data::line::Line;
use crate::data::logentry::LogEntry;
use crate::readers::entryscanner::{EntryScanner, ScanState};
use crate::readers::linescanner::{ByteSliceScanner, LineScanner};
use crate::readers::recognizer::RecognizerKind;
use crate::tests::common::{
    count_found,
    new_ByteSliceScanner,
    scan_all_entries,
    LOG4NET_3,
    LOG4NET_3_BOM_CRLF,
    NLOG_2,
    PREAMBLE_2_LOG4NET_1,
    UNKNOWN_3,
};

use std::io::{Error, ErrorKind};

use ::bstr::ByteSlice;
#[allow(unused_imports)]
use ::si_trace_print::printers::{defn, defo, defx};
use ::test_case::test_case;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn new_EntryScanner(data: &[u8]) -> EntryScanner<'_, ByteSliceScanner<'_>> {
    EntryScanner::new(new_ByteSliceScanner(data))
}

/// messages of each entry, as `String`s
fn messages(entries: &[LogEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.message_to_String_lossy())
        .collect()
}

#[test]
fn test_EntryScanner_new() {
    let entryscanner = new_EntryScanner(LOG4NET_3);
    assert_eq!(entryscanner.state(), ScanState::Detecting);
    assert_eq!(entryscanner.recognizer_kind(), None);
    assert!(entryscanner.entry().is_none());
    assert!(entryscanner.error().is_none());
    assert_eq!(entryscanner.filename(), "test.log");
    assert_eq!(entryscanner.count_entries_found(), 0);
    // Debug does not panic
    let _s = format!("{:?}", entryscanner);
}

#[test]
fn test_EntryScanner_Log4Net() {
    let mut entryscanner = new_EntryScanner(LOG4NET_3);
    let entries = scan_all_entries(&mut entryscanner);
    assert!(entryscanner.error().is_none(), "{:?}", entryscanner.error());
    assert_eq!(entryscanner.state(), ScanState::Done);
    assert_eq!(entryscanner.recognizer_kind(), Some(RecognizerKind::Log4Net));
    assert_eq!(entries.len(), 3);
    assert_eq!(
        messages(&entries),
        vec![
            "Something failed\nSystem.Exception: boom\n   at Foo.Bar() in Foo.cs:line 12",
            "recovered",
            "low disk",
        ]
    );
    assert_eq!(Some(*entries[0].dt()), ymdhmsn(2019, 6, 22, 19, 34, 13, 510_000_000));
    assert_eq!(Some(*entries[1].dt()), ymdhmsn(2019, 6, 22, 19, 34, 14, 1_000_000));
    assert_eq!(Some(*entries[2].dt()), ymdhmsn(2019, 6, 22, 19, 34, 15, 0));
    assert_eq!(entries[0].level(), b"ERROR");
    assert_eq!(entries[0].thread(), Some(&b"26"[..]));
    assert_eq!(entries[2].thread(), Some(&b"main thread"[..]));
    assert_eq!(entries[2].level(), b"WARN");
    assert_eq!(entryscanner.count_entries_found(), 3);
    assert_eq!(entryscanner.count_lines_processed(), 5);
    assert_eq!(entryscanner.count_lines_skipped(), 0);
}

#[test]
fn test_EntryScanner_NLog() {
    let mut entryscanner = new_EntryScanner(NLOG_2);
    let entries = scan_all_entries(&mut entryscanner);
    assert!(entryscanner.error().is_none(), "{:?}", entryscanner.error());
    assert_eq!(entryscanner.recognizer_kind(), Some(RecognizerKind::NLog));
    assert_eq!(messages(&entries), vec!["first", "second\n  detail line"]);
    for entry in entries.iter() {
        assert_eq!(entry.dt().date_naive(), *PLACEHOLDER_DATE);
        assert_eq!(entry.user(), Some(&b"USER"[..]));
        assert_eq!(entry.machine(), Some(&b"Machine"[..]));
        assert_eq!(entry.source(), Some(&b"Source.Levels"[..]));
    }
    assert_eq!(entries[0].level(), b"Debug");
    assert_eq!(entries[1].level(), b"Error");
}

/// the same entries regardless of byte order mark and line endings
#[test]
fn test_EntryScanner_Log4Net_bom_crlf() {
    let mut entryscanner1 = new_EntryScanner(LOG4NET_3);
    let mut entryscanner2 = new_EntryScanner(LOG4NET_3_BOM_CRLF.as_slice());
    let entries1 = scan_all_entries(&mut entryscanner1);
    let entries2 = scan_all_entries(&mut entryscanner2);
    assert_eq!(messages(&entries1), messages(&entries2));
    assert!(entryscanner2.error().is_none());
}

/// the last entry is only returned at end of input, and only once
#[test]
fn test_EntryScanner_flush_once() {
    let data: &[u8] = b"2019-06-22 19:34:13,510 [26] ERROR only\n  more\n";
    let mut entryscanner = new_EntryScanner(data);
    match entryscanner.find_next_entry() {
        ResultS3::Found(entry) => {
            assert_eq!(entry.message(), &[&b"only"[..], &b"  more"[..]]);
        }
        result => panic!("expected Found, got {}", result),
    }
    assert_eq!(entryscanner.state(), ScanState::Done);
    for _ in 0..3 {
        assert!(entryscanner.find_next_entry().is_done());
        assert!(!entryscanner.scan());
        assert!(entryscanner.entry().is_none());
    }
    assert_eq!(entryscanner.count_entries_found(), 1);
}

#[test_case(b""; "empty")]
#[test_case(b"\xEF\xBB\xBF"; "only bom")]
#[test_case(b"\n\n\n"; "empty lines")]
fn test_EntryScanner_empty(data: &[u8]) {
    let mut entryscanner = new_EntryScanner(data);
    assert!(!entryscanner.scan());
    assert!(entryscanner.error().is_none());
    assert_eq!(entryscanner.state(), ScanState::Done);
    assert_eq!(entryscanner.recognizer_kind(), None);
}

/// lines before the first header line are skipped, not errors
#[test]
fn test_EntryScanner_preamble_skipped() {
    let mut entryscanner = new_EntryScanner(PREAMBLE_2_LOG4NET_1);
    let entries = scan_all_entries(&mut entryscanner);
    assert!(entryscanner.error().is_none(), "{:?}", entryscanner.error());
    assert_eq!(messages(&entries), vec!["after preamble"]);
    assert_eq!(entryscanner.count_lines_skipped(), 2);
    assert_eq!(entryscanner.count_lines_processed(), 3);
}

#[test]
fn test_EntryScanner_unknown() {
    let mut entryscanner = new_EntryScanner(UNKNOWN_3);
    assert_eq!(count_found(&mut entryscanner), (0, None));
    assert_eq!(entryscanner.state(), ScanState::Done);
    assert_eq!(entryscanner.recognizer_kind(), None);
    assert_eq!(entryscanner.count_lines_skipped(), 3);
}

/// once committed, lines of another format are continuation lines
#[test]
fn test_EntryScanner_committed_ignores_other_format() {
    let data: &[u8] = b"\
2019-06-22 19:34:13,510 [26] ERROR a
03:00:28 [Debug] [USER] [Machine] [Source] looks like nlog
";
    let mut entryscanner = new_EntryScanner(data);
    let entries = scan_all_entries(&mut entryscanner);
    assert!(entryscanner.error().is_none());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].count_message_lines(), 2);
}

#[test]
fn test_EntryScanner_AmbiguousData() {
    let mut entryscanner = EntryScanner::with_recognizers(
        new_ByteSliceScanner(LOG4NET_3),
        &[RecognizerKind::Log4Net, RecognizerKind::Log4Net],
    );
    assert!(!entryscanner.scan());
    assert_eq!(
        entryscanner.error(),
        Some(&ScanError::AmbiguousData {
            first: RecognizerKind::Log4Net,
            second: RecognizerKind::Log4Net,
        })
    );
    assert_eq!(entryscanner.state(), ScanState::Failed);
    assert_eq!(entryscanner.recognizer_kind(), None);
    // failure is permanent
    assert!(!entryscanner.scan());
    assert!(entryscanner.find_next_entry().is_done());
}

#[test]
fn test_EntryScanner_with_recognizers_subset() {
    let mut entryscanner = EntryScanner::with_recognizers(
        new_ByteSliceScanner(LOG4NET_3),
        &[RecognizerKind::NLog],
    );
    assert_eq!(count_found(&mut entryscanner), (0, None));
    assert_eq!(entryscanner.count_lines_skipped(), 5);

    let mut entryscanner = EntryScanner::with_recognizers(new_ByteSliceScanner(LOG4NET_3), &[]);
    assert_eq!(count_found(&mut entryscanner), (0, None));
}

/// a bad datetime on the detecting line is fatal
#[test]
fn test_EntryScanner_DateTime_error_detecting() {
    let data: &[u8] = b"2019-06-22 19:34:99,510 [26] ERROR bad second\n";
    let mut entryscanner = new_EntryScanner(data);
    let (count, err) = count_found(&mut entryscanner);
    assert_eq!(count, 0);
    assert!(matches!(err, Some(ScanError::DateTime { .. })), "{:?}", err);
    assert_eq!(entryscanner.state(), ScanState::Failed);
}

/// second `60` is not a leap second; it is a fatal datetime error
#[test_case(b"2019-06-22 19:34:60 [26] ERROR leap\n"; "no fraction")]
#[test_case(b"2019-06-22 19:34:60,500 [26] ERROR leap\n"; "fraction")]
fn test_EntryScanner_DateTime_error_second_60(data: &[u8]) {
    let mut entryscanner = new_EntryScanner(data);
    assert!(!entryscanner.scan());
    match entryscanner.error() {
        Some(ScanError::DateTime { source: None, .. }) => {}
        err => panic!("expected DateTime error without source, got {:?}", err),
    }
    assert_eq!(entryscanner.count_entries_found(), 0);
}

/// a bad datetime after commitment is fatal; the open entry is not returned
#[test]
fn test_EntryScanner_DateTime_error_committed() {
    let data: &[u8] = b"\
2019-06-22 19:34:13,510 [26] ERROR a
2019-06-22 19:34:14,510 [26] ERROR b
2019-13-22 19:34:15,510 [26] ERROR bad month
2019-06-22 19:34:16,510 [26] ERROR d
";
    let mut entryscanner = new_EntryScanner(data);
    assert!(entryscanner.scan());
    assert_eq!(entryscanner.entry().unwrap().message(), &[&b"a"[..]]);
    assert!(!entryscanner.scan());
    match entryscanner.error() {
        Some(ScanError::DateTime { data, .. }) => assert_eq!(data, "2019-13-22 19:34:15.510"),
        err => panic!("expected DateTime error, got {:?}", err),
    }
    assert_eq!(entryscanner.recognizer_kind(), Some(RecognizerKind::Log4Net));
    assert_eq!(entryscanner.count_lines_processed(), 3);
}

/// `find_next_entry` keeps its fatal error for `error` and `summary`
#[test]
fn test_EntryScanner_find_next_entry_keeps_error() {
    let data: &[u8] = b"\
2019-06-22 19:34:13,510 [26] ERROR a
2019-06-22 19:34:14,510 [26] ERROR b
2019-13-22 19:34:15,510 [26] ERROR bad month
";
    let mut entryscanner = new_EntryScanner(data);
    assert!(entryscanner.find_next_entry().is_ok());
    let err = match entryscanner.find_next_entry() {
        ResultS3::Err(err) => err,
        result => panic!("expected Err, got {}", result),
    };
    assert!(matches!(err, ScanError::DateTime { .. }), "{:?}", err);
    assert_eq!(entryscanner.error(), Some(&err));
    assert_eq!(entryscanner.state(), ScanState::Failed);
    let summary = entryscanner.summary();
    assert_eq!(summary.EntryScanner_error, Some(err.clone()));
    assert!(!summary.is_ok());
    // later calls are `Done` and the error stays
    assert!(entryscanner.find_next_entry().is_done());
    assert_eq!(entryscanner.error(), Some(&err));
}

/// after a fatal error, the `LineScanner` may be recovered and advanced
#[test]
fn test_EntryScanner_into_linescanner_resume() {
    let data: &[u8] = b"\
2019-13-22 19:34:15,510 [26] ERROR bad month
2019-06-22 19:34:16,510 [26] ERROR good
";
    let mut entryscanner = new_EntryScanner(data);
    assert!(!entryscanner.scan());
    assert!(entryscanner.error().is_some());
    let linescanner = entryscanner.into_linescanner();
    // positioned after the bad line
    assert_eq!(linescanner.position(), 45);
    let mut entryscanner = EntryScanner::new(linescanner);
    let entries = scan_all_entries(&mut entryscanner);
    assert_eq!(messages(&entries), vec!["good"]);
}

/// `take_entry` hands over ownership; entries outlive the `EntryScanner`
#[test]
fn test_EntryScanner_take_entry() {
    let entries: Vec<LogEntry> = {
        let mut entryscanner = new_EntryScanner(LOG4NET_3);
        let mut entries = Vec::new();
        while entryscanner.scan() {
            assert!(entryscanner.entry().is_some());
            entries.push(entryscanner.take_entry().unwrap());
            assert!(entryscanner.entry().is_none());
        }
        entries
    };
    assert_eq!(entries.len(), 3);
    // fields point into the scanned data
    assert_eq!(entries[0].level().as_ptr(), LOG4NET_3[29..].as_ptr());
}

#[test]
fn test_EntryScanner_summary() {
    let mut entryscanner = new_EntryScanner(PREAMBLE_2_LOG4NET_1);
    scan_all_entries(&mut entryscanner);
    let summary = entryscanner.summary();
    assert_eq!(summary.filename, "test.log");
    assert_eq!(summary.EntryScanner_lines, 3);
    assert_eq!(summary.EntryScanner_lines_skipped, 2);
    assert_eq!(summary.EntryScanner_entries, 1);
    assert_eq!(summary.EntryScanner_recognizer, Some(RecognizerKind::Log4Net));
    assert_eq!(summary.EntryScanner_state, ScanState::Done);
    assert!(summary.is_ok());
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// a LineScanner that fails
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Returns the lines of a `ByteSliceScanner`, then reports an error.
struct FailingLineScanner<'a> {
    linescanner: ByteSliceScanner<'a>,
    error: Option<Error>,
}

impl<'a> LineScanner<'a> for FailingLineScanner<'a> {
    fn scan(&mut self) -> bool {
        if self.linescanner.scan() {
            return true;
        }
        self.error = Some(Error::new(ErrorKind::UnexpectedEof, "truncated"));

        false
    }

    fn bytes(&self) -> Line<'a> {
        self.linescanner.bytes()
    }

    fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    fn position(&self) -> FileOffset {
        self.linescanner.position()
    }

    fn length(&self) -> FileOffset {
        self.linescanner.length()
    }

    fn seek(&mut self, pos: FileOffset) {
        self.linescanner.seek(pos)
    }

    fn filename(&self) -> &str {
        self.linescanner.filename()
    }
}

/// an error of the `LineScanner` is fatal; the open entry is not flushed
#[test]
fn test_EntryScanner_LineScanner_error() {
    let linescanner = FailingLineScanner {
        linescanner: new_ByteSliceScanner(LOG4NET_3),
        error: None,
    };
    let mut entryscanner = EntryScanner::new(linescanner);
    let (count, err) = count_found(&mut entryscanner);
    assert_eq!(count, 2 as Count);
    match err {
        Some(ScanError::LineScanner(s)) => assert!(s.contains("truncated"), "{}", s),
        err => panic!("expected LineScanner error, got {:?}", err),
    }
    assert_eq!(entryscanner.state(), ScanState::Failed);
    assert!(matches!(entryscanner.error(), Some(ScanError::LineScanner(_))));
    assert!(!entryscanner.summary().is_ok());
}

/// every `Line` of a message is a slice of the scanned data
#[test]
fn test_EntryScanner_zero_copy() {
    let mut entryscanner = new_EntryScanner(LOG4NET_3);
    let entries = scan_all_entries(&mut entryscanner);
    let range = LOG4NET_3.as_ptr_range();
    for entry in entries.iter() {
        for line in entry.message().iter() {
            assert!(range.contains(&line.as_ptr()), "{:?}", line.as_bstr());
        }
    }
}
