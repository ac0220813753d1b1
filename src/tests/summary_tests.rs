// src/tests/summary_tests.rs

//! tests for `summary.rs`

#![allow(non_snake_case)]

use crate::common::ScanError;
use crate::readers::entryscanner::ScanState;
use crate::readers::recognizer::RecognizerKind;
use crate::readers::summary::SummaryEntryScanner;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn test_SummaryEntryScanner_new() {
    let summary = SummaryEntryScanner::new(
        String::from("a.log"),
        10,
        2,
        3,
        Some(RecognizerKind::NLog),
        ScanState::Done,
        None,
    );
    assert!(summary.is_ok());
    assert_eq!(summary.EntryScanner_lines, 10);
    let s = format!("{:?}", summary);
    assert!(s.contains("recognizer: nlog"), "{}", s);
    assert!(s.contains("lines skipped: 2"), "{}", s);
}

#[test]
fn test_SummaryEntryScanner_error() {
    let summary = SummaryEntryScanner::new(
        String::from("a.log"),
        1,
        0,
        0,
        None,
        ScanState::Failed,
        Some(ScanError::LineScanner(String::from("x"))),
    );
    assert!(!summary.is_ok());
    let s = format!("{:?}", summary);
    assert!(s.contains("recognizer: (none)"), "{}", s);
}

#[test]
#[should_panic]
#[cfg(debug_assertions)]
fn test_SummaryEntryScanner_new_bad_counts() {
    SummaryEntryScanner::new(
        String::from("a.log"),
        1,
        2,
        0,
        None,
        ScanState::Done,
        None,
    );
}
