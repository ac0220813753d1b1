// src/readers/summary.rs

//! Implements `SummaryEntryScanner` statistics tracking struct.

#![allow(non_snake_case)]

use crate::common::{Count, FPath, ScanError};
use crate::readers::entryscanner::ScanState;
use crate::readers::recognizer::RecognizerKind;

use std::fmt;

use ::more_asserts::debug_assert_ge;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// SummaryEntryScanner
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Accumulated statistics about the activity of one [`EntryScanner`].
///
/// [`EntryScanner`]: crate::readers::entryscanner::EntryScanner
#[derive(Clone, Eq, PartialEq)]
pub struct SummaryEntryScanner {
    /// Name of the scanned data.
    pub filename: FPath,
    /// `Count` of lines passed to any `Recognizer`.
    pub EntryScanner_lines: Count,
    /// `Count` of lines claimed by no `Recognizer` before commitment.
    pub EntryScanner_lines_skipped: Count,
    /// `Count` of `LogEntry`s returned.
    pub EntryScanner_entries: Count,
    /// The committed `Recognizer`, if any.
    pub EntryScanner_recognizer: Option<RecognizerKind>,
    pub EntryScanner_state: ScanState,
    /// The fatal error, if any.
    pub EntryScanner_error: Option<ScanError>,
}

impl SummaryEntryScanner {
    pub fn new(
        filename: FPath,
        EntryScanner_lines: Count,
        EntryScanner_lines_skipped: Count,
        EntryScanner_entries: Count,
        EntryScanner_recognizer: Option<RecognizerKind>,
        EntryScanner_state: ScanState,
        EntryScanner_error: Option<ScanError>,
    ) -> SummaryEntryScanner {
        // some sanity checks
        debug_assert_ge!(EntryScanner_lines, EntryScanner_lines_skipped, "There are less Lines than skipped Lines");
        debug_assert_ge!(EntryScanner_lines, EntryScanner_entries, "There are less Lines than LogEntrys");

        SummaryEntryScanner {
            filename,
            EntryScanner_lines,
            EntryScanner_lines_skipped,
            EntryScanner_entries,
            EntryScanner_recognizer,
            EntryScanner_state,
            EntryScanner_error,
        }
    }

    /// Did scanning finish without a fatal error?
    pub fn is_ok(&self) -> bool {
        self.EntryScanner_error.is_none()
    }
}

impl fmt::Debug for SummaryEntryScanner {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("")
            .field("filename", &self.filename)
            .field("lines", &self.EntryScanner_lines)
            .field("lines skipped", &self.EntryScanner_lines_skipped)
            .field("entries", &self.EntryScanner_entries)
            .field("recognizer", &format_args!("{}", match self.EntryScanner_recognizer {
                Some(kind) => kind.as_str(),
                None => "(none)",
            }))
            .field("state", &self.EntryScanner_state)
            .field("error", &self.EntryScanner_error)
            .finish()
    }
}
