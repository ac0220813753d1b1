// src/readers/entryscanner.rs

//! Implements an [`EntryScanner`], the driver of deriving [`LogEntry`s]
//! using a [`LineScanner`] and [`Recognizer`]s.
//!
//! [`LogEntry`s]: crate::data::logentry::LogEntry
//! [`LineScanner`]: crate::readers::linescanner::LineScanner
//! [`Recognizer`]: crate::readers::recognizer::Recognizer

use crate::common::{Count, FPath, ResultS3, ScanError};
use crate::data::line::Line;
use crate::data::logentry::LogEntry;
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::buffer_to_String_noraw;
use crate::debug::printers::{de_err, de_wrn};
use crate::readers::linescanner::LineScanner;
use crate::readers::recognizer::{Recognizer, RecognizerKind, RECOGNIZERS_DEFAULT};
use crate::readers::summary::SummaryEntryScanner;

use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// EntryScanner
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// [`EntryScanner.find_next_entry()`] searching results.
///
/// [`EntryScanner.find_next_entry()`]: self::EntryScanner#method.find_next_entry
pub type ResultS3EntryFind<'a> = ResultS3<LogEntry<'a>, ScanError>;

/// The processing stage of an [`EntryScanner`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScanState {
    /// Every line is passed to every `Recognizer`.
    Detecting,
    /// One `Recognizer` claimed the data; the value is its index into
    /// `EntryScanner.recognizers`. Every line is passed only to it.
    Committed(usize),
    /// Input exhausted and the last entry, if any, returned.
    Done,
    /// A fatal error occurred; see [`EntryScanner::error`].
    Failed,
}

/// Reconstructs [`LogEntry`]s from a log of unknown format.
///
/// Initially each line is passed to every [`Recognizer`], in order. The first
/// line claimed by exactly one `Recognizer` commits the `EntryScanner` to that
/// `Recognizer`. A line claimed by more than one `Recognizer` is a fatal
/// [`ScanError::AmbiguousData`]. Lines claimed by none are skipped.
///
/// After commitment, each line is passed only to the committed `Recognizer`.
/// At end of input the open entry of the committed `Recognizer` is flushed.
///
/// Usage is a pull loop:
///
/// ```
/// # use logscan::readers::linescanner::ByteSliceScanner;
/// # use logscan::readers::entryscanner::EntryScanner;
/// let data = b"03:00:28 [Debug] [USER] [Machine] [Source] hello\n";
/// let mut entryscanner = EntryScanner::new(ByteSliceScanner::new(data, "nlog.log"));
/// while entryscanner.scan() {
///     let entry = entryscanner.entry().unwrap();
///     assert_eq!(entry.message(), &[&b"hello"[..]]);
/// }
/// assert!(entryscanner.error().is_none());
/// ```
///
/// Fatal errors are not recovered. A caller may take back the
/// `LineScanner` with [`into_linescanner`], `seek` it past the bad data,
/// and create a new `EntryScanner`.
///
/// _XXX: not a rust "Reader"; does not implement trait [`Read`]._
///
/// [`LogEntry`]: crate::data::logentry::LogEntry
/// [`into_linescanner`]: self::EntryScanner#method.into_linescanner
/// [`Read`]: std::io::Read
pub struct EntryScanner<'a, S: LineScanner<'a>> {
    pub(crate) linescanner: S,
    /// Registered `Recognizer`s, in the order they are tried.
    pub(crate) recognizers: Vec<Recognizer<'a>>,
    state: ScanState,
    /// Index of the committed `Recognizer`, kept after `Done` or `Failed`.
    committed_at: Option<usize>,
    /// The most recently found `LogEntry`.
    entry: Option<LogEntry<'a>>,
    /// The fatal error, if any.
    error: Option<ScanError>,
    /// `Count` of lines passed to any `Recognizer`.
    pub(super) lines_processed: Count,
    /// `Count` of lines claimed by no `Recognizer` before commitment.
    pub(super) lines_skipped: Count,
    /// `Count` of `LogEntry`s returned.
    pub(super) entries_found: Count,
}

impl<'a, S: LineScanner<'a>> fmt::Debug for EntryScanner<'a, S> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("EntryScanner")
            .field("filename", &self.linescanner.filename())
            .field("recognizers", &self.recognizers)
            .field("state", &self.state)
            .field("error", &self.error)
            .field("lines_processed", &self.lines_processed)
            .field("entries_found", &self.entries_found)
            .finish()
    }
}

impl<'a, S: LineScanner<'a>> EntryScanner<'a, S> {
    /// Create a new `EntryScanner` trying the [`RECOGNIZERS_DEFAULT`].
    pub fn new(linescanner: S) -> EntryScanner<'a, S> {
        EntryScanner::with_recognizers(linescanner, &RECOGNIZERS_DEFAULT)
    }

    /// Create a new `EntryScanner` trying the passed `kinds`, in order.
    ///
    /// The same kind may be passed more than once, though any line it
    /// claims is then ambiguous.
    pub fn with_recognizers(
        linescanner: S,
        kinds: &[RecognizerKind],
    ) -> EntryScanner<'a, S> {
        defñ!("({:?}, {:?})", linescanner.filename(), kinds);
        let recognizers: Vec<Recognizer<'a>> = kinds
            .iter()
            .map(|kind| Recognizer::new(*kind))
            .collect();

        EntryScanner {
            linescanner,
            recognizers,
            state: ScanState::Detecting,
            committed_at: None,
            entry: None,
            error: None,
            lines_processed: 0,
            lines_skipped: 0,
            entries_found: 0,
        }
    }

    /// Find the next `LogEntry`. Return `true` if found, then get it with
    /// [`entry`] or [`take_entry`].
    ///
    /// Return `false` at end of input or upon a fatal error; check
    /// [`error`].
    ///
    /// The previous entry is dropped.
    ///
    /// [`entry`]: self::EntryScanner#method.entry
    /// [`take_entry`]: self::EntryScanner#method.take_entry
    /// [`error`]: self::EntryScanner#method.error
    pub fn scan(&mut self) -> bool {
        self.entry = None;
        match self.find_next_entry() {
            ResultS3::Found(entry) => {
                self.entry = Some(entry);

                true
            }
            ResultS3::Done => false,
            ResultS3::Err(_) => false,
        }
    }

    /// The `LogEntry` found by the last successful [`scan`].
    ///
    /// [`scan`]: self::EntryScanner#method.scan
    pub fn entry(&self) -> Option<&LogEntry<'a>> {
        self.entry.as_ref()
    }

    /// Take ownership of the `LogEntry` found by the last successful
    /// [`scan`].
    ///
    /// [`scan`]: self::EntryScanner#method.scan
    pub fn take_entry(&mut self) -> Option<LogEntry<'a>> {
        self.entry.take()
    }

    /// The fatal error that stopped scanning, if any.
    pub fn error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// The kind of the committed `Recognizer`, if one was committed to.
    pub fn recognizer_kind(&self) -> Option<RecognizerKind> {
        self.committed_at
            .map(|at| self.recognizers[at].kind())
    }

    pub fn filename(&self) -> &str {
        self.linescanner.filename()
    }

    /// `Count` of `LogEntry`s returned.
    pub fn count_entries_found(&self) -> Count {
        self.entries_found
    }

    /// `Count` of lines passed to any `Recognizer`.
    pub fn count_lines_processed(&self) -> Count {
        self.lines_processed
    }

    /// `Count` of lines, before commitment, that no `Recognizer` claimed.
    pub fn count_lines_skipped(&self) -> Count {
        self.lines_skipped
    }

    /// Return the `LineScanner`, e.g. to `seek` past bad data.
    pub fn into_linescanner(self) -> S {
        self.linescanner
    }

    /// Find the next `LogEntry`.
    ///
    /// Returns `Done` forever after the input is exhausted and forever
    /// after an `Err`. The `Err` is returned only once and is kept for
    /// [`error`].
    ///
    /// [`error`]: self::EntryScanner#method.error
    pub fn find_next_entry(&mut self) -> ResultS3EntryFind<'a> {
        defn!("state {:?}", self.state);
        match self.state {
            ScanState::Done | ScanState::Failed => {
                defx!("return Done; state {:?}", self.state);
                return ResultS3::Done;
            }
            ScanState::Detecting | ScanState::Committed(_) => {}
        }
        while self.linescanner.scan() {
            let line: Line<'a> = self.linescanner.bytes();
            self.lines_processed += 1;
            let result: Result<Option<LogEntry<'a>>, ScanError> = match self.state {
                ScanState::Detecting => self.detect(line),
                ScanState::Committed(at) => self.recognizers[at].consume(line),
                ScanState::Done | ScanState::Failed => {
                    unreachable!("bad state {:?}", self.state);
                }
            };
            match result {
                Ok(Some(entry)) => {
                    self.entries_found += 1;
                    defx!("return Found; line {}", self.lines_processed);
                    return ResultS3::Found(entry);
                }
                Ok(None) => {}
                Err(err) => {
                    defx!("return Err({}); line {}", err, self.lines_processed);
                    return self.fail(err);
                }
            }
        }
        if let Some(err) = self.linescanner.error() {
            let err = ScanError::LineScanner(err.to_string());
            defx!("return Err({})", err);
            return self.fail(err);
        }
        let flushed: Option<LogEntry<'a>> = match self.state {
            ScanState::Committed(at) => self.recognizers[at].flush(),
            _ => None,
        };
        self.state = ScanState::Done;
        if self.committed_at.is_none() && self.lines_skipped != 0 {
            de_wrn!("{:?}: no recognizer claimed any of {} lines", self.linescanner.filename(), self.lines_skipped);
        }
        match flushed {
            Some(entry) => {
                self.entries_found += 1;
                defx!("return Found; flushed");

                ResultS3::Found(entry)
            }
            None => {
                defx!("return Done");

                ResultS3::Done
            }
        }
    }

    /// Move to `Failed` and keep `err` for [`error`].
    ///
    /// [`error`]: self::EntryScanner#method.error
    fn fail(
        &mut self,
        err: ScanError,
    ) -> ResultS3EntryFind<'a> {
        de_err!("{:?}: {}", self.linescanner.filename(), err);
        self.state = ScanState::Failed;
        self.error = Some(err.clone());

        ResultS3::Err(err)
    }

    /// Pass `line` to every `Recognizer`. Commit if exactly one claims it.
    ///
    /// Every `Recognizer` is tried, even after one claims `line`, so that
    /// ambiguity is found.
    fn detect(
        &mut self,
        line: Line<'a>,
    ) -> Result<Option<LogEntry<'a>>, ScanError> {
        defn!("{:?}", buffer_to_String_noraw(line));
        // index and kind of the claiming recognizer, and what it returned
        let mut claimed: Option<(usize, RecognizerKind, Option<LogEntry<'a>>)> = None;
        for (at, recognizer) in self.recognizers.iter_mut().enumerate() {
            match recognizer.consume(line) {
                Ok(entry_opt) => {
                    if let Some((_, kind_first, _)) = &claimed {
                        defx!("AmbiguousData; {} and {}", kind_first, recognizer.kind());
                        return Err(ScanError::AmbiguousData {
                            first: *kind_first,
                            second: recognizer.kind(),
                        });
                    }
                    claimed = Some((at, recognizer.kind(), entry_opt));
                }
                Err(ScanError::UnknownData) => {}
                Err(err) => {
                    defx!("{}: error {}", recognizer.kind(), err);
                    return Err(err);
                }
            }
        }
        match claimed {
            Some((at, _kind, entry_opt)) => {
                self.state = ScanState::Committed(at);
                self.committed_at = Some(at);
                defx!("committed to {} at line {}", _kind, self.lines_processed);

                Ok(entry_opt)
            }
            None => {
                self.lines_skipped += 1;
                defx!("no recognizer claimed line {}", self.lines_processed);

                Ok(None)
            }
        }
    }

    /// Statistics of this `EntryScanner`.
    pub fn summary(&self) -> SummaryEntryScanner {
        SummaryEntryScanner::new(
            FPath::from(self.linescanner.filename()),
            self.lines_processed,
            self.lines_skipped,
            self.entries_found,
            self.recognizer_kind(),
            self.state,
            self.error.clone(),
        )
    }
}
