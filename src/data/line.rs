// src/data/line.rs

//! Implement [`Line`] and the [`ClonedSlices`] defensive copy.
//!
//! [`Line`]: crate::data::line::Line
//! [`ClonedSlices`]: crate::data::line::ClonedSlices

use crate::common::Bytes;

use std::fmt;

use ::bstr::ByteSlice;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A "line"; a non-owning view into the scanned buffer, not including the
/// line terminator.
///
/// Valid as long as the scanned buffer is alive.
pub type Line<'a> = &'a [u8];

/// A sequence of [`Line`] that make up the message of a [`LogEntry`].
///
/// [`LogEntry`]: crate::data::logentry::LogEntry
pub type Lines<'a> = Vec<Line<'a>>;

/// A byte offset into a [`Line`].
pub type LineIndex = usize;

/// Half-open [`Range`] of [`LineIndex`].
///
/// [`Range`]: std::ops::Range
pub type RangeLineIndex = std::ops::Range<LineIndex>;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ClonedSlices
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// An owned copy of a sequence of byte slices.
///
/// All slices are copied into one contiguous allocation; each copied slice
/// is recalled by its range into that allocation.
///
/// For callers that must keep field values after the scanned buffer is
/// gone. Created by [`clone_bytes_slices`].
#[derive(Clone, Default, Eq, PartialEq)]
pub struct ClonedSlices {
    data: Bytes,
    ranges: Vec<RangeLineIndex>,
}

impl ClonedSlices {
    /// Count of slices copied.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Sum of the lengths of all slices copied.
    pub fn count_bytes(&self) -> usize {
        self.data.len()
    }

    /// Get the copy of slice at `index`.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        match self.ranges.get(index) {
            Some(range) => Some(&self.data[range.clone()]),
            None => None,
        }
    }

    /// Iterate the copied slices in their original order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.ranges
            .iter()
            .map(move |range| &self.data[range.clone()])
    }
}

impl fmt::Debug for ClonedSlices {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|slice| slice.as_bstr()))
            .finish()
    }
}

/// Copy all of `input` into one new contiguous buffer.
///
/// Allocates once for the data and once for the ranges.
pub fn clone_bytes_slices(input: &[&[u8]]) -> ClonedSlices {
    let length: usize = input
        .iter()
        .map(|slice| slice.len())
        .sum();
    defn!("input.len() {}, bytes {}", input.len(), length);
    let mut data: Bytes = Bytes::with_capacity(length);
    let mut ranges: Vec<RangeLineIndex> = Vec::with_capacity(input.len());
    for slice in input.iter() {
        let beg: LineIndex = data.len();
        data.extend_from_slice(slice);
        ranges.push(beg..data.len());
    }
    defx!();

    ClonedSlices { data, ranges }
}
