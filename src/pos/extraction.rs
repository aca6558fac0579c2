//! Extraction
//!
//! Second stage of the pipeline: materialize the regions recorded in a
//! [`FrameIndex`](crate::pos::indexing::FrameIndex) into dense, rectangular
//! `f32` arrays. Frames are ragged (each has its own row count and
//! dimensionality); the extractors compute the per-array maxima, allocate a
//! zero-initialized `[frames][max_points][max_dims]` block, and copy rows in
//! left-justified so unused cells stay zero.
//!
//! Failure containment: a bad token fails only its own frame. The frame's
//! slab is reset to zero, a [`FrameError`] is recorded, and extraction moves
//! on. Only I/O failure aborts the whole grab.

use std::fmt;
use std::io::{self, BufRead, Seek, SeekFrom};

use serde::Serialize;

use crate::pos::lexing::{classify_line, LineKind};

pub mod boxes;
pub mod data;
pub mod dense;

pub use boxes::{BoxDecode, BoxDecoder, BoxGrab};
pub use data::DataGrab;
pub use dense::DenseArray;

/// Why one frame's extraction failed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FrameErrorKind {
    /// A row token did not lex as a numeric literal
    BadNumber { row: usize, token: String },
    /// A row ended before yielding the frame's dimension count
    ShortRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The external box decoder rejected a row
    Decode { row: usize, message: String },
}

/// Extraction failure of a single frame; other frames are unaffected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameError {
    pub frame: usize,
    pub kind: FrameErrorKind,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FrameErrorKind::BadNumber { row, token } => {
                write!(
                    f,
                    "frame {}: row {}: '{}' is not a number",
                    self.frame, row, token
                )
            }
            FrameErrorKind::ShortRow {
                row,
                expected,
                found,
            } => {
                write!(
                    f,
                    "frame {}: row {}: expected {} values, found {}",
                    self.frame, row, expected, found
                )
            }
            FrameErrorKind::Decode { row, message } => {
                write!(f, "frame {}: row {}: {}", self.frame, row, message)
            }
        }
    }
}

impl std::error::Error for FrameError {}

/// Fill-phase failure: either fatal I/O or a contained frame error
pub(crate) enum FillError {
    Io(io::Error),
    Frame(FrameErrorKind),
}

impl From<io::Error> for FillError {
    fn from(err: io::Error) -> Self {
        FillError::Io(err)
    }
}

/// Count the rows of one indexed region.
///
/// `close` is the offset after the closing tag line, so the last line read
/// ends exactly at `close` and is the closing tag itself - never counted.
/// With `skip_defs`, `def` lines are consumed but excluded from the count
/// (they declare shape templates, not data points).
pub(crate) fn count_region_rows<R: BufRead + Seek>(
    reader: &mut R,
    open: u64,
    close: u64,
    skip_defs: bool,
) -> io::Result<usize> {
    reader.seek(SeekFrom::Start(open))?;
    let mut cursor = open;
    let mut count = 0;
    let mut line = String::new();
    while cursor < close {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            break;
        }
        cursor += read as u64;
        if cursor >= close {
            break;
        }
        if skip_defs && classify_line(&line) == LineKind::Def {
            continue;
        }
        count += 1;
    }
    Ok(count)
}
