//! Indexing
//!
//! First stage of the pipeline: discover and repair the structural skeleton
//! of a pos file without touching numeric content.
//!
//! The scanner makes one forward pass and records the byte offset
//! immediately after every structural line, as four offset lists (data
//! opens, dones, box opens, eofs) plus per-open metadata. Because files are
//! routinely truncated mid-write, the two open/close streams can disagree;
//! the aligner prunes opening tags until each stream is a 1:1 matched
//! sequence satisfying the sandwich invariant
//! `open[i] < close[i] < open[i+1]`. The frame index is the immutable result
//! both extractors consume.

pub mod aligner;
pub mod frame_index;
pub mod scanner;

pub use aligner::{align, AlignOutcome};
pub use frame_index::{
    BoxFrame, DataFrame, Diagnostic, FrameIndex, RawTagCounts, RepairStats, StreamKind,
};
pub use scanner::{scan, DefTags, OpenTags, TagScan};
