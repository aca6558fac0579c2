//! Pos format parsing
//!
//! This module contains the full pos parsing pipeline:
//!
//! 1. `lexing` - logos tokenization of single lines and line classification
//! 2. `indexing` - the tag scanner, the stream aligner, and the frame index
//! 3. `extraction` - materialization of indexed regions into dense arrays
//! 4. `file` - the owning `PosFile` entry point
//!
//! The structural layer (`indexing`) never interprets numeric content; the
//! numeric layer (`extraction`) never re-discovers structure. Byte offsets
//! recorded by the scanner are the only contract between them.

pub mod extraction;
pub mod file;
pub mod indexing;
pub mod lexing;
pub mod testing;

pub use extraction::boxes::{BoxDecode, BoxDecoder, BoxGrab};
pub use extraction::data::DataGrab;
pub use extraction::dense::DenseArray;
pub use extraction::{FrameError, FrameErrorKind};
pub use file::{PosError, PosFile};
pub use indexing::frame_index::{BoxFrame, DataFrame, Diagnostic, FrameIndex, StreamKind};
