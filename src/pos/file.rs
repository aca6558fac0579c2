//! Pos file loading
//!
//! This module provides `PosFile` - the owning entry point for parsing a pos
//! trajectory. Construction runs the full index build (scan + repair); the
//! value is read-only afterward and hands out extraction shortcuts. Every
//! pass opens a fresh reader from the owned source and drops it when the
//! pass ends, so the underlying file handle is never held between passes.
//!
//! # Example
//!
//! ```rust
//! use pos::pos::file::PosFile;
//!
//! // From a file on disk
//! let file = PosFile::from_path("trajectory.pos").unwrap();
//! println!("{} data frames", file.index().ndata());
//! let grab = file.grab_data().unwrap();
//!
//! // From a string
//! let file = PosFile::from_string("#[data] x\n1\n#[done]\n").unwrap();
//! assert_eq!(file.index().ndata(), 1);
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::pos::extraction::boxes::{decode_box_rows, grab_box, BoxDecode, BoxDecoder, BoxGrab};
use crate::pos::extraction::data::{grab_data, DataGrab};
use crate::pos::indexing::{scan, FrameIndex};

/// Error that can occur when loading or extracting a pos file
#[derive(Debug, Clone)]
pub enum PosError {
    /// IO error when opening, seeking, or reading the source
    IoError(String),
}

impl fmt::Display for PosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PosError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for PosError {}

impl From<io::Error> for PosError {
    fn from(err: io::Error) -> Self {
        PosError::IoError(err.to_string())
    }
}

/// Where the bytes come from
enum Source {
    Path(PathBuf),
    Memory(String),
}

/// A reader for one pass over the source
pub(crate) enum Reader<'a> {
    File(BufReader<File>),
    Memory(Cursor<&'a [u8]>),
}

impl Read for Reader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Reader::File(r) => r.read(buf),
            Reader::Memory(r) => r.read(buf),
        }
    }
}

impl BufRead for Reader<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            Reader::File(r) => r.fill_buf(),
            Reader::Memory(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Reader::File(r) => r.consume(amt),
            Reader::Memory(r) => r.consume(amt),
        }
    }
}

impl Seek for Reader<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Reader::File(r) => r.seek(pos),
            Reader::Memory(r) => r.seek(pos),
        }
    }
}

impl Source {
    fn reader(&self) -> Result<Reader<'_>, PosError> {
        match self {
            Source::Path(path) => Ok(Reader::File(BufReader::new(File::open(path)?))),
            Source::Memory(text) => Ok(Reader::Memory(Cursor::new(text.as_bytes()))),
        }
    }
}

/// An indexed pos trajectory
///
/// `PosFile` owns the source and the repaired [`FrameIndex`]. The index is
/// built exactly once, at construction; extraction methods re-read the
/// indexed regions on demand.
pub struct PosFile {
    source: Source,
    index: FrameIndex,
}

impl PosFile {
    /// Open and index a pos file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PosError> {
        Self::build(Source::Path(path.as_ref().to_path_buf()))
    }

    /// Index an in-memory pos document.
    pub fn from_string<S: Into<String>>(text: S) -> Result<Self, PosError> {
        Self::build(Source::Memory(text.into()))
    }

    fn build(source: Source) -> Result<Self, PosError> {
        let tags = scan(source.reader()?)?;
        Ok(Self {
            index: FrameIndex::from_scan(tags),
            source,
        })
    }

    /// The repaired structural index
    pub fn index(&self) -> &FrameIndex {
        &self.index
    }

    /// Extract all data frames into a dense zero-padded array.
    pub fn grab_data(&self) -> Result<DataGrab, PosError> {
        Ok(grab_data(self.source.reader()?, &self.index)?)
    }

    /// Extract all box frames into a dense zero-padded array (defs excluded).
    pub fn grab_box(&self) -> Result<BoxGrab, PosError> {
        Ok(grab_box(self.source.reader()?, &self.index)?)
    }

    /// Deliver each box frame's rows to an external [`BoxDecoder`].
    pub fn decode_box_rows<D: BoxDecoder>(
        &self,
        decoder: &D,
    ) -> Result<BoxDecode<D::Record>, PosError> {
        Ok(decode_box_rows(self.source.reader()?, &self.index, decoder)?)
    }
}
