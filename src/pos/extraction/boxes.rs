//! Box Extractor
//!
//! Materializes the `box`...`eof` regions. Unlike a data region, a box
//! region is heterogeneous: `def` shape declarations sit between the `box`
//! line and the geometry rows. Defs are consumed during counting but never
//! counted as points, and the numeric fill starts at the frame's recorded
//! last-def offset, where the non-def rows begin.
//!
//! The crate does not know the box row grammar. The dense grab treats rows
//! as plain numeric columns (same contract as the data extractor); callers
//! that want structured geometry implement [`BoxDecoder`] and get each row's
//! raw whitespace-delimited tokens instead.

use std::fmt;
use std::io::{self, BufRead, Seek, SeekFrom};

use serde::Serialize;

use crate::pos::extraction::data::fill_frame;
use crate::pos::extraction::dense::DenseArray;
use crate::pos::extraction::{count_region_rows, FillError, FrameError, FrameErrorKind};
use crate::pos::indexing::FrameIndex;

/// External decoder for one box-geometry row.
///
/// The extractor delivers the raw whitespace-delimited tokens of each row;
/// what a token means (lengths, tilt factors, dimensionality flags, shape
/// references) is entirely the decoder's business.
pub trait BoxDecoder {
    type Record;
    type Error: fmt::Display;

    fn decode(&self, tokens: &[&str]) -> Result<Self::Record, Self::Error>;
}

/// Result of extracting every matched box frame numerically
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxGrab {
    /// `[nbox][max_points][max_dims]`, zero-padded; defs excluded
    pub array: DenseArray,
    /// Non-def rows each frame actually has
    pub point_counts: Vec<usize>,
    /// Frames whose extraction failed; their slabs are zero and flagged here
    pub frame_errors: Vec<FrameError>,
}

/// Result of delegating every matched box frame to a [`BoxDecoder`]
#[derive(Debug, Clone, PartialEq)]
pub struct BoxDecode<T> {
    /// Decoded records per frame; a failed frame's list is empty
    pub frames: Vec<Vec<T>>,
    pub frame_errors: Vec<FrameError>,
}

/// Extract all box frames into a dense array, defs excluded.
pub fn grab_box<R: BufRead + Seek>(mut reader: R, index: &FrameIndex) -> io::Result<BoxGrab> {
    let frames = index.box_frames();
    let point_counts = box_point_counts(&mut reader, index)?;

    let max_points = point_counts.iter().copied().max().unwrap_or(0);
    let max_dims = frames.iter().map(|f| f.dim_count).max().unwrap_or(0);
    let mut array = DenseArray::zeros(frames.len(), max_points, max_dims);

    let mut frame_errors = Vec::new();
    for (i, frame) in frames.iter().enumerate() {
        match fill_frame(
            &mut reader,
            frame.def_open,
            point_counts[i],
            frame.dim_count,
            i,
            &mut array,
        ) {
            Ok(()) => {}
            Err(FillError::Io(err)) => return Err(err),
            Err(FillError::Frame(kind)) => {
                array.clear_frame(i);
                frame_errors.push(FrameError { frame: i, kind });
            }
        }
    }

    Ok(BoxGrab {
        array,
        point_counts,
        frame_errors,
    })
}

/// Deliver each box frame's rows to an external decoder.
pub fn decode_box_rows<R, D>(
    mut reader: R,
    index: &FrameIndex,
    decoder: &D,
) -> io::Result<BoxDecode<D::Record>>
where
    R: BufRead + Seek,
    D: BoxDecoder,
{
    let point_counts = box_point_counts(&mut reader, index)?;

    let mut frames = Vec::with_capacity(index.nbox());
    let mut frame_errors = Vec::new();
    let mut line = String::new();
    for (i, frame) in index.box_frames().iter().enumerate() {
        reader.seek(SeekFrom::Start(frame.def_open))?;
        let mut records = Vec::with_capacity(point_counts[i]);
        let mut failure = None;

        for row in 0..point_counts[i] {
            line.clear();
            let read = reader.read_line(&mut line)?;
            if read == 0 {
                failure = Some(FrameErrorKind::Decode {
                    row,
                    message: "unexpected end of region".to_string(),
                });
                break;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match decoder.decode(&tokens) {
                Ok(record) => records.push(record),
                Err(err) => {
                    failure = Some(FrameErrorKind::Decode {
                        row,
                        message: err.to_string(),
                    });
                    break;
                }
            }
        }

        match failure {
            Some(kind) => {
                frame_errors.push(FrameError { frame: i, kind });
                frames.push(Vec::new());
            }
            None => frames.push(records),
        }
    }

    Ok(BoxDecode {
        frames,
        frame_errors,
    })
}

fn box_point_counts<R: BufRead + Seek>(
    reader: &mut R,
    index: &FrameIndex,
) -> io::Result<Vec<usize>> {
    let mut counts = Vec::with_capacity(index.nbox());
    for frame in index.box_frames() {
        counts.push(count_region_rows(reader, frame.open, frame.close, true)?);
    }
    Ok(counts)
}
