//! Data Extractor
//!
//! Materializes the `#[data]`...`#[done]` regions of an indexed file in two
//! sweeps: the first counts each frame's rows by offset arithmetic (exact -
//! the aligner's sandwich invariant guarantees no spurious lines inside a
//! region), the second seeks back to each frame and copies the rows into a
//! zero-padded [`DenseArray`].

use std::io::{self, BufRead, Seek, SeekFrom};

use serde::Serialize;

use crate::pos::extraction::dense::DenseArray;
use crate::pos::extraction::{count_region_rows, FillError, FrameError, FrameErrorKind};
use crate::pos::indexing::FrameIndex;
use crate::pos::lexing::{tokenize_line, Token};

/// Result of extracting every matched data frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataGrab {
    /// `[ndata][max_points][max_dims]`, zero-padded
    pub array: DenseArray,
    /// Rows each frame actually has
    pub point_counts: Vec<usize>,
    /// Frames whose extraction failed; their slabs are zero and flagged here
    pub frame_errors: Vec<FrameError>,
}

/// Extract all data frames into a dense array.
pub fn grab_data<R: BufRead + Seek>(mut reader: R, index: &FrameIndex) -> io::Result<DataGrab> {
    let frames = index.data_frames();

    let mut point_counts = Vec::with_capacity(frames.len());
    for frame in frames {
        point_counts.push(count_region_rows(&mut reader, frame.open, frame.close, false)?);
    }

    let max_points = point_counts.iter().copied().max().unwrap_or(0);
    let max_dims = frames.iter().map(|f| f.dim_count).max().unwrap_or(0);
    let mut array = DenseArray::zeros(frames.len(), max_points, max_dims);

    let mut frame_errors = Vec::new();
    for (i, frame) in frames.iter().enumerate() {
        match fill_frame(
            &mut reader,
            frame.open,
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

    Ok(DataGrab {
        array,
        point_counts,
        frame_errors,
    })
}

/// Copy one frame's rows into the array, left-justified.
///
/// Reads exactly `points` lines from `start`. Each row must yield `dims`
/// numeric tokens; trailing extra tokens are ignored (only the first `dims`
/// columns are consumed).
pub(crate) fn fill_frame<R: BufRead + Seek>(
    reader: &mut R,
    start: u64,
    points: usize,
    dims: usize,
    frame: usize,
    array: &mut DenseArray,
) -> Result<(), FillError> {
    reader.seek(SeekFrom::Start(start)).map_err(FillError::Io)?;
    let mut line = String::new();
    for row in 0..points {
        line.clear();
        let read = reader.read_line(&mut line).map_err(FillError::Io)?;
        if read == 0 {
            return Err(FillError::Frame(FrameErrorKind::ShortRow {
                row,
                expected: dims,
                found: 0,
            }));
        }

        let mut tokens = tokenize_line(&line)
            .into_iter()
            .filter(|t| !t.is_whitespace());
        for dim in 0..dims {
            match tokens.next() {
                Some(Token::Number(text)) => {
                    let value: f32 = text.parse().map_err(|_| {
                        FillError::Frame(FrameErrorKind::BadNumber {
                            row,
                            token: text.clone(),
                        })
                    })?;
                    array.set(frame, row, dim, value);
                }
                Some(token) => {
                    return Err(FillError::Frame(FrameErrorKind::BadNumber {
                        row,
                        token: token.text().unwrap_or_default().to_string(),
                    }));
                }
                None => {
                    return Err(FillError::Frame(FrameErrorKind::ShortRow {
                        row,
                        expected: dims,
                        found: dim,
                    }));
                }
            }
        }
    }
    Ok(())
}
