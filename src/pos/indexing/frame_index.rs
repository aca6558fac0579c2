//! Frame Index
//!
//! The repaired, immutable record of a pos file's structure: one entry per
//! matched (open, close) pair in each stream, carrying the byte offsets the
//! extractors seek to and the per-frame dimensionality discovered during the
//! scan. Built once from a [`TagScan`], read-only afterward.
//!
//! Structural problems are recorded as [`Diagnostic`]s rather than errors: a
//! file with only data frames, or with a few torn frames pruned away, is
//! still worth extracting.

use serde::Serialize;

use crate::pos::indexing::aligner::{align, AlignOutcome};
use crate::pos::indexing::scanner::TagScan;

/// One matched data frame: region between `#[data]` and `#[done]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataFrame {
    /// Offset after the `#[data]` line: first row of the frame
    pub open: u64,
    /// Offset after the `#[done]` line
    pub close: u64,
    /// Number of observables per row
    pub dim_count: usize,
    /// Observable names from the `#[data]` line
    pub labels: Vec<String>,
}

/// One matched box frame: region between `box` and `eof`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxFrame {
    /// Offset after the `box` line
    pub open: u64,
    /// Offset after the `eof` line
    pub close: u64,
    /// Number of tokens on the `box` line after the keyword
    pub dim_count: usize,
    /// The tokens on the `box` line after the keyword
    pub labels: Vec<String>,
    /// Number of `def` shape declarations in the frame
    pub def_count: usize,
    /// Offset after the last `def` line (or after the `box` line when the
    /// frame has no defs): where the frame's non-def rows begin
    pub def_open: u64,
    /// Labels of each `def` line, in order
    pub def_labels: Vec<Vec<String>>,
}

/// Which tag stream a diagnostic refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StreamKind {
    Data,
    Box,
}

/// Pruning statistics for one stream's repair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepairStats {
    pub opens_removed: usize,
    pub excess_closes: usize,
}

impl RepairStats {
    fn from_outcome(outcome: &AlignOutcome) -> Self {
        Self {
            opens_removed: outcome.opens_removed,
            excess_closes: outcome.excess_closes,
        }
    }
}

/// Non-fatal structural findings attached to the index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Diagnostic {
    /// Repair could not converge: closes remained with no open to match.
    /// The matched prefix is still indexed; the caller decides whether a
    /// partial result set is acceptable.
    StructuralMismatch {
        stream: StreamKind,
        opens_removed: usize,
        excess_closes: usize,
    },
    /// Data and box frame counts differ. Legitimate for files carrying only
    /// one kind of frame, so reported rather than failed.
    FrameCountMismatch {
        data_frames: usize,
        box_frames: usize,
    },
}

/// Raw tag counts observed by the scanner, before repair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RawTagCounts {
    pub data_opens: usize,
    pub dones: usize,
    pub box_opens: usize,
    pub eofs: usize,
}

/// The repaired structural index of one pos file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameIndex {
    data_frames: Vec<DataFrame>,
    box_frames: Vec<BoxFrame>,
    raw: RawTagCounts,
    data_repair: RepairStats,
    box_repair: RepairStats,
    diagnostics: Vec<Diagnostic>,
}

impl FrameIndex {
    /// Build the index from a completed scan: align each stream, zip the
    /// surviving opens with their closes and metadata, collect diagnostics.
    pub fn from_scan(scan: TagScan) -> Self {
        let raw = RawTagCounts {
            data_opens: scan.ndata(),
            dones: scan.ndone(),
            box_opens: scan.nbox(),
            eofs: scan.neof(),
        };

        let data_align = align(&scan.data.offsets, &scan.dones);
        let box_align = align(&scan.boxes.offsets, &scan.eofs);

        let data_frames: Vec<DataFrame> = data_align
            .kept
            .iter()
            .enumerate()
            .map(|(i, &k)| DataFrame {
                open: scan.data.offsets[k],
                close: scan.dones[i],
                dim_count: scan.data.dim_counts[k],
                labels: scan.data.labels[k].clone(),
            })
            .collect();

        let box_frames: Vec<BoxFrame> = box_align
            .kept
            .iter()
            .enumerate()
            .map(|(i, &k)| BoxFrame {
                open: scan.boxes.offsets[k],
                close: scan.eofs[i],
                dim_count: scan.boxes.dim_counts[k],
                labels: scan.boxes.labels[k].clone(),
                def_count: scan.defs.counts[i],
                def_open: scan.defs.offsets[i],
                def_labels: scan.defs.labels[i].clone(),
            })
            .collect();

        let data_repair = RepairStats::from_outcome(&data_align);
        let box_repair = RepairStats::from_outcome(&box_align);

        let mut diagnostics = Vec::new();
        for (stream, repair) in [
            (StreamKind::Data, data_repair),
            (StreamKind::Box, box_repair),
        ] {
            if repair.excess_closes > 0 {
                diagnostics.push(Diagnostic::StructuralMismatch {
                    stream,
                    opens_removed: repair.opens_removed,
                    excess_closes: repair.excess_closes,
                });
            }
        }
        if data_frames.len() != box_frames.len() {
            diagnostics.push(Diagnostic::FrameCountMismatch {
                data_frames: data_frames.len(),
                box_frames: box_frames.len(),
            });
        }

        Self {
            data_frames,
            box_frames,
            raw,
            data_repair,
            box_repair,
            diagnostics,
        }
    }

    /// Matched data frames, in document order
    pub fn data_frames(&self) -> &[DataFrame] {
        &self.data_frames
    }

    /// Matched box frames, in document order
    pub fn box_frames(&self) -> &[BoxFrame] {
        &self.box_frames
    }

    /// Number of matched data frames
    pub fn ndata(&self) -> usize {
        self.data_frames.len()
    }

    /// Number of matched box frames
    pub fn nbox(&self) -> usize {
        self.box_frames.len()
    }

    /// Tag counts as scanned, before repair
    pub fn raw_counts(&self) -> RawTagCounts {
        self.raw
    }

    /// Repair statistics for the data/done stream
    pub fn data_repair(&self) -> RepairStats {
        self.data_repair
    }

    /// Repair statistics for the box/eof stream
    pub fn box_repair(&self) -> RepairStats {
        self.box_repair
    }

    /// Structural findings collected during the build
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
