//! Tag Scanner
//!
//! Single forward pass over a pos file. Every line is tokenized and
//! classified; for each structural tag the scanner records the byte offset
//! immediately following the line, so a later seek lands on the first line
//! after the tag. The scan never
//! interprets numeric content and keeps all state in local accumulators
//! returned as a [`TagScan`].

use std::io::{self, BufRead};

use crate::pos::lexing::{classify_line_tokens, dimension_labels, tokenize_line, LineKind};

/// Offsets and per-tag metadata for one kind of opening tag
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpenTags {
    /// Byte offset immediately after each opening line
    pub offsets: Vec<u64>,
    /// Number of dimension labels on each opening line
    pub dim_counts: Vec<usize>,
    /// The dimension labels themselves
    pub labels: Vec<Vec<String>>,
}

impl OpenTags {
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    fn push(&mut self, offset: u64, labels: Vec<String>) {
        self.offsets.push(offset);
        self.dim_counts.push(labels.len());
        self.labels.push(labels);
    }
}

/// Per-frame `def` bookkeeping, parallel to the eof offset list.
///
/// `offsets[i]` is the offset after the last `def` line preceding the i-th
/// `eof` (or after the `box` line itself when the frame declares no shapes):
/// the position where the frame's non-def rows begin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefTags {
    pub counts: Vec<usize>,
    pub offsets: Vec<u64>,
    pub labels: Vec<Vec<Vec<String>>>,
}

/// Everything one scan pass discovers about a file's structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagScan {
    pub data: OpenTags,
    pub dones: Vec<u64>,
    pub boxes: OpenTags,
    pub defs: DefTags,
    pub eofs: Vec<u64>,
}

impl TagScan {
    /// Raw data-open tag count, before any repair
    pub fn ndata(&self) -> usize {
        self.data.len()
    }

    /// Raw done tag count
    pub fn ndone(&self) -> usize {
        self.dones.len()
    }

    /// Raw box-open tag count, before any repair
    pub fn nbox(&self) -> usize {
        self.boxes.len()
    }

    /// Raw eof tag count
    pub fn neof(&self) -> usize {
        self.eofs.len()
    }
}

/// Scan a pos file, recording tag offsets and metadata.
///
/// One pass, every line visited exactly once. `def` state is tracked for the
/// box frame currently open: the running def count and last-def offset reset
/// when a `box` line starts a new frame and are snapshotted when an `eof`
/// closes one, so the def lists stay parallel to the eof list (closing tags
/// are never pruned by the aligner).
pub fn scan<R: BufRead>(mut reader: R) -> io::Result<TagScan> {
    let mut tags = TagScan::default();

    // def state for the box frame currently being scanned
    let mut def_count = 0usize;
    let mut def_open = 0u64;
    let mut def_labels: Vec<Vec<String>> = Vec::new();

    let mut offset = 0u64;
    let mut line = String::new();
    loop {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            break;
        }
        offset += read as u64;

        let tokens = tokenize_line(&line);
        match classify_line_tokens(&tokens) {
            LineKind::DataOpen => tags.data.push(offset, dimension_labels(&tokens)),
            LineKind::Done => tags.dones.push(offset),
            LineKind::BoxOpen => {
                tags.boxes.push(offset, dimension_labels(&tokens));
                def_count = 0;
                def_open = offset;
                def_labels.clear();
            }
            LineKind::Def => {
                def_count += 1;
                def_open = offset;
                def_labels.push(dimension_labels(&tokens));
            }
            LineKind::Eof => {
                tags.eofs.push(offset);
                tags.defs.counts.push(def_count);
                tags.defs.offsets.push(def_open);
                tags.defs.labels.push(def_labels.clone());
            }
            LineKind::Content => {}
        }
    }

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scan_str(source: &str) -> TagScan {
        scan(Cursor::new(source.as_bytes())).unwrap()
    }

    #[test]
    fn test_offsets_point_after_lines() {
        // "#[data] x y\n" is 12 bytes, "1 2\n" is 4, "#[done]\n" is 8
        let tags = scan_str("#[data] x y\n1 2\n#[done]\n");
        assert_eq!(tags.data.offsets, vec![12]);
        assert_eq!(tags.dones, vec![24]);
        assert_eq!(tags.data.dim_counts, vec![2]);
        assert_eq!(tags.data.labels, vec![vec!["x".to_string(), "y".to_string()]]);
    }

    #[test]
    fn test_content_lines_record_nothing() {
        let tags = scan_str("1 2 3\n4 5 6\n");
        assert_eq!(tags, TagScan::default());
    }

    #[test]
    fn test_box_frame_def_tracking() {
        // box line: 10 bytes, each def line: 10 bytes, rows 4 bytes, eof 4
        let source = "box lx ly\ndef A sph\ndef B sph\n1 2\n3 4\neof\n";
        let tags = scan_str(source);

        assert_eq!(tags.boxes.offsets, vec![10]);
        assert_eq!(tags.eofs, vec![source.len() as u64]);
        assert_eq!(tags.defs.counts, vec![2]);
        // after the second def line
        assert_eq!(tags.defs.offsets, vec![30]);
        assert_eq!(
            tags.defs.labels,
            vec![vec![
                vec!["A".to_string(), "sph".to_string()],
                vec!["B".to_string(), "sph".to_string()],
            ]]
        );
    }

    #[test]
    fn test_box_frame_without_defs() {
        let source = "box lx\n1 2\neof\n";
        let tags = scan_str(source);

        assert_eq!(tags.defs.counts, vec![0]);
        // falls back to the offset after the box line
        assert_eq!(tags.defs.offsets, vec![7]);
        assert_eq!(tags.defs.labels, vec![Vec::<Vec<String>>::new()]);
    }

    #[test]
    fn test_def_state_resets_per_box_frame() {
        let source = "box a\ndef A s\n1\neof\nbox b\n2\neof\n";
        let tags = scan_str(source);

        assert_eq!(tags.defs.counts, vec![1, 0]);
        assert_eq!(tags.nbox(), 2);
        assert_eq!(tags.neof(), 2);
    }

    #[test]
    fn test_interleaved_streams() {
        let source = "#[data] x\n1\n#[done]\nbox a\n2\neof\n#[data] y\n3\n#[done]\n";
        let tags = scan_str(source);

        assert_eq!(tags.ndata(), 2);
        assert_eq!(tags.ndone(), 2);
        assert_eq!(tags.nbox(), 1);
        assert_eq!(tags.neof(), 1);
    }

    #[test]
    fn test_truncated_file_keeps_partial_tags() {
        // killed mid-write: data open with no done
        let tags = scan_str("#[data] x\n1\n2\n");
        assert_eq!(tags.ndata(), 1);
        assert_eq!(tags.ndone(), 0);
    }

    #[test]
    fn test_final_line_without_newline() {
        let tags = scan_str("#[data] x\n1\n#[done]");
        // offset after an unterminated final line is the file length
        assert_eq!(tags.dones, vec![19]);
    }
}
