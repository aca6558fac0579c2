//! Stream Aligner
//!
//! A pos file interrupted mid-write leaves its opening and closing tag
//! streams inconsistent: duplicated opens, unterminated trailing blocks,
//! stray closes. The aligner repairs one (opens, closes) offset pair into a
//! 1:1 matched sequence by pruning opens; closing tags are authoritative and
//! never removed.
//!
//! The matched sequence satisfies, for every matched index `i`:
//!
//! 1. `open[i] < close[i]`
//! 2. `open[i+1] > close[i]` (or `i` is the last pair)
//!
//! Both input lists are in document order, hence strictly increasing. That
//! makes a single forward merge sufficient: removing `open[i]` replaces the
//! pair's successor with a strictly larger offset, so a previously verified
//! pair `k < i` can never become invalid and the cursor never has to back
//! up.
//!
//! Opens left over once every close is matched are discarded (there is
//! nothing to pair them with). The converse - more closes than opens - is
//! not repairable by pruning opens; the aligner matches the surviving prefix
//! and reports the excess for the caller to judge.

/// Result of aligning one (opens, closes) stream pair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignOutcome {
    /// Indices into the original opens list that survived, in order.
    /// `kept[i]` is matched with `closes[i]`.
    pub kept: Vec<usize>,
    /// Number of opening tags pruned
    pub opens_removed: usize,
    /// Number of trailing closes with no open left to match (0 when the
    /// repair converged)
    pub excess_closes: usize,
}

impl AlignOutcome {
    /// Number of matched pairs
    pub fn matched(&self) -> usize {
        self.kept.len()
    }
}

/// Repair (opens, closes) into a matched 1:1 sequence.
///
/// Runs even when the lists already have equal length: equal cardinality
/// does not imply the sandwich ordering holds (two opens can precede their
/// first close).
pub fn align(opens: &[u64], closes: &[u64]) -> AlignOutcome {
    let mut kept: Vec<usize> = (0..opens.len()).collect();
    let mut opens_removed = 0;

    let mut i = 0;
    while i < kept.len() {
        if i >= closes.len() {
            // every close is matched; trailing opens are unterminated blocks
            opens_removed += kept.len() - i;
            kept.truncate(i);
            break;
        }

        let open = opens[kept[i]];
        let close = closes[i];
        let next_follows = match kept.get(i + 1) {
            Some(&next) => opens[next] > close,
            None => true,
        };

        if open < close && next_follows {
            i += 1;
        } else {
            kept.remove(i);
            opens_removed += 1;
        }
    }

    AlignOutcome {
        excess_closes: closes.len() - kept.len(),
        kept,
        opens_removed,
    }
}
