//! Property-based tests for the stream aligner
//!
//! The aligner must, for arbitrary offset interleavings, produce a matched
//! sequence satisfying the sandwich invariant, account for every pruned
//! open, and converge (or report the excess closes it cannot match).

use proptest::prelude::*;

use pos::pos::indexing::align;

/// Strategy: a strictly increasing offset list, as produced by a scan
fn offsets() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::btree_set(1u64..10_000, 0..30)
        .prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn sandwich_invariant_holds(opens in offsets(), closes in offsets()) {
        let outcome = align(&opens, &closes);

        // surviving opens are a subsequence of the input
        prop_assert!(outcome.kept.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(outcome.kept.iter().all(|&k| k < opens.len()));

        for (i, &k) in outcome.kept.iter().enumerate() {
            prop_assert!(opens[k] < closes[i]);
            if let Some(&next) = outcome.kept.get(i + 1) {
                prop_assert!(opens[next] > closes[i]);
            }
        }
    }

    #[test]
    fn every_tag_is_accounted_for(opens in offsets(), closes in offsets()) {
        let outcome = align(&opens, &closes);

        prop_assert_eq!(outcome.kept.len() + outcome.opens_removed, opens.len());
        prop_assert_eq!(outcome.kept.len() + outcome.excess_closes, closes.len());
    }

    #[test]
    fn converges_whenever_possible(opens in offsets(), closes in offsets()) {
        let outcome = align(&opens, &closes);

        // excess closes are the only non-convergent outcome; with them the
        // matched count is exactly the surviving open count
        if outcome.excess_closes == 0 {
            prop_assert_eq!(outcome.matched(), closes.len());
        } else {
            prop_assert!(outcome.matched() < closes.len());
        }
    }

    #[test]
    fn repair_is_idempotent(opens in offsets(), closes in offsets()) {
        let first = align(&opens, &closes);
        let survivors: Vec<u64> = first.kept.iter().map(|&k| opens[k]).collect();

        let second = align(&survivors, &closes);
        prop_assert_eq!(second.opens_removed, 0);
        prop_assert_eq!(second.kept.len(), survivors.len());
        prop_assert_eq!(second.excess_closes, first.excess_closes);
    }

    #[test]
    fn well_formed_interleavings_are_untouched(blocks in prop::collection::vec((1u64..100, 1u64..100), 0..20)) {
        // build strictly alternating open < close < open < close ...
        let mut opens = Vec::new();
        let mut closes = Vec::new();
        let mut cursor = 0;
        for (a, b) in blocks {
            cursor += a;
            opens.push(cursor);
            cursor += b;
            closes.push(cursor);
        }

        let outcome = align(&opens, &closes);
        prop_assert_eq!(outcome.opens_removed, 0);
        prop_assert_eq!(outcome.excess_closes, 0);
        prop_assert_eq!(outcome.matched(), opens.len());
    }
}
