//! Property tests for the invariants the pipeline promises regardless of input.

use ocrglue_rs::disjoint_set::DisjointSet;
use ocrglue_rs::geometry::overlap_area;
use ocrglue_rs::prelude::*;
use ocrglue_rs::resolve_overlaps;
use proptest::prelude::*;

fn arb_region() -> impl Strategy<Value = Region> {
    (
        0.0f64..400.0,
        0.0f64..400.0,
        5.0f64..120.0,
        8.0f64..40.0,
        prop::sample::select(vec![
            "Hello", "world", "42", "OK", "---", "@user", "読む", "x3", "Continue?", "HP 40",
        ]),
        prop::option::of(0.0f64..1.0),
    )
        .prop_map(|(left, top, w, h, text, confidence)| {
            let mut region = Region::new(text, Rect::new(left, top, left + w, top + h));
            region.confidence = confidence;
            region
        })
}

/// Connectivity by brute force over the union pairs.
fn reachable(n: usize, pairs: &[(usize, usize)], from: usize, to: usize) -> bool {
    let mut seen = vec![false; n];
    let mut stack = vec![from];
    seen[from] = true;
    while let Some(node) = stack.pop() {
        if node == to {
            return true;
        }
        for &(a, b) in pairs {
            for (x, y) in [(a, b), (b, a)] {
                if x == node && !seen[y] {
                    seen[y] = true;
                    stack.push(y);
                }
            }
        }
    }
    false
}

proptest! {
    #[test]
    fn disjoint_set_matches_chain_connectivity(
        pairs in prop::collection::vec((0usize..12, 0usize..12), 0..20),
        shuffle_seed in any::<u64>(),
    ) {
        let n = 12;
        let mut ordered = pairs.clone();
        // a different union order must give the same partition
        ordered.sort_by_key(|&(a, b)| (a as u64 * 31 + b as u64) ^ shuffle_seed);

        let mut sets = DisjointSet::new(n);
        for &(a, b) in &ordered {
            sets.union(a, b);
        }
        for a in 0..n {
            for b in 0..n {
                prop_assert_eq!(sets.connected(a, b), reachable(n, &pairs, a, b));
            }
        }
    }

    #[test]
    fn filter_is_idempotent(regions in prop::collection::vec(arb_region(), 0..16), threshold in 0.0f64..1.0) {
        let config = GlueConfig::default().with_confidence_threshold(threshold);
        let once = filter_untranslatable_text(&regions, &config);
        let twice = filter_untranslatable_text(&once, &config);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn resolved_regions_do_not_overlap(regions in prop::collection::vec(arb_region(), 0..16)) {
        let resolved = resolve_overlaps(regions);
        for (i, a) in resolved.iter().enumerate() {
            for b in &resolved[i + 1..] {
                prop_assert!(overlap_area(&a.rect, &b.rect) <= 1e-9, "{:?} overlaps {:?}", a.rect, b.rect);
            }
        }
    }

    #[test]
    fn glue_output_is_overlap_free(regions in prop::collection::vec(arb_region(), 0..16), power in 0.25f64..1.0) {
        let config = GlueConfig::default().with_grouping_power(power);
        let glued = apply_auto_glue(&regions, &config);
        prop_assert!(glued.len() <= regions.len());
        for (i, a) in glued.iter().enumerate() {
            for b in &glued[i + 1..] {
                prop_assert!(overlap_area(&a.rect, &b.rect) <= 1e-9);
            }
        }
    }
}
