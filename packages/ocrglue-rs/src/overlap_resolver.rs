//! Final cleanup of boxes that still overlap after merging.
use ocrglue_region::{Rect, Region};
use tracing::debug;

use crate::geometry::{overlap_area, sorted_indices_by};

/// Overlap fraction of the smaller box beyond which it counts as subsumed.
const SUBSUMED_FRACTION: f64 = 0.5;
/// A trimmed box thinner than this in either dimension is dropped.
const MIN_SIDE: f64 = 5.0;

/// Cuts `b` back to the side of `a` that costs it the least area.
fn cheapest_trim(a: &Rect, b: &Rect) -> Rect {
    let (w, h) = (b.width(), b.height());
    let candidates = [
        (Rect { left: a.right, ..*b }, (a.right - b.left) * h),
        (Rect { right: a.left, ..*b }, (b.right - a.left) * h),
        (Rect { top: a.bottom, ..*b }, (a.bottom - b.top) * w),
        (Rect { bottom: a.top, ..*b }, (b.bottom - a.top) * w),
    ];
    candidates
        .into_iter()
        .reduce(|best, next| if next.1 < best.1 { next } else { best })
        .map(|(rect, _)| rect)
        .unwrap_or(*b)
}

/// Drops or trims regions so that no two kept regions overlap.
///
/// Larger regions are settled first (ties keep input order). A smaller region
/// more than half covered by a kept one is dropped; otherwise it is trimmed at
/// its cheapest edge. Output keeps the input order.
pub fn resolve_overlaps(regions: Vec<Region>) -> Vec<Region> {
    if regions.len() <= 1 {
        return regions;
    }

    let order = sorted_indices_by(regions.len(), |i| -regions[i].rect.area());
    let mut slots: Vec<Option<Region>> = regions.into_iter().map(Some).collect();
    let mut kept: Vec<usize> = Vec::with_capacity(slots.len());

    for idx in order {
        let Some(mut candidate) = slots[idx].take() else {
            continue;
        };
        let mut dropped = false;
        for &k in &kept {
            let Some(larger) = slots[k].as_ref() else {
                continue;
            };
            let overlap = overlap_area(&larger.rect, &candidate.rect);
            if overlap <= 0.0 {
                continue;
            }
            if overlap / candidate.rect.area() > SUBSUMED_FRACTION {
                dropped = true;
                break;
            }
            let trimmed = cheapest_trim(&larger.rect, &candidate.rect);
            if trimmed.width() < MIN_SIDE || trimmed.height() < MIN_SIDE {
                dropped = true;
                break;
            }
            candidate.rect = trimmed;
        }
        if dropped {
            debug!(text = %candidate.text, "dropped overlapped region");
            continue;
        }
        slots[idx] = Some(candidate);
        kept.push(idx);
    }

    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(text: &str, l: f64, t: f64, r: f64, b: f64) -> Region {
        Region::new(text, Rect::new(l, t, r, b))
    }

    #[test]
    fn test_disjoint_regions_untouched() {
        let regions = vec![region("a", 0.0, 0.0, 10.0, 10.0), region("b", 20.0, 0.0, 30.0, 10.0)];
        assert_eq!(resolve_overlaps(regions.clone()), regions);
    }

    #[test]
    fn test_subsumed_region_dropped() {
        let regions = vec![
            region("inner", 10.0, 10.0, 30.0, 30.0),
            region("outer", 0.0, 0.0, 100.0, 100.0),
        ];
        let out = resolve_overlaps(regions);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "outer");
    }

    #[test]
    fn test_partial_overlap_trimmed_on_cheapest_edge() {
        // small overlaps the big one by 10px on its left side
        let regions = vec![
            region("big", 0.0, 0.0, 100.0, 50.0),
            region("small", 90.0, 10.0, 150.0, 40.0),
        ];
        let out = resolve_overlaps(regions);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].rect, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(out[1].rect, Rect::new(100.0, 10.0, 150.0, 40.0));
    }

    #[test]
    fn test_sliver_after_trim_is_dropped() {
        // overlap is half of the sliver, trimming leaves 3px
        let regions = vec![
            region("big", 0.0, 0.0, 100.0, 100.0),
            region("sliver", 97.0, 10.0, 103.0, 60.0),
        ];
        let out = resolve_overlaps(regions);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "big");
    }

    #[test]
    fn test_output_keeps_input_order() {
        let regions = vec![
            region("small", 0.0, 0.0, 10.0, 10.0),
            region("large", 50.0, 0.0, 100.0, 50.0),
        ];
        let out = resolve_overlaps(regions);
        assert_eq!(out[0].text, "small");
        assert_eq!(out[1].text, "large");
    }
}
