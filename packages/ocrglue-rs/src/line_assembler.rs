//! Phase 1: clusters raw OCR boxes into lines.
use ocrglue_region::Region;
use tracing::debug;

use crate::disjoint_set::DisjointSet;
use crate::geometry::{height_ratio, horizontal_gap, sorted_indices_by, y_center};
use crate::region_merger::{merge_cluster, MergeDirection};

/// Max vertical center offset, in median heights, for two boxes to share a line.
const MAX_CENTER_OFFSET: f64 = 0.5;
/// Max larger-to-smaller height ratio; beyond it the font sizes differ.
const MAX_HEIGHT_RATIO: f64 = 1.5;
/// Max horizontal gap, in median heights.
const MAX_HORIZONTAL_GAP: f64 = 1.0;

fn same_line(a: &Region, b: &Region, median_h: f64) -> bool {
    if (y_center(&a.rect) - y_center(&b.rect)).abs() > MAX_CENTER_OFFSET * median_h {
        return false;
    }
    if height_ratio(&a.rect, &b.rect) > MAX_HEIGHT_RATIO {
        return false;
    }
    horizontal_gap(&a.rect, &b.rect) <= MAX_HORIZONTAL_GAP * median_h
}

/// Groups boxes that sit on the same line and merges each group left to right.
///
/// Output groups follow the position of their earliest input box; boxes that
/// joined nothing are passed through as copies.
pub fn assemble_lines(regions: &[Region], median_h: f64) -> Vec<Region> {
    if regions.len() <= 1 {
        return regions.to_vec();
    }

    let order = sorted_indices_by(regions.len(), |i| regions[i].rect.top);
    let mut sets = DisjointSet::new(regions.len());

    for (pos, &ia) in order.iter().enumerate() {
        let a = &regions[ia];
        for &ib in &order[pos + 1..] {
            let b = &regions[ib];
            // sorted by top: nothing further down can be closer
            if b.rect.top - a.rect.bottom > median_h {
                break;
            }
            if same_line(a, b, median_h) {
                sets.union(ia, ib);
            }
        }
    }

    let groups = sets.groups();
    debug!(boxes = regions.len(), lines = groups.len(), "assembled lines");

    groups
        .iter()
        .map(|members| match members.as_slice() {
            [single] => regions[*single].clone(),
            _ => merge_cluster(regions, members, MergeDirection::Horizontal),
        })
        .collect()
}
