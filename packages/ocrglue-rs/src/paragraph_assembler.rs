//! Phase 2: clusters lines into paragraphs.
//!
//! Vertical thresholds scale with the grouping power, so a lower power keeps
//! clusters tight and a higher one lets looser layouts merge.
use ocrglue_region::Region;
use tracing::debug;

use crate::config::clamp_grouping_power;
use crate::disjoint_set::DisjointSet;
use crate::geometry::{color_distance, height_ratio, horizontal_overlap, sorted_indices_by, vertical_gap, width};
use crate::overmerge_splitter::split_overmerged;
use crate::region_merger::{merge_cluster, MergeDirection};

/// Early-exit distance below a line, in median heights (scaled by power).
const SCAN_LIMIT: f64 = 3.0;
/// Max vertical gap between two lines, in median heights (scaled by power).
const MAX_VERTICAL_GAP: f64 = 1.5;
/// Min shared x-span as a fraction of the narrower line.
const MIN_OVERLAP_RATIO: f64 = 0.3;
const MAX_HEIGHT_RATIO: f64 = 1.4;
/// Max left-edge offset, in median heights.
const MAX_LEFT_OFFSET: f64 = 2.0;
/// Below this narrow-to-wide ratio an upper line is not a lead-in.
const MIN_UPPER_WIDTH_RATIO: f64 = 0.15;
/// Max RGB distance between the backgrounds of two lines.
const MAX_BG_DISTANCE: f64 = 60.0;

/// Whether `upper` and `lower` (ordered by top) belong to one paragraph.
fn same_paragraph(upper: &Region, lower: &Region, median_h: f64, power: f64) -> bool {
    let (a, b) = (&upper.rect, &lower.rect);
    if vertical_gap(a, b) > MAX_VERTICAL_GAP * median_h * power {
        return false;
    }

    let (wa, wb) = (width(a), width(b));
    let narrower = wa.min(wb);
    if narrower <= 0.0 || horizontal_overlap(a, b) / narrower < MIN_OVERLAP_RATIO {
        return false;
    }
    if height_ratio(a, b) > MAX_HEIGHT_RATIO {
        return false;
    }
    if (a.left - b.left).abs() > MAX_LEFT_OFFSET * median_h {
        return false;
    }
    // a short trailing line is common, a short leading one is not
    if narrower / wa.max(wb) < MIN_UPPER_WIDTH_RATIO && wa < wb {
        return false;
    }
    if let (Some(ca), Some(cb)) = (&upper.bg_color, &lower.bg_color) {
        if color_distance(ca, cb) > MAX_BG_DISTANCE {
            return false;
        }
    }
    true
}

/// Groups lines into paragraphs, splits over-merged groups, and merges each
/// group top to bottom with newlines.
pub fn assemble_paragraphs(lines: &[Region], median_h: f64, grouping_power: f64) -> Vec<Region> {
    if lines.len() <= 1 {
        return lines.to_vec();
    }
    let power = clamp_grouping_power(grouping_power);

    let order = sorted_indices_by(lines.len(), |i| lines[i].rect.top);
    let mut sets = DisjointSet::new(lines.len());

    for (pos, &ia) in order.iter().enumerate() {
        let a = &lines[ia];
        for &ib in &order[pos + 1..] {
            let b = &lines[ib];
            if b.rect.top - a.rect.bottom > SCAN_LIMIT * median_h * power {
                break;
            }
            if same_paragraph(a, b, median_h, power) {
                sets.union(ia, ib);
            }
        }
    }

    let groups: Vec<Vec<usize>> = sets
        .groups()
        .iter()
        .flat_map(|group| split_overmerged(lines, group, median_h))
        .collect();
    debug!(lines = lines.len(), paragraphs = groups.len(), power, "assembled paragraphs");

    groups
        .iter()
        .map(|members| match members.as_slice() {
            [single] => lines[*single].clone(),
            _ => merge_cluster(lines, members, MergeDirection::Vertical),
        })
        .collect()
}
