//! Corrective pass over paragraph groups.
//!
//! Pairwise clustering can chain unrelated lines together. A group is cut
//! wherever a gap breaks the group's own line rhythm, or around decorative
//! separator lines.
use std::sync::OnceLock;

use ocrglue_region::Region;
use regex::Regex;

use crate::geometry::{sorted_indices_by, vertical_gap};

/// A gap this many times the group's median gap stands out from its rhythm.
const RHYTHM_BREAK_FACTOR: f64 = 2.5;
/// ... provided it is also at least this many median heights.
const RHYTHM_BREAK_MIN_GAP: f64 = 0.8;
/// Median gaps at or below this many pixels mean the lines touch.
const TOUCHING_MEDIAN_GAP: f64 = 1.0;
/// Between touching lines, any gap over this many median heights is suspicious.
const TOUCHING_MAX_GAP: f64 = 1.2;

static SEPARATOR: OnceLock<Regex> = OnceLock::new();

/// Lines like `-----`, `=====` or `.....` that decorate a panel rather than carry text.
pub fn is_separator(text: &str) -> bool {
    SEPARATOR
        .get_or_init(|| Regex::new(r"^[-=_*~.]{3,}$").expect("valid separator regex"))
        .is_match(text.trim())
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted[sorted.len() / 2]
}

/// Splits `group` (indices into `lines`) at inconsistent gaps and separators.
///
/// Groups of one or two lines are returned unchanged, as is any group with no
/// split point. Separator lines that cause a cut are consumed: a sub-group
/// made only of separators is dropped.
pub fn split_overmerged(lines: &[Region], group: &[usize], median_h: f64) -> Vec<Vec<usize>> {
    if group.len() <= 2 {
        return vec![group.to_vec()];
    }

    let sorted: Vec<usize> = sorted_indices_by(group.len(), |i| lines[group[i]].rect.top)
        .into_iter()
        .map(|i| group[i])
        .collect();
    let gaps: Vec<f64> = sorted
        .windows(2)
        .map(|pair| vertical_gap(&lines[pair[0]].rect, &lines[pair[1]].rect))
        .collect();
    let median_gap = median(&gaps);
    let separators: Vec<bool> = sorted.iter().map(|&i| is_separator(&lines[i].text)).collect();

    let cut_after: Vec<bool> = gaps
        .iter()
        .enumerate()
        .map(|(i, &gap)| {
            let breaks_rhythm = median_gap > 0.0
                && gap > RHYTHM_BREAK_FACTOR * median_gap
                && gap > RHYTHM_BREAK_MIN_GAP * median_h;
            let gap_between_touching =
                median_gap <= TOUCHING_MEDIAN_GAP && gap > TOUCHING_MAX_GAP * median_h;
            breaks_rhythm || gap_between_touching || separators[i] || separators[i + 1]
        })
        .collect();

    if !cut_after.contains(&true) {
        return vec![group.to_vec()];
    }

    let mut parts: Vec<Vec<usize>> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    for (pos, &line) in sorted.iter().enumerate() {
        current.push(line);
        if pos == sorted.len() - 1 || cut_after[pos] {
            parts.push(std::mem::take(&mut current));
        }
    }

    parts
        .into_iter()
        .filter(|part| !part.iter().all(|&i| is_separator(&lines[i].text)))
        .collect()
}
