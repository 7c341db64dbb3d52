//! Rectangle measures shared by every clustering phase.
//!
//! Thresholds elsewhere are multiples of [`median_height`], the typical text
//! height of the current batch, so the same rules hold at any resolution.
use ocrglue_region::{Rect, Region};

/// Median height used when a batch has no box with positive height.
pub const DEFAULT_MEDIAN_HEIGHT: f64 = 20.0;

pub fn height(rect: &Rect) -> f64 {
    rect.height()
}

pub fn width(rect: &Rect) -> f64 {
    rect.width()
}

pub fn y_center(rect: &Rect) -> f64 {
    (rect.top + rect.bottom) / 2.0
}

/// Positive when the boxes are separated horizontally, negative when their x-spans overlap.
pub fn horizontal_gap(a: &Rect, b: &Rect) -> f64 {
    a.left.max(b.left) - a.right.min(b.right)
}

/// Positive when the boxes are separated vertically, negative when their y-spans overlap.
pub fn vertical_gap(a: &Rect, b: &Rect) -> f64 {
    a.top.max(b.top) - a.bottom.min(b.bottom)
}

/// Width of the shared x-span, zero when the boxes do not overlap horizontally.
pub fn horizontal_overlap(a: &Rect, b: &Rect) -> f64 {
    (-horizontal_gap(a, b)).max(0.0)
}

pub fn overlap_area(a: &Rect, b: &Rect) -> f64 {
    let w = -horizontal_gap(a, b);
    let h = -vertical_gap(a, b);
    if w <= 0.0 || h <= 0.0 {
        0.0
    } else {
        w * h
    }
}

/// Larger-to-smaller height ratio; infinite when the smaller box has no height.
pub fn height_ratio(a: &Rect, b: &Rect) -> f64 {
    let (ha, hb) = (height(a), height(b));
    let smaller = ha.min(hb);
    if smaller <= 0.0 {
        return f64::INFINITY;
    }
    ha.max(hb) / smaller
}

/// Median of the positive box heights: ascending sort, middle element.
pub fn median_height(regions: &[Region]) -> f64 {
    let mut heights: Vec<f64> = regions
        .iter()
        .map(|r| height(&r.rect))
        .filter(|h| *h > 0.0)
        .collect();
    if heights.is_empty() {
        return DEFAULT_MEDIAN_HEIGHT;
    }
    heights.sort_by(f64::total_cmp);
    heights[heights.len() / 2]
}

/// Euclidean distance between two RGB triples.
pub fn color_distance(a: &[u8; 3], b: &[u8; 3]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Indices `0..len` stably ordered by `key` ascending.
pub(crate) fn sorted_indices_by<F>(len: usize, key: F) -> Vec<usize>
where
    F: Fn(usize) -> f64,
{
    let mut order: Vec<usize> = (0..len).collect();
    order.sort_by(|&a, &b| key(a).total_cmp(&key(b)));
    order
}
