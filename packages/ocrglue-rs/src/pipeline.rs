//! Orchestrates the glue phases over one batch of OCR regions.
//!
//! ```text
//! raw boxes -> lines -> paragraphs (split pass) -> reading order
//!           -> dialog flags -> overlap cleanup
//! ```
//!
//! Noise filtering is a separate entry point, usually applied to the glued output.
use ocrglue_region::Region;
use tracing::{debug, warn};

use crate::config::GlueConfig;
use crate::dialog_classifier::is_dialog;
use crate::geometry::{median_height, sorted_indices_by};
use crate::line_assembler::assemble_lines;
use crate::noise_filter;
use crate::overlap_resolver::resolve_overlaps;
use crate::paragraph_assembler::assemble_paragraphs;

/// Regions whose tops are within this many median heights share a reading row.
const READING_ROW_TOLERANCE: f64 = 0.3;

/// Applies the rect contract: inverted edges are swapped back, non-finite rects are discarded.
fn sanitize(regions: &[Region]) -> Vec<Region> {
    regions
        .iter()
        .filter_map(|region| {
            if !region.rect.is_finite() {
                warn!(text = %region.text, "discarding region with non-finite rect");
                return None;
            }
            let mut region = region.clone();
            region.rect = region.rect.normalized();
            Some(region)
        })
        .collect()
}

/// Sorts top to bottom, then left to right within rows of nearly equal top.
///
/// A row opens at the topmost remaining region; later regions whose top is
/// within the tolerance of that anchor join it.
pub fn sort_reading_order(regions: Vec<Region>, median_h: f64) -> Vec<Region> {
    let tolerance = READING_ROW_TOLERANCE * median_h;
    let by_top = sorted_indices_by(regions.len(), |i| regions[i].rect.top);

    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut anchor = f64::NEG_INFINITY;
    for idx in by_top {
        let top = regions[idx].rect.top;
        match rows.last_mut() {
            Some(row) if top - anchor <= tolerance => row.push(idx),
            _ => {
                anchor = top;
                rows.push(vec![idx]);
            }
        }
    }

    let mut slots: Vec<Option<Region>> = regions.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(slots.len());
    for mut row in rows {
        row.sort_by(|&a, &b| {
            let left = |i: usize| slots[i].as_ref().map_or(0.0, |r| r.rect.left);
            left(a).total_cmp(&left(b))
        });
        ordered.extend(row.into_iter().filter_map(|i| slots[i].take()));
    }
    ordered
}

/// Merges raw OCR boxes into classified, overlap-free regions in reading order.
pub fn apply_auto_glue(regions: &[Region], config: &GlueConfig) -> Vec<Region> {
    let regions = sanitize(regions);
    if regions.is_empty() {
        return regions;
    }
    let median_h = median_height(&regions);

    let lines = assemble_lines(&regions, median_h);
    let paragraphs = assemble_paragraphs(&lines, median_h, config.grouping_power());
    let ordered = sort_reading_order(paragraphs, median_h);

    let classified: Vec<Region> = ordered
        .into_iter()
        .map(|mut region| {
            region.is_dialog = is_dialog(&region);
            region
        })
        .collect();
    let resolved = resolve_overlaps(classified);

    debug!(
        input = regions.len(),
        lines = lines.len(),
        output = resolved.len(),
        median_h,
        "auto glue finished"
    );
    resolved
}

/// Drops regions unlikely to be meaningful translatable text.
pub fn filter_untranslatable_text(regions: &[Region], config: &GlueConfig) -> Vec<Region> {
    noise_filter::filter_untranslatable_text(regions, config)
}

/// A configured pipeline, for hosts that hold one set of settings across calls.
#[derive(Debug, Clone, Default)]
pub struct GluePipeline {
    config: GlueConfig,
}

impl GluePipeline {
    pub fn new(config: GlueConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GlueConfig {
        &self.config
    }

    pub fn apply_auto_glue(&self, regions: &[Region]) -> Vec<Region> {
        apply_auto_glue(regions, &self.config)
    }

    pub fn filter_untranslatable_text(&self, regions: &[Region]) -> Vec<Region> {
        filter_untranslatable_text(regions, &self.config)
    }

    /// Glue followed by the noise filter: what a translation overlay consumes.
    pub fn process(&self, regions: &[Region]) -> Vec<Region> {
        self.filter_untranslatable_text(&self.apply_auto_glue(regions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocrglue_region::Rect;

    fn region(text: &str, l: f64, t: f64, r: f64, b: f64) -> Region {
        Region::new(text, Rect::new(l, t, r, b))
    }

    fn texts(regions: &[Region]) -> Vec<&str> {
        regions.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_reading_order_rows() {
        let regions = vec![
            region("right", 200.0, 3.0, 260.0, 23.0),
            region("below", 0.0, 50.0, 60.0, 70.0),
            region("left", 0.0, 0.0, 60.0, 20.0),
        ];
        let ordered = sort_reading_order(regions, 20.0);
        assert_eq!(texts(&ordered), vec!["left", "right", "below"]);
    }

    #[test]
    fn test_reading_order_tolerance_is_anchored() {
        // 0.3 * 20 = 6px; "c" is 5px below "b" but 10px below the row anchor "a"
        let regions = vec![
            region("c", 0.0, 10.0, 10.0, 30.0),
            region("b", 100.0, 5.0, 110.0, 25.0),
            region("a", 200.0, 0.0, 210.0, 20.0),
        ];
        let ordered = sort_reading_order(regions, 20.0);
        assert_eq!(texts(&ordered), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(apply_auto_glue(&[], &GlueConfig::default()).is_empty());
    }

    #[test]
    fn test_words_and_lines_become_paragraph() {
        let regions = vec![
            region("World", 55.0, 0.0, 100.0, 20.0),
            region("again", 50.0, 24.0, 100.0, 44.0),
            region("Hello", 0.0, 0.0, 50.0, 20.0),
            region("Hi", 0.0, 24.0, 45.0, 44.0),
        ];
        let glued = apply_auto_glue(&regions, &GlueConfig::default());
        assert_eq!(glued.len(), 1);
        assert_eq!(glued[0].text, "Hello World\nHi again");
        assert_eq!(glued[0].rect, Rect::new(0.0, 0.0, 100.0, 44.0));
    }

    #[test]
    fn test_dialog_flag_is_annotated() {
        let regions = vec![region("\"Run!\" he shouted at the crowd.", 0.0, 0.0, 300.0, 20.0)];
        let glued = apply_auto_glue(&regions, &GlueConfig::default());
        assert!(glued[0].is_dialog);
    }

    #[test]
    fn test_malformed_rects_are_sanitized() {
        let regions = vec![
            region("flipped", 50.0, 20.0, 0.0, 0.0),
            region("broken", f64::NAN, 0.0, 10.0, 10.0),
        ];
        let glued = apply_auto_glue(&regions, &GlueConfig::default());
        assert_eq!(texts(&glued), vec!["flipped"]);
        assert_eq!(glued[0].rect, Rect::new(0.0, 0.0, 50.0, 20.0));
    }

    #[test]
    fn test_process_filters_noise() {
        let pipeline = GluePipeline::default();
        let regions = vec![
            region("Save your progress?", 0.0, 0.0, 200.0, 20.0),
            region("42", 400.0, 300.0, 420.0, 320.0),
        ];
        let out = pipeline.process(&regions);
        assert_eq!(texts(&out), vec!["Save your progress?"]);
    }
}
