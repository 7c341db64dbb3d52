//! # ocrglue-rs
//!
//! Rebuilds the logical text layout of a screen from raw OCR output: words into
//! lines, lines into paragraphs, then dialog classification, overlap cleanup and
//! noise filtering so that what remains is ready for translation.
//!
//! ## Phases
//!
//! - **Line assembly**: boxes on the same baseline band merge left to right
//! - **Paragraph assembly**: stacked, aligned lines merge top to bottom, scaled by the grouping power
//! - **Overmerge split**: groups are cut at gaps that break their rhythm and at separator lines
//! - **Dialog classification**: merged text is scored for quotes, punctuation and length
//! - **Overlap resolution**: leftover overlaps are trimmed or dropped
//! - **Noise filter**: numbers, stat readouts, links and glyphs are removed
//!
//! Every distance threshold is a multiple of the batch's median box height, so the
//! same settings hold at any screen resolution.
//!
//! ## Quick Start
//!
//! ```
//! use ocrglue_rs::prelude::*;
//!
//! let regions = vec![
//!     Region::new("Hello", Rect::new(0.0, 0.0, 50.0, 20.0)),
//!     Region::new("World", Rect::new(55.0, 0.0, 100.0, 20.0)),
//! ];
//! let config = GlueConfig::default();
//! let glued = apply_auto_glue(&regions, &config);
//! let translatable = filter_untranslatable_text(&glued, &config);
//! assert_eq!(translatable[0].text, "Hello World");
//! ```

pub mod config;
pub mod dialog_classifier;
pub mod disjoint_set;
pub mod geometry;
pub mod line_assembler;
pub mod noise_filter;
pub mod overlap_resolver;
pub mod overmerge_splitter;
pub mod paragraph_assembler;
pub mod pipeline;
pub mod region_io;
pub mod region_merger;

// Re-export commonly used types at the root level
pub use config::GlueConfig;
pub use dialog_classifier::{dialog_score, is_dialog};
pub use disjoint_set::DisjointSet;
pub use geometry::median_height;
pub use line_assembler::assemble_lines;
pub use ocrglue_region::{BgColor, Rect, Region, RegionError};
pub use overlap_resolver::resolve_overlaps;
pub use overmerge_splitter::{is_separator, split_overmerged};
pub use paragraph_assembler::assemble_paragraphs;
pub use pipeline::{apply_auto_glue, filter_untranslatable_text, sort_reading_order, GluePipeline};
pub use region_io::{parse_regions, read_regions, write_regions, RegionIoError};
pub use region_merger::{merge_cluster, MergeDirection};

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```
/// use ocrglue_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        apply_auto_glue, filter_untranslatable_text, parse_regions, read_regions, write_regions, BgColor,
        GlueConfig, GluePipeline, Rect, Region, RegionError, RegionIoError,
    };
}
