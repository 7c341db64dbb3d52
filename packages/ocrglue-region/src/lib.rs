//! Data model shared by the OCR glue pipeline: rectangles in source-image pixel
//! space and the text regions an OCR provider reports for them.
pub mod error;
pub mod region;

pub use error::RegionError;
pub use region::{BgColor, Rect, Region};
