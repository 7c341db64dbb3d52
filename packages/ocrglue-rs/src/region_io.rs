//! Reading and writing region batches in the JSON shape OCR providers emit.
use std::io::{Read, Write};

use ocrglue_region::{Region, RegionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegionIoError {
    #[error("failed to read regions: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid region JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("region {index} ({text:?}) is malformed: {source}")]
    Malformed {
        index: usize,
        text: String,
        #[source]
        source: RegionError,
    },
}

/// Parses a JSON array of regions.
///
/// With `strict`, the first region that breaks the rect contract is an error;
/// otherwise malformed rects are left for the pipeline to normalize or discard.
pub fn parse_regions(json: &str, strict: bool) -> Result<Vec<Region>, RegionIoError> {
    let regions: Vec<Region> = serde_json::from_str(json)?;
    if strict {
        validate_all(&regions)?;
    }
    Ok(regions)
}

pub fn read_regions<R: Read>(mut reader: R, strict: bool) -> Result<Vec<Region>, RegionIoError> {
    let mut json = String::new();
    reader.read_to_string(&mut json)?;
    parse_regions(&json, strict)
}

pub fn validate_all(regions: &[Region]) -> Result<(), RegionIoError> {
    for (index, region) in regions.iter().enumerate() {
        region.validate().map_err(|source| RegionIoError::Malformed {
            index,
            text: region.text.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Writes regions as pretty-printed JSON followed by a newline.
pub fn write_regions<W: Write>(mut writer: W, regions: &[Region]) -> Result<(), RegionIoError> {
    serde_json::to_writer_pretty(&mut writer, regions)?;
    writer.write_all(b"\n")?;
    Ok(())
}
