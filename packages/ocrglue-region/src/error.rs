use thiserror::Error;

use crate::region::Rect;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionError {
    #[error("rect has non-finite coordinates: {0:?}")]
    NonFinite(Rect),
    #[error("rect edges are inverted (left > right or top > bottom): {0:?}")]
    Inverted(Rect),
}
