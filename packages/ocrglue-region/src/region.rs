use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RegionError;

/// Axis-aligned box in source-image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// Smallest rect containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.left.is_finite() && self.top.is_finite() && self.right.is_finite() && self.bottom.is_finite()
    }

    /// Checks the well-formedness contract: finite coordinates, `left <= right`, `top <= bottom`.
    pub fn validate(&self) -> Result<(), RegionError> {
        if !self.is_finite() {
            return Err(RegionError::NonFinite(*self));
        }
        if self.left > self.right || self.top > self.bottom {
            return Err(RegionError::Inverted(*self));
        }
        Ok(())
    }

    /// Returns the same box with inverted edges swapped back into order.
    pub fn normalized(&self) -> Rect {
        Rect {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }
}

/// Sampled background color near a box, `[r, g, b]`.
pub type BgColor = [u8; 3];

/// One OCR-detected text box.
///
/// Serialized in the camelCase shape OCR providers emit (`isDialog`, `bgColor`).
/// Any other keys the provider attached land in `extra` and are written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub text: String,
    pub rect: Rect,
    #[serde(default)]
    pub is_dialog: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<BgColor>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Region {
    pub fn new(text: impl Into<String>, rect: Rect) -> Self {
        Self {
            text: text.into(),
            rect,
            is_dialog: false,
            confidence: None,
            bg_color: None,
            extra: Map::new(),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_bg_color(mut self, bg_color: BgColor) -> Self {
        self.bg_color = Some(bg_color);
        self
    }

    pub fn with_dialog(mut self, is_dialog: bool) -> Self {
        self.is_dialog = is_dialog;
        self
    }

    pub fn validate(&self) -> Result<(), RegionError> {
        self.rect.validate()
    }
}
