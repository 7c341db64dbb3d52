use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.6;
pub const DEFAULT_GROUPING_POWER: f64 = 0.25;
pub const MIN_GROUPING_POWER: f64 = 0.25;
pub const MAX_GROUPING_POWER: f64 = 1.0;

/// Tuning passed into every pipeline call.
///
/// Values are clamped when set, so a `GlueConfig` always holds a usable
/// threshold and grouping power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawGlueConfig")]
pub struct GlueConfig {
    confidence_threshold: f64,
    grouping_power: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawGlueConfig {
    confidence_threshold: f64,
    grouping_power: f64,
}

impl Default for RawGlueConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            grouping_power: DEFAULT_GROUPING_POWER,
        }
    }
}

impl From<RawGlueConfig> for GlueConfig {
    fn from(raw: RawGlueConfig) -> Self {
        GlueConfig::default()
            .with_confidence_threshold(raw.confidence_threshold)
            .with_grouping_power(raw.grouping_power)
    }
}

impl Default for GlueConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            grouping_power: DEFAULT_GROUPING_POWER,
        }
    }
}

impl GlueConfig {
    /// Minimum OCR confidence a region needs to survive the noise filter, clamped to `[0, 1]`.
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.confidence_threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_CONFIDENCE_THRESHOLD
        };
        self
    }

    /// Paragraph clustering aggressiveness, clamped to `[0.25, 1.0]`.
    pub fn with_grouping_power(mut self, power: f64) -> Self {
        self.grouping_power = clamp_grouping_power(power);
        self
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    pub fn grouping_power(&self) -> f64 {
        self.grouping_power
    }
}

pub fn clamp_grouping_power(power: f64) -> f64 {
    if power.is_finite() {
        power.clamp(MIN_GROUPING_POWER, MAX_GROUPING_POWER)
    } else {
        DEFAULT_GROUPING_POWER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GlueConfig::default();
        assert_eq!(config.confidence_threshold(), 0.6);
        assert_eq!(config.grouping_power(), 0.25);
    }

    #[test]
    fn test_setters_clamp() {
        let config = GlueConfig::default()
            .with_confidence_threshold(1.7)
            .with_grouping_power(0.1);
        assert_eq!(config.confidence_threshold(), 1.0);
        assert_eq!(config.grouping_power(), 0.25);

        let config = config.with_grouping_power(3.0).with_confidence_threshold(-0.2);
        assert_eq!(config.grouping_power(), 1.0);
        assert_eq!(config.confidence_threshold(), 0.0);
    }

    #[test]
    fn test_non_finite_falls_back_to_default() {
        let config = GlueConfig::default()
            .with_confidence_threshold(f64::NAN)
            .with_grouping_power(f64::INFINITY);
        assert_eq!(config, GlueConfig::default());
    }

    #[test]
    fn test_deserialize_clamps() {
        let config: GlueConfig = serde_json::from_str(r#"{"groupingPower": 9.0}"#).unwrap();
        assert_eq!(config.grouping_power(), 1.0);
        assert_eq!(config.confidence_threshold(), 0.6);
    }
}
