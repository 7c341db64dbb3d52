//! Drops regions that carry nothing worth translating: numbers, scores,
//! punctuation, UI glyphs, links and stat readouts.
use ocrglue_region::Region;
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;
use tracing::debug;

use crate::config::GlueConfig;

/// Short Latin words that are worth translating on their own.
const SHORT_WORD_WHITELIST: &[&str] = &[
  "OK", "GO", "NO", "YES", "ON", "OFF", "NEW", "ADD", "ALL", "BUY", "THE", "AND", "FOR", "TO", "IN",
  "IS", "IT", "BE", "BY",
];

/// Latin text at or below this many characters is noise unless whitelisted.
const SHORT_LATIN_MAX_CHARS: usize = 3;

static NOISE_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
static SHORT_LATIN: OnceLock<Regex> = OnceLock::new();
static PUNCTUATION: OnceLock<Regex> = OnceLock::new();

fn get_noise_patterns() -> &'static Vec<Regex> {
  NOISE_PATTERNS.get_or_init(|| {
    [
      r"^[+\-−]?[\d\s,.]*\d[\d\s,.]*$",                       // Plain numbers: 42, 1,000, 3.5
      r"^\d+\s*[/:]\s*\d+$",                                   // Scores and ratios: 10/20, 3:1
      r"^\d{1,2}:\d{2}(:\d{2})?(\s*[ap]\.?m\.?)?$",            // Clock times: 12:30, 1:02:03
      r"^[+\-]?\d+([.,]\d+)?\s*%$",                            // Percentages
      r"^[\d\s:.,/%+\-−×]+$",                                  // Mixed numeric readouts
      r"^[\p{P}\p{S}\s]+$",                                    // Punctuation or symbols only
      r"^[-=_*~.·•]{2,}$",                                     // Decorative separator runs
      r"^\.[a-z0-9]{1,5}$",                                    // Bare file extensions: .png
      r"^[@#][\w.]+$",                                         // Social media handles and tags
      r"^(https?://|www\.)\S+$",                               // URLs
      r"^[\w.+\-]+@[\w\-]+(\.[\w\-]+)+$",                      // Email addresses
      r"^[\w\-]+(\.[\w\-]+)*\.(com|net|org|io|gg|tv|jp|co|me|dev|app)(/\S*)?$", // Bare domains
      r"^[x×]\s?\d+$",                                         // Multipliers: x3
      r"^\d+\s?[x×]$",                                         // Multipliers: 3x
      r"^(lv|lvl|level|hp|mp|sp|xp|exp|atk|def|str|dex|int|agi|luk|vit|spd|crit)\.?\s*[:+\-]?\s*\d+(\s*/\s*\d+)?$", // LVL 12, HP 40/50
      r"^\d+\s*(lv|lvl|hp|mp|sp|xp|exp|atk|def|g|pts?)$",      // 40 HP, 300 G
      r"^(hp|mp|sp|xp|exp|atk|def|str|dex|int|agi|luk|vit|spd|lv|lvl)$", // Bare stat abbreviations
    ]
    .iter()
    .filter_map(|pattern| {
      RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .ok()
    })
    .collect()
  })
}

/// Short Latin words are judged without their punctuation, so `Hi!` counts as `Hi`.
fn is_short_latin_noise(text: &str) -> bool {
  let short_latin = SHORT_LATIN
    .get_or_init(|| Regex::new(r"^[\p{Latin}\d]+$").expect("valid latin regex"));
  let punctuation = PUNCTUATION
    .get_or_init(|| Regex::new(r"[\p{P}\p{S}]+").expect("valid punctuation regex"));
  let core = punctuation.replace_all(text, "");
  let core = core.trim();
  !core.is_empty()
    && core.chars().count() <= SHORT_LATIN_MAX_CHARS
    && short_latin.is_match(core)
    && !SHORT_WORD_WHITELIST.contains(&core.to_uppercase().as_str())
}

/// Reason a region was dropped, for logging.
fn noise_reason(region: &Region, config: &GlueConfig) -> Option<&'static str> {
  let text = region.text.trim();
  if text.is_empty() {
    return Some("empty");
  }
  if let Some(confidence) = region.confidence {
    if confidence < config.confidence_threshold() {
      return Some("low confidence");
    }
  }
  if text.chars().count() == 1 {
    return Some("single character");
  }
  if get_noise_patterns().iter().any(|re| re.is_match(text)) {
    return Some("noise pattern");
  }
  if is_short_latin_noise(text) {
    return Some("short latin");
  }
  None
}

/// Whether a region is unlikely to be meaningful translatable text.
pub fn is_untranslatable(region: &Region, config: &GlueConfig) -> bool {
  noise_reason(region, config).is_some()
}

/// Keeps only regions worth translating. Idempotent: filtering twice changes nothing.
pub fn filter_untranslatable_text(regions: &[Region], config: &GlueConfig) -> Vec<Region> {
  regions
    .iter()
    .filter(|region| match noise_reason(region, config) {
      Some(reason) => {
        debug!(text = %region.text, reason, "filtered region");
        false
      }
      None => true,
    })
    .cloned()
    .collect()
}
