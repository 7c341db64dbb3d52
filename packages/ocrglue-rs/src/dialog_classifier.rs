//! Scores how likely a merged region is narrative or dialog text.
use ocrglue_region::Region;
use regex::Regex;
use std::sync::OnceLock;

const QUOTED_SCORE: f64 = 2.0;
const EXCLAMATION_SCORE: f64 = 0.5;
const SPEECH_PATTERN_SCORE: f64 = 2.0;
const MAX_LENGTH_SCORE: f64 = 2.0;
const CHARS_PER_LENGTH_POINT: f64 = 50.0;
const NEWLINE_SCORE: f64 = 1.5;
const DIALOG_THRESHOLD: f64 = 3.0;

struct DialogPatterns {
    quoted: Regex,
    speech: Regex,
}

static PATTERNS: OnceLock<DialogPatterns> = OnceLock::new();

fn patterns() -> &'static DialogPatterns {
    PATTERNS.get_or_init(|| DialogPatterns {
        // "..." “...” ‘...’ «...» 「...」 『...』
        quoted: Regex::new(r#""[^"\n]+"|“[^”\n]+”|‘[^’\n]+’|«[^»\n]+»|「[^」]+」|『[^』]+』"#)
            .expect("valid quote regex"),
        // narration running into a quote, or a quote followed by narration
        speech: Regex::new(
            r#"(?x)
            \p{L}[,.:!?]?\s+(?:"[^"\n]+"|“[^”\n]+”|«[^»\n]+»)
            | (?:"[^"\n]+"|“[^”\n]+”|«[^»\n]+»)[,.!?]?\s+\p{L}
            | [。！？、]\s*[「『]
            | [」』]\s*\p{L}
            "#,
        )
        .expect("valid speech regex"),
    })
}

/// Heuristic dialog score for a piece of text.
pub fn dialog_score(text: &str) -> f64 {
    let patterns = patterns();
    let mut score = 0.0;
    if patterns.quoted.is_match(text) {
        score += QUOTED_SCORE;
    }
    let exclamations = text
        .chars()
        .filter(|c| matches!(c, '!' | '?' | '！' | '？'))
        .count();
    score += exclamations as f64 * EXCLAMATION_SCORE;
    if patterns.speech.is_match(text) {
        score += SPEECH_PATTERN_SCORE;
    }
    score += (text.chars().count() as f64 / CHARS_PER_LENGTH_POINT).min(MAX_LENGTH_SCORE);
    if text.contains('\n') {
        score += NEWLINE_SCORE;
    }
    score
}

/// Whether a region reads like dialog. A region already flagged by OCR stays flagged.
pub fn is_dialog(region: &Region) -> bool {
    region.is_dialog || dialog_score(&region.text) >= DIALOG_THRESHOLD
}
