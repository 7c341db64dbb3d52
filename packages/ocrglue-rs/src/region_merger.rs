//! Collapses a cluster of regions into a single merged region.
use ocrglue_region::{BgColor, Region};

use crate::geometry::y_center;

/// Axis along which a cluster was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeDirection {
    /// Words on one line: ordered by left edge, joined with script-aware spacing.
    Horizontal,
    /// Lines of a paragraph: ordered by vertical center, joined with `\n`.
    Vertical,
}

const OPENING_PUNCTUATION: &[char] = &[
    '(', '[', '{', '“', '‘', '«', '¿', '¡', '（', '［', '｛', '「', '『', '【', '〈', '《', '〔', '〖',
];

const CLOSING_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', ')', ']', '}', '%', '”', '’', '»', '…', '）', '］', '｝', '」', '』',
    '】', '〉', '》', '〕', '〗', '、', '。', '，', '．', '！', '？', '：', '；',
];

/// True for scripts written without spaces between words: Han, kana, CJK
/// punctuation and fullwidth forms. Hangul is space-delimited and excluded.
pub fn is_cjk(c: char) -> bool {
    matches!(
        c as u32,
        0x3000..=0x303F   // CJK symbols and punctuation
        | 0x3040..=0x309F // Hiragana
        | 0x30A0..=0x30FF // Katakana
        | 0x31F0..=0x31FF // Katakana phonetic extensions
        | 0x3400..=0x4DBF // CJK extension A
        | 0x4E00..=0x9FFF // CJK unified ideographs
        | 0xF900..=0xFAFF // CJK compatibility ideographs
        | 0xFF00..=0xFFEF // Halfwidth and fullwidth forms
        | 0x20000..=0x2FA1F
    )
}

fn needs_space(prev: char, next: char) -> bool {
    if prev.is_whitespace() || next.is_whitespace() {
        return false;
    }
    if CLOSING_PUNCTUATION.contains(&next) || OPENING_PUNCTUATION.contains(&prev) {
        return false;
    }
    !(is_cjk(prev) || is_cjk(next))
}

/// Suffixes OCR splits off English contractions: `don` + `'t`.
const CONTRACTION_SUFFIXES: &[&str] = &["t", "s", "d", "m", "re", "ll", "ve"];

fn is_contraction_suffix(text: &str) -> bool {
    let Some(rest) = text.strip_prefix(['\'', '’']) else {
        return false;
    };
    let word_len = rest.find(|c: char| !c.is_alphabetic()).unwrap_or(rest.len());
    let word = rest[..word_len].to_lowercase();
    CONTRACTION_SUFFIXES.contains(&word.as_str())
}

/// Appends `next` to `acc`, inserting a single space only where the scripts call for one.
pub fn join_inline(acc: &mut String, next: &str) {
    match (acc.chars().next_back(), next.chars().next()) {
        (Some(prev), Some(_)) if prev.is_alphanumeric() && is_contraction_suffix(next) => {
            acc.push_str(next)
        }
        (Some(prev), Some(first)) if needs_space(prev, first) => {
            acc.push(' ');
            acc.push_str(next);
        }
        _ => acc.push_str(next),
    }
}

/// Merges `regions[members]` into one region.
///
/// The rect is the union of the members, `is_dialog` is OR'd, and confidence
/// and background color are averaged over the members that carry them. Other
/// provider metadata is taken from the first member in merge order.
///
/// # Panics
///
/// Panics if `members` is empty.
pub fn merge_cluster(regions: &[Region], members: &[usize], direction: MergeDirection) -> Region {
    let mut ordered: Vec<&Region> = members.iter().map(|&i| &regions[i]).collect();
    match direction {
        MergeDirection::Horizontal => ordered.sort_by(|a, b| a.rect.left.total_cmp(&b.rect.left)),
        MergeDirection::Vertical => {
            ordered.sort_by(|a, b| y_center(&a.rect).total_cmp(&y_center(&b.rect)))
        }
    }

    let first = ordered[0];
    let mut merged = Region {
        text: String::new(),
        rect: first.rect,
        is_dialog: false,
        confidence: None,
        bg_color: None,
        extra: first.extra.clone(),
    };

    let mut confidence_sum = 0.0;
    let mut confidence_count = 0usize;
    let mut color_sum = [0u32; 3];
    let mut color_count = 0u32;

    for (i, region) in ordered.iter().enumerate() {
        if i > 0 {
            match direction {
                MergeDirection::Horizontal => join_inline(&mut merged.text, &region.text),
                MergeDirection::Vertical => {
                    merged.text.push('\n');
                    merged.text.push_str(&region.text);
                }
            }
        } else {
            merged.text.push_str(&region.text);
        }
        merged.rect = merged.rect.union(&region.rect);
        merged.is_dialog |= region.is_dialog;
        if let Some(c) = region.confidence {
            confidence_sum += c;
            confidence_count += 1;
        }
        if let Some(color) = region.bg_color {
            for (sum, channel) in color_sum.iter_mut().zip(color) {
                *sum += u32::from(channel);
            }
            color_count += 1;
        }
    }

    if confidence_count > 0 {
        merged.confidence = Some(confidence_sum / confidence_count as f64);
    }
    if color_count > 0 {
        merged.bg_color = Some(average_color(color_sum, color_count));
    }
    merged
}

fn average_color(sum: [u32; 3], count: u32) -> BgColor {
    sum.map(|channel| ((f64::from(channel) / f64::from(count)).round() as u32).min(255) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocrglue_region::Rect;

    fn region(text: &str, l: f64, t: f64, r: f64, b: f64) -> Region {
        Region::new(text, Rect::new(l, t, r, b))
    }

    fn joined(parts: &[&str]) -> String {
        let mut acc = String::new();
        for p in parts {
            join_inline(&mut acc, p);
        }
        acc
    }

    #[test]
    fn test_latin_words_get_a_space() {
        assert_eq!(joined(&["Hello", "World"]), "Hello World");
    }

    #[test]
    fn test_no_space_around_punctuation() {
        assert_eq!(joined(&["Hello", ",", "world", "!"]), "Hello, world!");
        assert_eq!(joined(&["(", "note", ")"]), "(note)");
        assert_eq!(joined(&["「", "はい", "」"]), "「はい」");
    }

    #[test]
    fn test_no_space_for_cjk() {
        assert_eq!(joined(&["こん", "にちは"]), "こんにちは");
        assert_eq!(joined(&["HP", "回復"]), "HP回復");
    }

    #[test]
    fn test_contractions_stay_attached() {
        assert_eq!(joined(&["don", "'t"]), "don't");
        assert_eq!(joined(&["I", "'m", "sure"]), "I'm sure");
        assert_eq!(joined(&["we", "’ll"]), "we’ll");
        assert_eq!(joined(&["said", "'hello'"]), "said 'hello'");
        assert_eq!(joined(&["said", "'tis"]), "said 'tis");
    }

    #[test]
    fn test_hangul_keeps_spaces() {
        assert_eq!(joined(&["안녕", "하세요"]), "안녕 하세요");
    }

    #[test]
    fn test_horizontal_merge_orders_by_left() {
        let regions = vec![
            region("World", 55.0, 0.0, 100.0, 20.0),
            region("Hello", 0.0, 0.0, 50.0, 20.0),
        ];
        let merged = merge_cluster(&regions, &[0, 1], MergeDirection::Horizontal);
        assert_eq!(merged.text, "Hello World");
        assert_eq!(merged.rect, Rect::new(0.0, 0.0, 100.0, 20.0));
    }

    #[test]
    fn test_vertical_merge_uses_newlines() {
        let regions = vec![
            region("second", 0.0, 30.0, 80.0, 50.0),
            region("first", 0.0, 0.0, 60.0, 20.0),
        ];
        let merged = merge_cluster(&regions, &[0, 1], MergeDirection::Vertical);
        assert_eq!(merged.text, "first\nsecond");
        assert_eq!(merged.rect, Rect::new(0.0, 0.0, 80.0, 50.0));
    }

    #[test]
    fn test_metadata_folding() {
        let regions = vec![
            region("a", 0.0, 0.0, 10.0, 10.0)
                .with_confidence(0.5)
                .with_bg_color([10, 20, 30]),
            region("b", 12.0, 0.0, 20.0, 10.0).with_dialog(true),
            region("c", 22.0, 0.0, 30.0, 10.0)
                .with_confidence(1.0)
                .with_bg_color([20, 21, 30]),
        ];
        let merged = merge_cluster(&regions, &[0, 1, 2], MergeDirection::Horizontal);
        assert!(merged.is_dialog);
        assert_eq!(merged.confidence, Some(0.75));
        assert_eq!(merged.bg_color, Some([15, 21, 30]));
    }

    #[test]
    fn test_missing_metadata_stays_missing() {
        let regions = vec![region("a", 0.0, 0.0, 10.0, 10.0), region("b", 12.0, 0.0, 20.0, 10.0)];
        let merged = merge_cluster(&regions, &[0, 1], MergeDirection::Horizontal);
        assert!(merged.confidence.is_none());
        assert!(merged.bg_color.is_none());
        assert!(!merged.is_dialog);
    }
}
