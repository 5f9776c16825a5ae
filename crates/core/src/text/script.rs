//! CJK script detection.

use serde::{Deserialize, Serialize};

/// Which scripts appear in a string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptInfo {
    pub has_chinese: bool,
    pub has_japanese: bool,
    pub has_korean: bool,
    /// Every non-space character is a CJK unified ideograph.
    /// Vacuously true for empty or whitespace-only input.
    pub is_all_chinese: bool,
}

/// CJK unified ideograph range.
pub fn is_chinese_char(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

fn is_japanese_char(c: char) -> bool {
    // Hiragana and katakana
    ('\u{3040}'..='\u{309F}').contains(&c) || ('\u{30A0}'..='\u{30FF}').contains(&c)
}

fn is_korean_char(c: char) -> bool {
    ('\u{AC00}'..='\u{D7FF}').contains(&c)
}

/// True if any character is a CJK unified ideograph.
pub fn contains_chinese(text: &str) -> bool {
    text.chars().any(is_chinese_char)
}

/// Classify the scripts present in `text`.
pub fn detect_script(text: &str) -> ScriptInfo {
    let mut info = ScriptInfo::default();
    let mut all_chinese = true;

    for c in text.chars() {
        if is_chinese_char(c) {
            info.has_chinese = true;
        } else if is_japanese_char(c) {
            info.has_japanese = true;
        } else if is_korean_char(c) {
            info.has_korean = true;
        }

        if c.is_whitespace() {
            continue;
        }
        if !is_chinese_char(c) {
            all_chinese = false;
        }
    }

    info.is_all_chinese = all_chinese;
    info
}
