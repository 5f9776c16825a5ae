//! Numeral normalization for season and episode markers.

/// Converts a numeral string (ASCII digits or Chinese numerals) to an integer.
pub trait NumeralNormalizer: Send + Sync {
    /// Returns `None` when the string is empty or not a numeral.
    fn to_int(&self, text: &str) -> Option<u32>;
}

/// Handles ASCII digits, Chinese digits (零〇一二两三四五六七八九),
/// the units 十百千 and mixed forms such as `1百` or `二十三`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CjkNumerals;

impl NumeralNormalizer for CjkNumerals {
    fn to_int(&self, text: &str) -> Option<u32> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if text.chars().all(|c| c.is_ascii_digit()) {
            return text.parse().ok();
        }
        parse_mixed(text)
    }
}

fn digit_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    match c {
        '零' | '〇' => Some(0),
        '一' => Some(1),
        '二' | '两' => Some(2),
        '三' => Some(3),
        '四' => Some(4),
        '五' => Some(5),
        '六' => Some(6),
        '七' => Some(7),
        '八' => Some(8),
        '九' => Some(9),
        _ => None,
    }
}

fn unit_value(c: char) -> Option<u32> {
    match c {
        '十' => Some(10),
        '百' => Some(100),
        '千' => Some(1000),
        _ => None,
    }
}

fn parse_mixed(text: &str) -> Option<u32> {
    let mut total: u32 = 0;
    let mut pending: Option<u32> = None;

    for c in text.chars() {
        if let Some(d) = digit_value(c) {
            let base = pending.unwrap_or(0);
            pending = Some(base.checked_mul(10)?.checked_add(d)?);
        } else if let Some(unit) = unit_value(c) {
            // A bare unit (十二) counts as one of it.
            let multiplier = pending.take().unwrap_or(1);
            total = total.checked_add(multiplier.checked_mul(unit)?)?;
        } else {
            return None;
        }
    }

    total.checked_add(pending.unwrap_or(0))
}
