//! Punctuation and whitespace stripping.

/// Punctuation that carries no identity information in scraped titles.
const NOISE_CHARS: &[char] = &[
    '、', '.', '。', ',', '，', '·', ':', '：', ';', '；', '!', '！', '\'', '’', '"', '“', '”',
    '(', ')', '（', '）', '[', ']', '【', '】', '「', '」', '-', '—', '+', '|', '\\', '_', '/',
    '&', '#', '～', '~', '※', '？', '?',
];

fn is_noise(c: char) -> bool {
    NOISE_CHARS.contains(&c) || matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}')
}

/// Remove punctuation noise and zero-width characters from `text`.
///
/// With `keep_single_space` every whitespace run collapses to one ASCII space
/// and the result is trimmed. Without it, all whitespace is removed.
///
/// The output never contains a noise character, so applying the function
/// twice gives the same result as applying it once.
pub fn strip_noise(text: &str, keep_single_space: bool) -> String {
    let cleaned: String = text.chars().filter(|c| !is_noise(*c)).collect();

    if keep_single_space {
        cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        cleaned.chars().filter(|c| !c.is_whitespace()).collect()
    }
}
