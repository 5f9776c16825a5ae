//! Keyword extraction: media type, year, season and episode markers.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::NumeralNormalizer;
use crate::media::MediaType;

/// Leading type words such as `电视剧 三体` or `电影 流浪地球`.
static TYPE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s+)(电视剧|动漫|电影)").unwrap());

static SEASON_CN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"第\s*([0-9一二两三四五六七八九十百零]+)\s*季").unwrap());

static SEASON_EN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bseason\s*(\d{1,3})\b").unwrap());

/// `S01`, `S01E02`, `s1 e2`.
static SEASON_EPISODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bS(\d{1,2})(?:\s*E(\d{1,4}))?\b").unwrap());

static EPISODE_CN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"第\s*([0-9一二两三四五六七八九十百零]+)\s*集").unwrap());

static EPISODE_EN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:EP|Episode)\s*(\d{1,4})\b").unwrap());

/// A four digit year set off by whitespace or parentheses.
static YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\s(（]+((?:19|20)\d{2})(?:[\s)）]+|$)").unwrap()
});

/// Markers pulled out of a title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedKeywords {
    /// Set by an explicit type word, or to TV by any season or episode marker.
    pub media_type: Option<MediaType>,
    pub year: Option<u32>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    /// Text left after removing every marker, whitespace collapsed.
    /// Falls back to the year when nothing else is left.
    pub remainder: String,
}

/// Extract type, year, season and episode markers from `text`.
///
/// When several patterns could supply the same field, the one that appears
/// first in the text wins. An episode without a season implies season 1.
pub fn extract_keywords(text: &str, numerals: &dyn NumeralNormalizer) -> ExtractedKeywords {
    let mut media_type = detect_type_word(text);

    let mut season = earliest(&[
        first_number(&SEASON_CN, text, 1, numerals),
        first_number(&SEASON_EN, text, 1, numerals),
        first_number(&SEASON_EPISODE, text, 1, numerals),
    ]);
    let episode = earliest(&[
        first_number(&EPISODE_CN, text, 1, numerals),
        first_number(&EPISODE_EN, text, 1, numerals),
        first_number(&SEASON_EPISODE, text, 2, numerals),
    ]);
    if season.is_some() || episode.is_some() {
        media_type = Some(MediaType::Tv);
    }
    if episode.is_some() && season.is_none() {
        season = Some(1);
    }

    let year: Option<u32> = YEAR
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok());

    let mut remainder = remove_markers(text);
    if remainder.is_empty() {
        if let Some(year) = year {
            remainder = year.to_string();
        }
    }

    ExtractedKeywords {
        media_type,
        year,
        season,
        episode,
        remainder,
    }
}

fn detect_type_word(text: &str) -> Option<MediaType> {
    let mut found = None;
    for caps in TYPE_WORD.captures_iter(text) {
        match caps.get(1).map(|m| m.as_str()) {
            Some("电视剧") | Some("动漫") => return Some(MediaType::Tv),
            Some("电影") => found = Some(MediaType::Movie),
            _ => {}
        }
    }
    found
}

/// Position and value of the first match of `re` whose `group` parses.
fn first_number(
    re: &Regex,
    text: &str,
    group: usize,
    numerals: &dyn NumeralNormalizer,
) -> Option<(usize, u32)> {
    re.captures_iter(text).find_map(|caps| {
        let m = caps.get(group)?;
        let value = numerals.to_int(m.as_str())?;
        Some((m.start(), value))
    })
}

fn earliest(hits: &[Option<(usize, u32)>]) -> Option<u32> {
    hits.iter()
        .flatten()
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, value)| *value)
}

fn remove_markers(text: &str) -> String {
    let patterns: [&Regex; 7] = [
        &TYPE_WORD,
        &SEASON_CN,
        &SEASON_EN,
        &SEASON_EPISODE,
        &EPISODE_CN,
        &EPISODE_EN,
        &YEAR,
    ];

    let mut spans: Vec<(usize, usize)> = patterns
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| (m.start(), m.end())))
        .collect();
    spans.sort_unstable();

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for (start, end) in spans {
        if start >= cursor {
            out.push_str(&text[cursor..start]);
            out.push(' ');
            cursor = end;
        } else if end > cursor {
            cursor = end;
        }
    }
    out.push_str(&text[cursor..]);

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
