//! Text normalization for scraped titles and descriptions.
//!
//! Pure functions only. Everything here is deterministic and safe to call
//! from any number of tasks at once.
//!
//! - [`strip_noise`] removes punctuation, zero-width characters and extra
//!   whitespace.
//! - [`detect_script`] reports which CJK scripts a string contains.
//! - [`NumeralNormalizer`] turns digit or Chinese-numeral strings into integers.
//! - [`extract_keywords`] pulls media type, year, season and episode markers
//!   out of a title and returns the cleaned remainder.

mod keywords;
mod noise;
mod numeral;
mod script;

pub use keywords::{extract_keywords, ExtractedKeywords};
pub use noise::strip_noise;
pub use numeral::{CjkNumerals, NumeralNormalizer};
pub use script::{contains_chinese, detect_script, is_chinese_char, ScriptInfo};
