//! Result filtering and deduplication.
//!
//! [`MediaFilter::filter_candidates`] is the entry point. For one query and
//! a batch of raw results it:
//!
//! 1. resolves the query identity once,
//! 2. drops links for disabled cloud providers ([`LinkRules`]),
//! 3. resolves and strictly matches every remaining item,
//! 4. falls back to plain title containment when nothing matched,
//! 5. dedups by message id, expands to one entry per link, dedups by link.
//!
//! [`MediaFilter::filter_resources`] runs only steps 2 and 5, for plain
//! keyword searches.

mod config;
mod dedup;
mod pipeline;
mod rules;
mod types;

pub use config::FilterConfig;
pub use dedup::{dedup_by_link, dedup_by_message_id, expand_links};
pub use pipeline::MediaFilter;
pub use rules::LinkRules;
pub use types::{FilterCounts, FilterOutcome};
