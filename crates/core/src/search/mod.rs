//! Search result sources.
//!
//! A [`ResultSource`] turns a keyword into raw share-link results.
//! [`CloudSaverClient`] talks to a CloudSaver aggregation service.

mod cloudsaver;
mod types;

pub use cloudsaver::{parse_search_response, CloudSaverClient, CloudSaverConfig};
pub use types::*;
