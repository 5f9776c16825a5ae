//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the collaborator traits,
//! allowing the filter pipeline and acquirer to be tested without real
//! services.
//!
//! # Example
//!
//! ```rust,ignore
//! use cloudsaver_core::testing::{fixtures, MockMetadataLookup, MockResultSource};
//!
//! let lookup = MockMetadataLookup::new();
//! lookup.add_record("流浪地球", fixtures::movie_record("流浪地球", 2019, "535167")).await;
//!
//! let source = MockResultSource::new();
//! source.set_results(vec![fixtures::tianyi_result("1", "流浪地球 4K", "a")]).await;
//! ```

mod mock_metadata;
mod mock_source;

pub use mock_metadata::{MockMetadataLookup, RecordedLookup};
pub use mock_source::MockResultSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::acquire::ContentItem;
    use crate::media::MediaType;
    use crate::metadata::MetadataRecord;
    use crate::search::{CloudLink, CloudType, RawResult};

    /// A movie record with a TMDB id.
    pub fn movie_record(title: &str, year: u32, tmdb_id: &str) -> MetadataRecord {
        MetadataRecord {
            media_type: MediaType::Movie,
            title: title.to_string(),
            original_title: None,
            year: Some(year),
            imdb_id: None,
            tmdb_id: Some(tmdb_id.to_string()),
        }
    }

    /// A TV series record with a TMDB id.
    pub fn tv_record(title: &str, year: u32, tmdb_id: &str) -> MetadataRecord {
        MetadataRecord {
            media_type: MediaType::Tv,
            title: title.to_string(),
            original_title: None,
            year: Some(year),
            imdb_id: None,
            tmdb_id: Some(tmdb_id.to_string()),
        }
    }

    /// A raw result with a single Tianyi link `https://cloud.189.cn/t/{code}`.
    pub fn tianyi_result(message_id: &str, title: &str, code: &str) -> RawResult {
        RawResult {
            message_id: message_id.to_string(),
            title: title.to_string(),
            content: String::new(),
            cloud_links: vec![CloudLink::new(
                Some(CloudType::Tianyi),
                format!("https://cloud.189.cn/t/{}", code),
            )],
        }
    }

    /// A raw result with a single Quark link `https://pan.quark.cn/s/{code}`.
    pub fn quark_result(message_id: &str, title: &str, code: &str) -> RawResult {
        RawResult {
            message_id: message_id.to_string(),
            title: title.to_string(),
            content: String::new(),
            cloud_links: vec![CloudLink::new(
                Some(CloudType::Quark),
                format!("https://pan.quark.cn/s/{}", code),
            )],
        }
    }

    /// An upstream hot-list entry.
    pub fn content_item(douban_id: &str, title: &str, type_code: &str) -> ContentItem {
        ContentItem {
            id: format!("DB:{}", douban_id),
            title: title.to_string(),
            type_code: type_code.to_string(),
            image: Some(format!("https://img.example/{}.jpg", douban_id)),
            ..Default::default()
        }
    }
}
