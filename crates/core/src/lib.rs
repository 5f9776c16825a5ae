pub mod acquire;
pub mod config;
pub mod filter;
pub mod history;
pub mod matcher;
pub mod media;
pub mod metadata;
pub mod metrics;
pub mod resolver;
pub mod search;
pub mod testing;
pub mod text;

pub use acquire::{AcquireError, AcquireOutcome, Acquirer, ContentItem};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    SanitizedConfig, ServerConfig,
};
pub use filter::{FilterConfig, FilterCounts, FilterOutcome, MediaFilter};
pub use history::{HistoryError, HistoryRecord, HistoryState, HistoryStore, SqliteHistoryStore};
pub use matcher::{CandidateMatcher, CandidateText, MatchDecision, MatchReason};
pub use media::{MediaQuery, MediaType, ResolvedIdentity};
pub use metadata::{
    IdCache, InMemoryIdCache, MetadataError, MetadataLookup, MetadataRecord, OfflineLookup,
    TmdbConfig, TmdbLookup,
};
pub use resolver::{IdentityResolver, ResolveError, ResolveRequest};
pub use search::{
    CloudLink, CloudSaverClient, CloudSaverConfig, CloudType, RawResult, ResultSource,
    SearchError,
};
