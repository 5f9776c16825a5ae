//! In-memory title to id cache.

use std::collections::HashMap;
use std::sync::RwLock;

use super::IdCache;
use crate::text::strip_noise;

/// Normalize a title into a cache key: noise and whitespace removed, lowercased.
pub fn normalize_cache_key(title: &str) -> String {
    strip_noise(title, false).to_lowercase()
}

/// Process-local [`IdCache`] filled by lookups as they succeed.
#[derive(Debug, Default)]
pub struct InMemoryIdCache {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryIdCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember `id` for `title`. Titles that normalize to nothing are ignored.
    pub fn insert(&self, title: &str, id: impl Into<String>) {
        let key = normalize_cache_key(title);
        if key.is_empty() {
            return;
        }
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key, id.into());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IdCache for InMemoryIdCache {
    fn lookup_cached_id(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cache_key() {
        assert_eq!(normalize_cache_key("The Wandering Earth: II"), "thewanderingearthii");
        assert_eq!(normalize_cache_key("【流浪地球】"), "流浪地球");
    }

    #[test]
    fn test_insert_and_lookup_by_normalized_key() {
        let cache = InMemoryIdCache::new();
        cache.insert("Breaking Bad", "1396");

        assert_eq!(
            cache.lookup_cached_id(&normalize_cache_key("breaking.bad")),
            Some("1396".to_string())
        );
        assert_eq!(cache.lookup_cached_id("unknown"), None);
    }

    #[test]
    fn test_ignores_empty_keys() {
        let cache = InMemoryIdCache::new();
        cache.insert("【】", "1");
        assert!(cache.is_empty());
    }
}
