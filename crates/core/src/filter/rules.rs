//! Link rules: keep only links for enabled cloud providers.

use crate::search::{CloudType, RawResult};

/// Filters result links by cloud provider.
#[derive(Debug, Clone)]
pub struct LinkRules {
    enabled: Vec<CloudType>,
}

impl LinkRules {
    pub fn new(enabled: Vec<CloudType>) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> &[CloudType] {
        &self.enabled
    }

    /// Keep links whose cloud type is enabled. A link without a type gets one
    /// inferred from its domain among the enabled types, or is dropped.
    ///
    /// Returns `None` when no link survives.
    pub fn apply(&self, mut result: RawResult) -> Option<RawResult> {
        result.cloud_links.retain_mut(|link| {
            if link.link.is_empty() {
                return false;
            }
            match link.cloud_type {
                Some(t) => self.enabled.contains(&t),
                None => match CloudType::infer_from_link(&link.link, &self.enabled) {
                    Some(t) => {
                        link.cloud_type = Some(t);
                        true
                    }
                    None => false,
                },
            }
        });

        if result.cloud_links.is_empty() {
            None
        } else {
            Some(result)
        }
    }
}
