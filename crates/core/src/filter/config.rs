use serde::{Deserialize, Serialize};

use crate::search::CloudType;

fn default_enabled_cloud_types() -> Vec<CloudType> {
    vec![CloudType::Tianyi]
}

fn default_fallback_enabled() -> bool {
    true
}

/// Filter pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Cloud providers whose links are kept.
    #[serde(default = "default_enabled_cloud_types")]
    pub enabled_cloud_types: Vec<CloudType>,
    /// Run the permissive title pass when the strict pass matches nothing.
    #[serde(default = "default_fallback_enabled")]
    pub fallback_enabled: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled_cloud_types: default_enabled_cloud_types(),
            fallback_enabled: default_fallback_enabled(),
        }
    }
}
