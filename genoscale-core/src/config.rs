//! Engine tuning knobs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of buckets in each geometry batch's range index
    #[serde(default = "default_bin_count")]
    pub bin_count: usize,

    /// Duration of the transition animated when a zoomable domain changes
    /// because of new data or configuration
    #[serde(default = "default_domain_transition_ms")]
    pub domain_transition_ms: f64,

    /// Duration used by `zoom_to` when the caller asks for the default
    #[serde(default = "default_zoom_transition_ms")]
    pub zoom_transition_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bin_count: default_bin_count(),
            domain_transition_ms: default_domain_transition_ms(),
            zoom_transition_ms: default_zoom_transition_ms(),
        }
    }
}

fn default_bin_count() -> usize {
    50
}

fn default_domain_transition_ms() -> f64 {
    500.0
}

fn default_zoom_transition_ms() -> f64 {
    700.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"bin_count": 64}"#).unwrap();
        assert_eq!(config.bin_count, 64);
        assert_eq!(config.domain_transition_ms, 500.0);
        assert_eq!(config.zoom_transition_ms, 700.0);
    }
}
