use serde::{Deserialize, Serialize};

/// Scheduler configuration, provided by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenConfig {
    /// Multiplier applied to every `dt` passed to `ActionManager::update` (default: 1.0).
    pub time_scale: f32,
    /// Step each tree behind a panic boundary so one faulty callback cannot
    /// stop the other trees from advancing (default: true).
    pub isolate_faults: bool,
    /// Drop trees whose root target no longer exists in the host (default: true).
    pub prune_missing_targets: bool,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            isolate_faults: true,
            prune_missing_targets: true,
        }
    }
}

impl TweenConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
