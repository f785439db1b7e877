use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};

/// Options for [`DefCollector`](crate::DefCollector).
///
/// Can be loaded from TOML or JSON. Unknown keys are rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectorConfig {
    /// Also collect the definitions of meta-annotations on every collected definition.
    pub include_meta_annotations: bool,
    /// After collection, check every annotation's element values against the merged
    /// definition of its type.
    pub verify_unification: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            include_meta_annotations: false,
            verify_unification: true,
        }
    }
}

impl CollectorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| SceneError::Config(err.to_string()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| SceneError::Config(err.to_string()))
    }
}
