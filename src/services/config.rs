//! 配置：部件服务的可调行为
//!
//! Every field has a default, so a partial (or empty) JSON object is a valid
//! configuration.

use serde::{Deserialize, Serialize};

pub const REMOVE_ON_HIDE_TAG: &str = "removeOnHide";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which sibling becomes selected after a selected part is removed on hide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalSelection {
    /// The first remaining child of the container.
    #[default]
    First,
    /// The most recently activated remaining child, else the first one.
    MostRecent,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartServiceConfig {
    /// Parts carrying this tag are detached from the model when hidden.
    pub remove_on_hide_tag: String,
    pub removal_selection: RemovalSelection,
    /// Tag the fallback container with the descriptor category when a part is
    /// appended to it, so later instances of the category find it.
    pub tag_category_containers: bool,
}

impl Default for PartServiceConfig {
    fn default() -> Self {
        Self {
            remove_on_hide_tag: REMOVE_ON_HIDE_TAG.to_string(),
            removal_selection: RemovalSelection::First,
            tag_category_containers: true,
        }
    }
}

impl PartServiceConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
