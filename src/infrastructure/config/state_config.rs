use serde::{Deserialize, Serialize};

/// Session state carried between runs.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Sources selected in the last run.
    #[serde(default)]
    pub selected_sources: Vec<String>,

    /// Cursor of the last page loaded.
    #[serde(default)]
    pub last_after: Option<String>,
}
