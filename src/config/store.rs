use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Persistent session store configuration:
/// - enabled: if false, the adapter sees an unavailable backend and no-ops.
/// - backend: where persisted keys live.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct StoreConfig {
    pub enabled: bool,
    #[serde(flatten)]
    pub backend: Option<StoreBackend>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: Some(StoreBackend::Memory),
        }
    }
}

/// Store backends, selected with a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(tag = "type")]
pub enum StoreBackend {
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "file")]
    File(FileStoreConfig),
}

#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct FileStoreConfig {
    pub path: PathBuf,
}
