use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct I18nConfig {
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_available_locales")]
    pub available_locales: Vec<String>,
    /// Language preference of the user agent, most preferred first.
    #[serde(default)]
    pub preferred_locales: Vec<String>,
    /// Directory holding one `<locale>.json` message table per locale.
    pub messages_dir: Option<PathBuf>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            available_locales: default_available_locales(),
            preferred_locales: Vec::new(),
            messages_dir: None,
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_available_locales() -> Vec<String> {
    vec!["en".to_string()]
}
