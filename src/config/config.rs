use std::path::Path;

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::api::ApiConfig;
use super::i18n::I18nConfig;
use super::logging::LoggingConfig;
use super::store::StoreConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: backend endpoint, session store, locales, logging.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    pub api: ApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Load config from a YAML file, with `ARTICPAD_`-prefixed environment
/// overrides (`ARTICPAD_API__BASE_URL` sets `api.base_url`).
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfigV1, figment::Error> {
    extract(
        Figment::new()
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("ARTICPAD_").split("__")),
    )
}

/// Load config from an inline YAML document.
pub fn load_config_str(yaml: &str) -> Result<ConfigV1, figment::Error> {
    extract(Figment::new().merge(Yaml::string(yaml)))
}

fn extract(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Render the JSON schema for the configuration.
pub fn config_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(Config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreBackend;

    const TEST_CONFIG: &str = r#"
version: "1.0.0"
api:
  base_url: "http://localhost:3000/api/v1"
store:
  enabled: true
  type: file
  path: "/tmp/articpad-session.json"
i18n:
  preferred_locales: ["es-ES", "en"]
  available_locales: ["en", "es"]
logging:
  level: "debug"
  format: "json"
"#;

    #[test]
    fn loads_full_config() {
        let config = load_config_str(TEST_CONFIG).expect("config should parse");

        assert_eq!(config.api.base_url, "http://localhost:3000/api/v1");
        assert!(config
            .api
            .public_endpoints
            .iter()
            .any(|p| p == "/auth/login"));
        assert!(config.store.enabled);
        assert!(matches!(config.store.backend, Some(StoreBackend::File(_))));
        assert_eq!(config.i18n.default_locale, "en");
        assert_eq!(config.i18n.preferred_locales, vec!["es-ES", "en"]);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn sections_other_than_api_are_optional() {
        let config = load_config_str(
            r#"
version: "1.0.0"
api:
  base_url: "http://localhost"
  public_endpoints: ["/auth/login"]
"#,
        )
        .expect("config should parse");

        assert_eq!(config.api.public_endpoints, vec!["/auth/login"]);
        assert!(matches!(config.store.backend, Some(StoreBackend::Memory)));
        assert_eq!(config.logging.format, "console");
    }

    #[test]
    fn rejects_unknown_version() {
        let result = load_config_str(
            r#"
version: "0.9.0"
api:
  base_url: "http://localhost"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn schema_mentions_versions() {
        let schema = config_schema().expect("schema should render");
        assert!(schema.contains("1.0.0"));
    }
}
