use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use super::Translator;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read message table {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("message table for '{locale}' is not valid JSON: {source}")]
    Parse {
        locale: String,
        source: serde_json::Error,
    },
}

/// Per-locale string tables with fallback to the default locale and then to
/// the key itself.
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    fallback_locale: String,
    tables: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    pub fn new(locale: impl Into<String>, fallback_locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            fallback_locale: fallback_locale.into(),
            tables: HashMap::new(),
        }
    }

    /// Add a nested JSON message table for `locale`. Nested objects become
    /// dotted keys: `{"errors": {"net_err": "..."}}` defines `errors.net_err`.
    pub fn with_messages(mut self, locale: &str, json: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json).map_err(|source| CatalogError::Parse {
            locale: locale.to_string(),
            source,
        })?;
        let table = self.tables.entry(locale.to_string()).or_default();
        flatten("", &value, table);
        Ok(self)
    }

    /// Load `<locale>.json` from `dir` for every listed locale. Missing files
    /// are skipped; their keys fall back.
    pub fn load_dir(mut self, dir: &Path, locales: &[String]) -> Result<Self, CatalogError> {
        for locale in locales {
            let path = dir.join(format!("{locale}.json"));
            if !path.exists() {
                debug!(locale = locale.as_str(), "no message table, skipping");
                continue;
            }
            let raw = fs::read_to_string(&path).map_err(|source| CatalogError::Read {
                path: path.display().to_string(),
                source,
            })?;
            self = self.with_messages(locale, &raw)?;
            info!(locale = locale.as_str(), "loaded message table");
        }
        Ok(self)
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<&String> {
        self.tables.get(locale).and_then(|t| t.get(key))
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten(&key, v, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Null => {}
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        if key.is_empty() {
            return String::new();
        }
        self.lookup(&self.locale, key)
            .or_else(|| self.lookup(&self.fallback_locale, key))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    fn locale(&self) -> &str {
        &self.locale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EN: &str = r#"{"errors": {"net_err": "Network error", "unknown": "Unknown error"}}"#;
    const ES: &str = r#"{"errors": {"net_err": "Error de red"}}"#;

    #[test]
    fn resolves_in_active_locale_then_fallback_then_key() {
        let catalog = Catalog::new("es", "en")
            .with_messages("en", EN)
            .unwrap()
            .with_messages("es", ES)
            .unwrap();

        assert_eq!(catalog.translate("errors.net_err"), "Error de red");
        assert_eq!(catalog.translate("errors.unknown"), "Unknown error");
        assert_eq!(catalog.translate("errors.nope"), "errors.nope");
        assert_eq!(catalog.translate(""), "");
    }

    #[test]
    fn rejects_invalid_table() {
        let err = Catalog::new("en", "en").with_messages("en", "{").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn loads_tables_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("en.json"), EN).unwrap();

        let catalog = Catalog::new("en", "en")
            .load_dir(dir.path(), &["en".to_string(), "de".to_string()])
            .unwrap();

        assert_eq!(catalog.translate("errors.net_err"), "Network error");
    }
}
