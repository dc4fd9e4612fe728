use std::collections::BTreeMap;
use std::fmt;

use reqwest::Url;

/// Query key carrying the originally requested path through the login page.
pub const REDIRECT_QUERY: &str = "redirect";

// Locations are app-relative; a throwaway origin lets `Url` do the
// percent-encoding work.
const ORIGIN: &str = "http://articpad.invalid";

/// An in-app route target: path plus decoded query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        Self {
            path,
            query: BTreeMap::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Parse `"/login?redirect=%2Fsettings"`. Anything `Url` cannot make
    /// sense of becomes the root location.
    pub fn parse(raw: &str) -> Self {
        let Ok(base) = Url::parse(ORIGIN) else {
            return Self::new("/");
        };
        let Ok(url) = base.join(raw) else {
            return Self::new("/");
        };
        Self {
            path: url.path().to_string(),
            query: url.query_pairs().into_owned().collect(),
        }
    }

    pub fn redirect_target(&self) -> Option<&str> {
        self.query
            .get(REDIRECT_QUERY)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if self.query.is_empty() {
            return Ok(());
        }
        let mut url = Url::parse(ORIGIN).map_err(|_| fmt::Error)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }
        write!(f, "?{}", url.query().unwrap_or_default())
    }
}

impl From<&str> for Location {
    fn from(raw: &str) -> Self {
        Location::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_is_encoded_and_decoded() {
        let loc = Location::new("/login").with_query(REDIRECT_QUERY, "/settings/profile?tab=2");
        let rendered = loc.to_string();
        assert_eq!(rendered, "/login?redirect=%2Fsettings%2Fprofile%3Ftab%3D2");

        let parsed = Location::parse(&rendered);
        assert_eq!(parsed, loc);
        assert_eq!(parsed.redirect_target(), Some("/settings/profile?tab=2"));
    }

    #[test]
    fn bare_path_has_no_query() {
        let loc = Location::parse("/register");
        assert_eq!(loc.path, "/register");
        assert!(loc.query.is_empty());
        assert_eq!(loc.to_string(), "/register");
        assert_eq!(loc.redirect_target(), None);
    }

    #[test]
    fn relative_path_is_rooted() {
        assert_eq!(Location::new("login").path, "/login");
    }
}
