use std::collections::BTreeMap;

/// Page chrome a route renders in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Navbar,
    FullPage,
}

/// Static per-route policy, read by the navigation guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_logged_out: bool,
    pub layout: Layout,
    /// Localization key of the page title.
    pub title: Option<String>,
}

impl RouteMeta {
    pub fn new(layout: Layout) -> Self {
        Self {
            requires_auth: false,
            requires_logged_out: false,
            layout,
            title: None,
        }
    }

    pub fn auth(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    pub fn logged_out(mut self) -> Self {
        self.requires_logged_out = true;
        self
    }

    pub fn titled(mut self, key: &str) -> Self {
        self.title = Some(key.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
    /// `:name(.*)`, swallows the rest of the path.
    Rest(String),
}

#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub name: String,
    pub pattern: String,
    pub meta: RouteMeta,
    segments: Vec<Segment>,
}

impl RouteRecord {
    pub fn new(name: &str, pattern: &str, meta: RouteMeta) -> Self {
        let segments = split(pattern)
            .map(|s| match s.strip_prefix(':') {
                Some(p) => match p.strip_suffix("(.*)") {
                    Some(rest) => Segment::Rest(rest.to_string()),
                    None => Segment::Param(p.to_string()),
                },
                None => Segment::Literal(s.to_string()),
            })
            .collect();
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            meta,
            segments,
        }
    }

    /// Match `path` and capture its parameters.
    fn capture(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let parts: Vec<&str> = split(path).collect();
        let mut params = BTreeMap::new();
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Rest(name) => {
                    params.insert(name.clone(), parts.get(i..).unwrap_or_default().join("/"));
                    return Some(params);
                }
                Segment::Literal(lit) => {
                    if parts.get(i) != Some(&lit.as_str()) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    params.insert(name.clone(), parts.get(i)?.to_string());
                }
            }
        }
        (parts.len() == self.segments.len()).then_some(params)
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// A resolved route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: String,
    pub params: BTreeMap<String, String>,
    pub meta: RouteMeta,
}

/// Ordered route list; the first matching record wins and the fallback
/// catches everything else.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteRecord>,
    fallback: RouteRecord,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteRecord>, fallback: RouteRecord) -> Self {
        Self { routes, fallback }
    }

    pub fn resolve(&self, path: &str) -> RouteMatch {
        let (record, params) = self
            .routes
            .iter()
            .find_map(|r| r.capture(path).map(|p| (r, p)))
            .unwrap_or((&self.fallback, BTreeMap::new()));
        RouteMatch {
            name: record.name.clone(),
            params,
            meta: record.meta.clone(),
        }
    }

    /// The ArticPad page set.
    pub fn articpad() -> Self {
        use Layout::*;
        let routes = vec![
            RouteRecord::new("Home", "/", RouteMeta::new(Navbar).auth()),
            RouteRecord::new(
                "Login",
                "/login",
                RouteMeta::new(FullPage).logged_out().titled("routes.login"),
            ),
            RouteRecord::new(
                "Register",
                "/register",
                RouteMeta::new(FullPage).logged_out().titled("routes.register"),
            ),
            RouteRecord::new(
                "PasswordResetRequest",
                "/password-reset",
                RouteMeta::new(FullPage).logged_out().titled("routes.password_reset"),
            ),
            RouteRecord::new(
                "PasswordReset",
                "/password-reset/:token",
                RouteMeta::new(FullPage).logged_out().titled("routes.password_reset"),
            ),
            RouteRecord::new(
                "Verify",
                "/verify/:token",
                RouteMeta::new(FullPage).logged_out().titled("routes.verify_account"),
            ),
            RouteRecord::new(
                "Logout",
                "/logout",
                RouteMeta::new(FullPage).auth().titled("routes.logout"),
            ),
            RouteRecord::new(
                "Settings",
                "/settings/:afterSettings(.*)",
                RouteMeta::new(Navbar).auth().titled("routes.settings"),
            ),
        ];
        let fallback = RouteRecord::new(
            "NotFound",
            "/:pathMatch(.*)",
            RouteMeta::new(FullPage).titled("routes.not_found"),
        );
        Self::new(routes, fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_and_param_routes() {
        let table = RouteTable::articpad();

        let m = table.resolve("/login");
        assert_eq!(m.name, "Login");
        assert!(m.meta.requires_logged_out);

        let m = table.resolve("/verify/abc");
        assert_eq!(m.name, "Verify");
        assert_eq!(m.params["token"], "abc");

        assert_eq!(table.resolve("/password-reset").name, "PasswordResetRequest");
        assert_eq!(table.resolve("/password-reset/t").name, "PasswordReset");
    }

    #[test]
    fn rest_param_swallows_remaining_segments() {
        let table = RouteTable::articpad();
        let m = table.resolve("/settings/profile/avatar");
        assert_eq!(m.name, "Settings");
        assert_eq!(m.params["afterSettings"], "profile/avatar");
        assert!(m.meta.requires_auth);
        assert_eq!(m.meta.layout, Layout::Navbar);

        assert_eq!(table.resolve("/settings").params["afterSettings"], "");
    }

    #[test]
    fn page_titles() {
        let table = RouteTable::articpad();
        assert_eq!(table.resolve("/").meta.title, None);
        assert_eq!(table.resolve("/logout").meta.title.as_deref(), Some("routes.logout"));
        assert_eq!(
            table.resolve("/verify/abc").meta.title.as_deref(),
            Some("routes.verify_account")
        );
    }

    #[test]
    fn unknown_paths_hit_the_fallback() {
        let table = RouteTable::articpad();
        let m = table.resolve("/no/such/page");
        assert_eq!(m.name, "NotFound");
        assert!(!m.meta.requires_auth);
        assert_eq!(table.resolve("/verify").name, "NotFound");
    }
}
