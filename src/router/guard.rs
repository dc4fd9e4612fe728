use std::sync::Arc;

use tracing::debug;

use super::location::{Location, REDIRECT_QUERY};
use super::routes::{RouteMatch, RouteTable};
use crate::i18n::Translator;

pub const APP_NAME: &str = "ArticPad";
pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(Location),
}

/// Route-level auth policy and page titles.
#[derive(Clone)]
pub struct NavigationGuard {
    routes: Arc<RouteTable>,
    translator: Arc<dyn Translator>,
}

impl NavigationGuard {
    pub fn new(routes: Arc<RouteTable>, translator: Arc<dyn Translator>) -> Self {
        Self { routes, translator }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Decide whether `to` may be entered. Anonymous users are sent to the
    /// login page with the requested path in `redirect`; logged-in users
    /// are kept off logged-out pages.
    pub fn before(&self, to: &Location, from: Option<&Location>, logged_in: bool) -> GuardDecision {
        let target = self.routes.resolve(&to.path);
        debug!(
            to = %to,
            from = %from.map(ToString::to_string).unwrap_or_default(),
            route = target.name.as_str(),
            logged_in,
            "navigation guard"
        );

        if target.meta.requires_auth && !logged_in {
            return GuardDecision::Redirect(
                Location::new(LOGIN_PATH).with_query(REDIRECT_QUERY, to.to_string()),
            );
        }
        if target.meta.requires_logged_out && logged_in {
            return GuardDecision::Redirect(post_login_target(to));
        }
        GuardDecision::Proceed
    }

    /// The document title for a completed navigation.
    pub fn after(&self, to: &Location) -> String {
        self.title_for(&self.routes.resolve(&to.path))
    }

    fn title_for(&self, route: &RouteMatch) -> String {
        match route.meta.title.as_deref() {
            Some(key) => format!("{} | {APP_NAME}", self.translator.translate(key)),
            None => APP_NAME.to_string(),
        }
    }
}

/// Where a freshly authenticated user should land: the `redirect` query of
/// `current`, or home when absent or pointing at the logout page.
pub fn post_login_target(current: &Location) -> Location {
    match current.redirect_target() {
        Some(target) => {
            let target = Location::parse(target);
            if target.path == LOGOUT_PATH {
                Location::new(HOME_PATH)
            } else {
                target
            }
        }
        None => Location::new(HOME_PATH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;

    fn guard() -> NavigationGuard {
        let catalog = Catalog::new("en", "en")
            .with_messages("en", r#"{"routes": {"login": "Log in"}}"#)
            .unwrap();
        NavigationGuard::new(Arc::new(RouteTable::articpad()), Arc::new(catalog))
    }

    #[test]
    fn anonymous_user_is_sent_to_login_with_redirect() {
        let decision = guard().before(&Location::parse("/settings/profile"), None, false);
        assert_eq!(
            decision,
            GuardDecision::Redirect(
                Location::new("/login").with_query("redirect", "/settings/profile")
            )
        );
    }

    #[test]
    fn logged_in_user_skips_logged_out_pages() {
        let g = guard();
        assert_eq!(
            g.before(&Location::parse("/register"), None, true),
            GuardDecision::Redirect(Location::new("/"))
        );
        assert_eq!(
            g.before(&Location::parse("/login?redirect=%2Fsettings%2Fa"), None, true),
            GuardDecision::Redirect(Location::new("/settings/a"))
        );
        assert_eq!(
            g.before(&Location::parse("/login?redirect=%2Flogout"), None, true),
            GuardDecision::Redirect(Location::new("/"))
        );
    }

    #[test]
    fn open_and_permitted_routes_proceed() {
        let g = guard();
        assert_eq!(g.before(&Location::parse("/login"), None, false), GuardDecision::Proceed);
        assert_eq!(g.before(&Location::parse("/"), None, true), GuardDecision::Proceed);
        assert_eq!(g.before(&Location::parse("/nowhere"), None, false), GuardDecision::Proceed);
    }

    #[test]
    fn titles_use_suffix_or_bare_name() {
        let g = guard();
        assert_eq!(g.after(&Location::parse("/login")), "Log in | ArticPad");
        assert_eq!(g.after(&Location::parse("/register")), "routes.register | ArticPad");
        assert_eq!(g.after(&Location::parse("/logout")), "routes.logout | ArticPad");
        assert_eq!(g.after(&Location::parse("/")), "ArticPad");
    }
}
