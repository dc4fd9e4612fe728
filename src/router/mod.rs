//! Page routing: the route table, the auth guard and a headless router.

pub mod guard;
pub mod location;
pub mod navigator;
pub mod routes;

pub use guard::{post_login_target, GuardDecision, NavigationGuard, LOGIN_PATH};
pub use location::Location;
pub use navigator::{Navigator, Router};
pub use routes::{Layout, RouteMatch, RouteMeta, RouteRecord, RouteTable};
