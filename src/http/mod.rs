//! The shared backend client and its outbound middleware chain.

pub mod client;
pub mod middleware;

pub use client::ApiClient;
pub use middleware::{AcceptLanguage, BearerAuth, RequestMiddleware};

use reqwest::Url;

const ORIGIN: &str = "http://articpad.invalid";

/// `base` with `segment` appended as one percent-encoded path segment.
pub(crate) fn path_with_segment(base: &str, segment: &str) -> String {
    let Ok(mut url) = Url::parse(ORIGIN).and_then(|origin| origin.join(base)) else {
        return base.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(segment);
    }
    url.path().to_string()
}

/// `path` with everything past `/<area>/<action>` masked, so tokens carried
/// in the path (`/auth/verify/<token>`) stay out of the logs.
pub(crate) fn log_path(path: &str) -> String {
    let path = path.split('?').next().unwrap_or_default();
    let mut segments: Vec<&str> = path.split('/').skip(1).collect();
    if segments.len() > 2 {
        segments.truncate(2);
        segments.push("*");
    }
    format!("/{}", segments.join("/"))
}
