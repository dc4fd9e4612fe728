//! Loading indicators shared by the router and the HTTP client.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Indicators {
    route: AtomicBool,
    api_in_flight: AtomicUsize,
}

/// Cheap-to-clone handle on the "route is loading" flag and the count of
/// in-flight API requests.
#[derive(Debug, Clone, Default)]
pub struct LoadingState {
    inner: Arc<Indicators>,
}

impl LoadingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_route_loading(&self, loading: bool) {
        self.inner.route.store(loading, Ordering::SeqCst);
    }

    pub fn is_route_loading(&self) -> bool {
        self.inner.route.load(Ordering::SeqCst)
    }

    pub fn is_api_loading(&self) -> bool {
        self.inner.api_in_flight.load(Ordering::SeqCst) > 0
    }

    /// Mark one request in flight until the returned guard drops.
    pub fn api_request(&self) -> ApiLoadingGuard {
        self.inner.api_in_flight.fetch_add(1, Ordering::SeqCst);
        ApiLoadingGuard {
            inner: self.inner.clone(),
        }
    }
}

pub struct ApiLoadingGuard {
    inner: Arc<Indicators>,
}

impl Drop for ApiLoadingGuard {
    fn drop(&mut self) {
        self.inner.api_in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_loading_follows_guards() {
        let loading = LoadingState::new();
        let first = loading.api_request();
        let second = loading.clone().api_request();
        assert!(loading.is_api_loading());

        drop(first);
        assert!(loading.is_api_loading());
        drop(second);
        assert!(!loading.is_api_loading());
    }

    #[test]
    fn route_flag_is_shared_between_clones() {
        let loading = LoadingState::new();
        loading.clone().set_route_loading(true);
        assert!(loading.is_route_loading());
    }
}
