use std::sync::{Mutex, PoisonError};

use tracing::{info, warn};

use super::guard::{GuardDecision, NavigationGuard, APP_NAME, HOME_PATH};
use super::location::Location;
use crate::auth::SessionReader;
use crate::loading::LoadingState;

const MAX_REDIRECTS: usize = 8;

/// Moves the app between pages.
pub trait Navigator: Send + Sync {
    /// Navigate to `to`, returning where the app actually ended up.
    fn push(&self, to: Location) -> Location;
    /// The current location; `/` before the first navigation.
    fn current(&self) -> Location;
}

#[derive(Debug, Default)]
struct RouterState {
    current: Option<Location>,
    title: Option<String>,
}

/// Headless router: guard, redirects, loading flag and document title.
pub struct Router {
    guard: NavigationGuard,
    session: SessionReader,
    loading: LoadingState,
    state: Mutex<RouterState>,
}

impl Router {
    pub fn new(guard: NavigationGuard, session: SessionReader, loading: LoadingState) -> Self {
        Self {
            guard,
            session,
            loading,
            state: Mutex::new(RouterState::default()),
        }
    }

    pub fn document_title(&self) -> String {
        self.lock().title.clone().unwrap_or_else(|| APP_NAME.to_string())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RouterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for Router {
    fn push(&self, to: Location) -> Location {
        let from = self.lock().current.clone();
        let initial = from.is_none();
        if !initial {
            self.loading.set_route_loading(true);
        }

        let mut target = to;
        let mut hops = 0;
        loop {
            match self.guard.before(&target, from.as_ref(), self.session.is_logged_in()) {
                GuardDecision::Proceed => break,
                GuardDecision::Redirect(next) if hops < MAX_REDIRECTS => {
                    info!(from = %target, to = %next, "navigation redirected");
                    target = next;
                    hops += 1;
                }
                GuardDecision::Redirect(next) => {
                    warn!(to = %next, "redirect limit reached, staying on last target");
                    break;
                }
            }
        }

        let title = self.guard.after(&target);
        {
            let mut state = self.lock();
            state.current = Some(target.clone());
            state.title = Some(title);
        }
        self.loading.set_route_loading(false);
        target
    }

    fn current(&self) -> Location {
        self.lock()
            .current
            .clone()
            .unwrap_or_else(|| Location::new(HOME_PATH))
    }
}
