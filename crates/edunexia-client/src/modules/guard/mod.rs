use edunexia_core::{is_protected, LOGIN};
use tracing::debug;

use crate::modules::http::Navigator;
use crate::modules::session::SessionManager;

/// Gate in front of protected pages.
pub(crate) struct RouteGuard<'a> {
    session: &'a SessionManager,
}

impl<'a> RouteGuard<'a> {
    pub(crate) fn new(session: &'a SessionManager) -> Self {
        Self { session }
    }

    pub(crate) fn allows(&self) -> bool {
        self.session.token().is_some()
    }

    /// Returns whether `path` may render; otherwise sends the user to login.
    pub(crate) fn enter(&self, path: &str, navigator: &dyn Navigator) -> bool {
        if !is_protected(path) || self.allows() {
            return true;
        }
        debug!(path = %path, "no session; redirecting to login");
        navigator.navigate(LOGIN, true);
        false
    }
}
