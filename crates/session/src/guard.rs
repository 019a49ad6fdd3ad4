//! Protected screen boundary.

use std::sync::Arc;

use societyhub_auth::{AccessDecision, decide};
use societyhub_core::{Role, routes};

use crate::manager::SessionManager;
use crate::notify::Navigate;

/// Wraps a protected screen and gates each navigation attempt.
///
/// Every attempt re-derives the live session and re-runs the policy; no
/// decision is cached, so a logout in another surface is reflected on the
/// very next navigation. An unauthorized attempt never raises: it redirects.
pub struct NavigationGuard {
    session: Arc<SessionManager>,
    navigator: Arc<dyn Navigate>,
}

impl NavigationGuard {
    pub fn new(session: Arc<SessionManager>, navigator: Arc<dyn Navigate>) -> Self {
        Self { session, navigator }
    }

    /// Run the access policy against the live session.
    pub fn evaluate(&self, required: &[Role]) -> AccessDecision {
        let profile = if self.session.is_authenticated() {
            self.session.current_profile()
        } else {
            None
        };
        decide(profile.as_ref(), required)
    }

    /// Evaluate and act: `true` means the nested screen tree may render,
    /// `false` means the indicated redirect has been performed.
    pub fn admit(&self, required: &[Role]) -> bool {
        match self.evaluate(required) {
            AccessDecision::Admit => true,
            AccessDecision::RedirectToLogin => {
                self.navigator.navigate(routes::LOGIN);
                false
            }
            AccessDecision::RedirectToRoleHome(route) => {
                self.navigator.navigate(route);
                false
            }
        }
    }
}
