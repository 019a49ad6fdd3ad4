//! Pure screen-access policy.

use societyhub_core::{Role, UserProfile, routes};

/// Outcome of an access check for a protected screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the nested screen tree.
    Admit,
    /// No valid session: go to the login entry point.
    RedirectToLogin,
    /// Valid session, wrong role: go to that role's home route.
    RedirectToRoleHome(&'static str),
}

/// Decide whether the current session may reach a screen.
///
/// `current` is `None` for an unauthenticated session. An empty `required`
/// slice means "any authenticated user". Pure function: no I/O, no clock,
/// no side effects.
pub fn decide(current: Option<&UserProfile>, required: &[Role]) -> AccessDecision {
    let Some(profile) = current else {
        return AccessDecision::RedirectToLogin;
    };

    if !required.is_empty() && !required.contains(&profile.role) {
        return AccessDecision::RedirectToRoleHome(routes::role_home(&profile.role));
    }

    AccessDecision::Admit
}

#[cfg(test)]
mod tests {
    use societyhub_core::{SocietyId, UserId};

    use super::*;

    fn profile(role: Role) -> UserProfile {
        UserProfile {
            id: UserId::new(1),
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            role,
            society_id: SocietyId::new(3),
            society_name: "Green Meadows".to_string(),
        }
    }

    #[test]
    fn unauthenticated_always_redirects_to_login() {
        assert_eq!(decide(None, &[]), AccessDecision::RedirectToLogin);
        assert_eq!(decide(None, &[Role::ADMIN]), AccessDecision::RedirectToLogin);
        assert_eq!(
            decide(None, &[Role::ADMIN, Role::RESIDENT, Role::GUARD]),
            AccessDecision::RedirectToLogin
        );
    }

    #[test]
    fn wrong_role_redirects_to_own_home() {
        let resident = profile(Role::RESIDENT);
        assert_eq!(
            decide(Some(&resident), &[Role::ADMIN]),
            AccessDecision::RedirectToRoleHome(routes::RESIDENT_DASHBOARD)
        );
    }

    #[test]
    fn matching_role_is_admitted() {
        let admin = profile(Role::ADMIN);
        assert_eq!(
            decide(Some(&admin), &[Role::ADMIN, Role::RESIDENT, Role::GUARD]),
            AccessDecision::Admit
        );
    }

    #[test]
    fn empty_requirement_admits_any_authenticated_user() {
        let guard = profile(Role::GUARD);
        assert_eq!(decide(Some(&guard), &[]), AccessDecision::Admit);
    }

    #[test]
    fn unknown_role_is_sent_to_the_landing_page() {
        let auditor = profile(Role::new("AUDITOR"));
        assert_eq!(
            decide(Some(&auditor), &[Role::ADMIN]),
            AccessDecision::RedirectToRoleHome(routes::LANDING)
        );
    }
}
