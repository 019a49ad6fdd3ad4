//! Canonical role-to-route table.
//!
//! Every place that needs a role-to-destination mapping goes through this
//! module; there is deliberately no second copy of these branches anywhere.

use crate::Role;

pub const LANDING: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
pub const RESIDENT_DASHBOARD: &str = "/resident/dashboard";
pub const GUARD_DASHBOARD: &str = "/guard/dashboard";

/// Dashboard route for a role, if the client has one for it.
///
/// Unrecognized roles return `None`: login does not auto-redirect them.
pub fn dashboard(role: &Role) -> Option<&'static str> {
    match role.as_str() {
        "ADMIN" => Some(ADMIN_DASHBOARD),
        "RESIDENT" => Some(RESIDENT_DASHBOARD),
        "GUARD" => Some(GUARD_DASHBOARD),
        _ => None,
    }
}

/// Home route for a role: its dashboard, or the public landing page for
/// roles the client has no dedicated surface for.
pub fn role_home(role: &Role) -> &'static str {
    dashboard(role).unwrap_or(LANDING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_have_dashboards() {
        assert_eq!(dashboard(&Role::ADMIN), Some(ADMIN_DASHBOARD));
        assert_eq!(dashboard(&Role::RESIDENT), Some(RESIDENT_DASHBOARD));
        assert_eq!(dashboard(&Role::GUARD), Some(GUARD_DASHBOARD));
    }

    #[test]
    fn unknown_role_falls_back_to_landing() {
        let role = Role::new("AUDITOR");
        assert_eq!(dashboard(&role), None);
        assert_eq!(role_home(&role), LANDING);
    }
}
