use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role tag attached to a user profile.
///
/// Roles are opaque strings at this layer; the server is the authority on
/// which roles exist. The three roles the client has dedicated surfaces for
/// are exposed as constants, but an unrecognized role is still representable
/// (it simply gets no dedicated dashboard).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("ADMIN"));
    pub const RESIDENT: Role = Role(Cow::Borrowed("RESIDENT"));
    pub const GUARD: Role = Role(Cow::Borrowed("GUARD"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
