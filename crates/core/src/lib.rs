//! `societyhub-core` — domain primitives shared by the client core.
//!
//! Pure data types only: identifiers, roles, the user profile, and the
//! canonical role-to-route table. No I/O, no session state.

pub mod id;
pub mod profile;
pub mod role;
pub mod routes;

pub use id::{FlatId, RequestId, SocietyId, UserId};
pub use profile::UserProfile;
pub use role::Role;
