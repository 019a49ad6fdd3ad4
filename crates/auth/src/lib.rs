//! `societyhub-auth` — token expiry checking and the pure access policy.
//!
//! This crate is intentionally decoupled from storage and transport: it
//! decides, it never fetches.

pub mod claims;
pub mod policy;
pub mod token;

pub use claims::TokenClaims;
pub use policy::{AccessDecision, decide};
pub use token::{TokenError, decode_claims, is_expired};
