//! `societyhub-session` — session lifecycle and role-gated navigation.
//!
//! The session manager is the sole writer of session state; the navigation
//! guard and screen code only read it, and every read re-checks credential
//! expiry against the store.

pub mod guard;
pub mod manager;
pub mod notify;
pub mod service;
pub mod store;

pub use guard::NavigationGuard;
pub use manager::{SessionError, SessionManager};
pub use notify::{Navigate, Notify, TracingNotifier};
pub use service::{
    AuthApi, AuthApiError, HttpAuthApi, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse,
};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StoreError};
