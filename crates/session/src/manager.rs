//! Session manager: sole writer of the current-user state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use thiserror::Error;

use societyhub_auth::is_expired;
use societyhub_core::{Role, UserProfile, routes};
use societyhub_events::NotificationBridge;

use crate::notify::{Navigate, Notify};
use crate::service::{AuthApi, AuthApiError, LoginRequest, RegisterRequest, RegisterResponse};
use crate::store::{CredentialStore, StoreError};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Service(#[from] AuthApiError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Default)]
struct SessionState {
    profile: Option<UserProfile>,
    loading: bool,
    last_error: Option<String>,
}

/// Owns the current session and enforces its invariants on every read.
///
/// Invariants:
/// - a session is authenticated iff the *store* holds an unexpired token,
///   re-checked at call time rather than cached;
/// - the profile is present iff the credential is present — a read that
///   discovers expiry or a torn store clears both.
///
/// Concurrent `login`/`register` calls are not serialized: the last one to
/// settle wins. The state mutex only guarantees that readers never observe
/// a torn update.
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    api: Arc<dyn AuthApi>,
    notifier: Arc<dyn Notify>,
    navigator: Arc<dyn Navigate>,
    bridge: Option<Arc<NotificationBridge>>,
    state: Mutex<SessionState>,
}

impl SessionManager {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        api: Arc<dyn AuthApi>,
        notifier: Arc<dyn Notify>,
        navigator: Arc<dyn Navigate>,
    ) -> Self {
        Self {
            store,
            api,
            notifier,
            navigator,
            bridge: None,
            state: Mutex::new(SessionState {
                profile: None,
                // Consumers must not trust session state until initialize()
                // has run.
                loading: true,
                last_error: None,
            }),
        }
    }

    /// Attach the realtime bridge; it will follow the session lifecycle
    /// (connected while authenticated, torn down otherwise).
    pub fn with_bridge(mut self, bridge: Arc<NotificationBridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    /// Hydrate the session from the credential store. Runs once at startup.
    ///
    /// Anything short of a parsable, unexpired (token, profile) pair leaves
    /// the session unauthenticated and clears the store.
    pub fn initialize(&self) {
        let hydrated = self.hydrate();
        if let (Some(profile), Some(bridge)) = (&hydrated, &self.bridge) {
            bridge.connect(profile);
        }

        let mut state = self.state_lock();
        state.profile = hydrated;
        state.loading = false;
    }

    pub async fn login(&self, credentials: LoginRequest) -> Result<UserProfile, SessionError> {
        {
            let mut state = self.state_lock();
            state.loading = true;
            state.last_error = None;
        }

        match self.api.login(&credentials).await {
            Ok(response) => {
                let profile = response.profile();

                // Persist the pair before the in-memory swap so no reader
                // can observe a session the store cannot back.
                if let Err(err) = self.store.put(&response.token, &profile) {
                    let mut state = self.state_lock();
                    state.loading = false;
                    state.last_error = Some(err.to_string());
                    drop(state);
                    self.notifier.error("Login failed");
                    return Err(err.into());
                }

                {
                    let mut state = self.state_lock();
                    state.profile = Some(profile.clone());
                    state.loading = false;
                }

                if let Some(bridge) = &self.bridge {
                    bridge.connect(&profile);
                }

                tracing::info!(user = %profile.email, role = %profile.role, "logged in");
                self.notifier.success("Login successful!");
                if let Some(route) = routes::dashboard(&profile.role) {
                    self.navigator.navigate(route);
                }

                Ok(profile)
            }
            Err(err) => {
                let message = err.user_message("Login failed");
                {
                    let mut state = self.state_lock();
                    state.loading = false;
                    state.last_error = Some(message.clone());
                }
                self.notifier.error(&message);
                Err(err.into())
            }
        }
    }

    /// Register a new account. Never mutates the session: the user still has
    /// to log in afterwards.
    pub async fn register(&self, user: RegisterRequest) -> Result<RegisterResponse, SessionError> {
        {
            let mut state = self.state_lock();
            state.loading = true;
            state.last_error = None;
        }

        match self.api.register(&user).await {
            Ok(response) => {
                self.state_lock().loading = false;
                self.notifier.success("Registration successful! Please login.");
                self.navigator.navigate(routes::LOGIN);
                Ok(response)
            }
            Err(err) => {
                let message = err.user_message("Registration failed");
                {
                    let mut state = self.state_lock();
                    state.loading = false;
                    state.last_error = Some(message.clone());
                }
                self.notifier.error(&message);
                Err(err.into())
            }
        }
    }

    /// Clear the session in full. Idempotent: with no active session this is
    /// a no-op beyond the notification and the redirect.
    pub fn logout(&self) {
        self.clear_store();
        {
            let mut state = self.state_lock();
            state.profile = None;
            state.last_error = None;
        }
        if let Some(bridge) = &self.bridge {
            bridge.disconnect();
        }
        self.notifier.info("You have been logged out");
        self.navigator.navigate(routes::LOGIN);
    }

    /// Live authentication check, re-derived from the store at call time.
    ///
    /// A session that expired between hydration and this call is reported
    /// stale without needing a timer, and the read clears what it found.
    pub fn is_authenticated(&self) -> bool {
        let live = match self.store.token() {
            Ok(Some(token)) => !is_expired(&token, Utc::now()),
            Ok(None) => false,
            Err(err) => {
                tracing::warn!("credential store read failed: {err}");
                false
            }
        };

        if !live {
            self.drop_stale();
        }
        live
    }

    pub fn has_role(&self, role: &Role) -> bool {
        if !self.is_authenticated() {
            return false;
        }
        self.state_lock()
            .profile
            .as_ref()
            .map(|p| p.role == *role)
            .unwrap_or(false)
    }

    pub fn current_profile(&self) -> Option<UserProfile> {
        self.state_lock().profile.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state_lock().loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state_lock().last_error.clone()
    }

    fn hydrate(&self) -> Option<UserProfile> {
        let token = match self.store.token() {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!("credential store read failed: {err}");
                None
            }
        };
        let profile = match self.store.profile() {
            Ok(profile) => profile,
            Err(err) => {
                tracing::warn!("stored profile unusable: {err}");
                None
            }
        };

        match (token, profile) {
            (Some(token), Some(profile)) if !is_expired(&token, Utc::now()) => Some(profile),
            (None, None) => None,
            // Torn pair, corrupt profile, or expired token: fail closed.
            _ => {
                self.clear_store();
                None
            }
        }
    }

    /// A read found a stale or absent credential: drop everything it guards.
    fn drop_stale(&self) {
        let had_profile = self.state_lock().profile.take().is_some();
        self.clear_store();
        if had_profile {
            if let Some(bridge) = &self.bridge {
                bridge.disconnect();
            }
            tracing::info!("session expired; credentials cleared");
        }
    }

    fn clear_store(&self) {
        if let Err(err) = self.store.clear() {
            tracing::warn!("failed to clear credential store: {err}");
        }
    }

    fn state_lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
