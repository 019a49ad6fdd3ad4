use serde::{Deserialize, Serialize};

/// Claims the client reads out of a credential token.
///
/// This is the minimal set the client cares about. The token is otherwise
/// opaque: the server signed it and the server verifies it on every API
/// call; the client only ever extracts expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (the user's login identity).
    #[serde(default)]
    pub sub: Option<String>,

    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}
