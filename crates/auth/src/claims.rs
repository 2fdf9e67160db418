use serde::{Deserialize, Serialize};

/// Claims carried by an access token once verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identifier of the caller.
    pub uid: String,
    /// Display name.
    pub name: String,
    /// Role granted to the caller.
    pub role: String,
    /// Issued-at, seconds since epoch.
    #[serde(default)]
    pub iat: i64,
    /// Expiry, seconds since epoch. Enforced during verification.
    pub exp: i64,
}
