use stockroom_auth::Claims;

/// Authenticated caller identity, attached to every request by the auth
/// middleware and available to all handlers behind the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    uid: String,
    name: String,
    role: String,
}

impl PrincipalContext {
    pub fn new(claims: Claims) -> Self {
        Self {
            uid: claims.uid,
            name: claims.name,
            role: claims.role,
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }
}
