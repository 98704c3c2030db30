//! Shared-secret gate for the enqueue path

/// One secret for every account. Without a configured secret every request
/// passes.
#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    secret: Option<String>,
}

impl AuthGate {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.secret.is_none()
    }

    /// Exact match against the configured secret
    pub fn check(&self, provided: Option<&str>) -> bool {
        match &self.secret {
            None => true,
            Some(secret) => provided == Some(secret.as_str()),
        }
    }
}
