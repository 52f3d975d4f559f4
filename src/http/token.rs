//! Anti-forgery tokens embedded in deferred renders and checked by the endpoint.

/// Collaborator issuing and verifying anti-forgery tokens.
pub trait CsrfTokenProvider: Send + Sync {
    /// Token to embed in the follow-up request of a deferred render.
    fn token(&self) -> String;

    /// Whether `token` is acceptable for a follow-up request.
    fn verify(&self, token: &str) -> bool;
}

/// A single fixed token, e.g. one per session handed in by the host framework.
///
/// An empty token never verifies, so a provider left at its default rejects every
/// follow-up request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl CsrfTokenProvider for StaticToken {
    fn token(&self) -> String {
        self.0.clone()
    }

    fn verify(&self, token: &str) -> bool {
        !self.0.is_empty() && constant_time_eq(self.0.as_bytes(), token.as_bytes())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
