//! Authenticated partner session.

use thiserror::Error;

/// Bearer token for one signed-in partner.
///
/// The token is acquired by the sign-in flow (outside this crate) and is
/// threaded explicitly into client construction. There is no ambient,
/// process-wide credential slot: a client without a session cannot exist,
/// so a request without a token cannot be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session token must not be blank")]
    BlankToken,
}

impl Session {
    /// Wrap an already-acquired bearer token. Blank tokens are rejected.
    pub fn new(token: impl Into<String>) -> Result<Self, SessionError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SessionError::BlankToken);
        }
        Ok(Self { token })
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}
