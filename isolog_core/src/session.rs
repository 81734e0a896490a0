//! Simulated authentication.
//!
//! There is no credential check: any non-empty email and password pair
//! signs in after an artificial delay. The session lives in storage under
//! [`TOKEN_KEY`] and [`EMAIL_KEY`].

use crate::storage::{Storage, EMAIL_KEY, TOKEN_KEY};
use crate::{Error, Result};
use std::time::Duration;
use uuid::Uuid;

const AUTH_FAILURE: &str = "Invalid email or password";

/// An active session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub email: String,
}

/// Sign-in/sign-out over a [`Storage`]
pub struct SessionStore<S: Storage> {
    storage: S,
    latency: Duration,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S, latency: Duration) -> Self {
        Self { storage, latency }
    }

    /// Sign in, persisting the fabricated token and the email.
    ///
    /// Fails with a generic [`Error::Auth`] when either field is blank.
    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<Session> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }

        let email = email.trim();
        if email.is_empty() || password.trim().is_empty() {
            tracing::info!("Sign-in rejected");
            return Err(Error::Auth(AUTH_FAILURE.into()));
        }

        let session = Session {
            token: format!("local-{}", Uuid::new_v4().simple()),
            email: email.to_string(),
        };

        // The token marks the session live, so it is written last
        self.storage.set_item(EMAIL_KEY, &session.email)?;
        if let Err(e) = self.storage.set_item(TOKEN_KEY, &session.token) {
            if let Err(cleanup) = self.storage.remove_item(EMAIL_KEY) {
                tracing::warn!("Failed to clear email after sign-in error: {}", cleanup);
            }
            return Err(e);
        }

        tracing::info!("Signed in as {}", session.email);
        Ok(session)
    }

    /// Clear the stored session. Signing out without a session is a no-op.
    pub fn sign_out(&mut self) -> Result<()> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(EMAIL_KEY)?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// The stored session, if a token is present
    pub fn current(&self) -> Result<Option<Session>> {
        let token = match self.storage.get_item(TOKEN_KEY)? {
            Some(token) if !token.trim().is_empty() => token,
            _ => return Ok(None),
        };

        let email = self.storage.get_item(EMAIL_KEY)?.unwrap_or_else(|| {
            tracing::warn!("Session token present without an email");
            String::new()
        });

        Ok(Some(Session { token, email }))
    }

    /// The stored session, or [`Error::NotLoggedIn`]
    pub fn require(&self) -> Result<Session> {
        self.current()?.ok_or(Error::NotLoggedIn)
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
