// ABOUTME: Caller-owned OAuth2 client identity threaded through every builder call
// ABOUTME: Validated construction, env loading, replaceable redirect/auth-code state, last-error slot
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Client Configuration
//!
//! [`ClientConfig`] holds the client identity (id and secret), the optional
//! redirect URI and authorization code, and the last provider error recorded
//! by a flow. One config belongs to one flow at a time; flows take
//! `&mut ClientConfig`, so concurrent sharing requires an explicit lock on
//! the caller's side.
//!
//! Fields are private: the constructor and setters reject empty input, so a
//! held config always has a non-empty identity.

use crate::constants::env_vars;
use crate::errors::{Error, Result};
use crate::models::ErrorState;
use sha2::{Digest, Sha256};
use std::env;
use std::fmt;
use tracing::debug;

/// Client identity and per-flow state for `OAuth2` requests.
#[derive(Clone)]
pub struct ClientConfig {
    client_id: String,
    client_secret: String,
    redirect_uri: Option<String>,
    auth_code: Option<String>,
    last_error: ErrorState,
}

impl ClientConfig {
    /// Creates a config from a client id and secret.
    ///
    /// Validation happens before any copy: empty identity input fails
    /// immediately with `InvalidArgument`. Copying the identity strings
    /// reserves capacity fallibly and surfaces `AllocationFailed` if the
    /// reservation cannot be satisfied.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `client_id` or `client_secret` is empty,
    /// or `AllocationFailed` if the identity strings cannot be copied.
    pub fn new(client_id: &str, client_secret: &str) -> Result<Self> {
        if client_id.is_empty() {
            return Err(Error::invalid_argument("client_id must not be empty"));
        }
        if client_secret.is_empty() {
            return Err(Error::invalid_argument("client_secret must not be empty"));
        }

        Ok(Self {
            client_id: copy_value(client_id)?,
            client_secret: copy_value(client_secret)?,
            redirect_uri: None,
            auth_code: None,
            last_error: ErrorState::none(),
        })
    }

    /// Creates a config from `OAUTH2_CLIENT_ID`, `OAUTH2_CLIENT_SECRET`, and
    /// optional `OAUTH2_REDIRECT_URI`.
    ///
    /// An unset or empty redirect variable leaves the redirect URI
    /// unconfigured rather than failing.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if a required variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        let client_id = required_env(env_vars::CLIENT_ID)?;
        let client_secret = required_env(env_vars::CLIENT_SECRET)?;
        let mut config = Self::new(&client_id, &client_secret)?;

        if let Ok(redirect_uri) = env::var(env_vars::REDIRECT_URI) {
            if !redirect_uri.is_empty() {
                config.set_redirect_uri(&redirect_uri)?;
            }
        }

        debug!(
            client_id = %config.client_id,
            secret_fingerprint = %config.secret_fingerprint(),
            redirect_uri = ?config.redirect_uri,
            "Loaded OAuth2 client configuration from environment"
        );
        Ok(config)
    }

    /// The client identifier. Never empty.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The client secret. Never empty. Prefer [`Self::secret_fingerprint`]
    /// in log output.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// The registered redirect URI, if one has been set.
    #[must_use]
    pub fn redirect_uri(&self) -> Option<&str> {
        self.redirect_uri.as_deref()
    }

    /// The current authorization code (or access token for authenticated
    /// resource requests), if one has been set.
    #[must_use]
    pub fn auth_code(&self) -> Option<&str> {
        self.auth_code.as_deref()
    }

    /// Replaces the stored redirect URI.
    ///
    /// # Errors
    /// Returns `InvalidArgument` on empty input, or `AllocationFailed` if
    /// the value cannot be copied.
    pub fn set_redirect_uri(&mut self, redirect_uri: &str) -> Result<()> {
        if redirect_uri.is_empty() {
            return Err(Error::invalid_argument("redirect_uri must not be empty"));
        }
        self.redirect_uri = Some(copy_value(redirect_uri)?);
        Ok(())
    }

    /// Replaces the stored authorization code.
    ///
    /// # Errors
    /// Returns `InvalidArgument` on empty input, or `AllocationFailed` if
    /// the value cannot be copied.
    pub fn set_auth_code(&mut self, auth_code: &str) -> Result<()> {
        if auth_code.is_empty() {
            return Err(Error::invalid_argument("auth_code must not be empty"));
        }
        self.auth_code = Some(copy_value(auth_code)?);
        Ok(())
    }

    /// The provider error recorded by the most recent flow call made with
    /// this config; [`ErrorState::is_clear`] when the last response carried
    /// no error (or no flow has run yet).
    #[must_use]
    pub const fn last_error(&self) -> &ErrorState {
        &self.last_error
    }

    /// Records a provider error state.
    pub fn set_last_error(&mut self, error: ErrorState) {
        self.last_error = error;
    }

    /// Resets the last-error slot to the cleared state.
    pub fn clear_last_error(&mut self) {
        self.last_error = ErrorState::none();
    }

    /// First eight hex characters of the secret's SHA-256, for log output.
    #[must_use]
    pub fn secret_fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.client_secret.as_bytes());
        let digest = hasher.finalize();
        format!("{digest:x}").chars().take(8).collect()
    }
}

// The secret and auth code never appear in Debug output; the fingerprint
// identifies the secret without exposing it.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &format_args!("fingerprint:{}", self.secret_fingerprint()),
            )
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_code", &self.auth_code.as_ref().map(|_| "<set>"))
            .field("last_error", &self.last_error)
            .finish()
    }
}

/// Copies a value into a freshly reserved owned string.
fn copy_value(value: &str) -> Result<String> {
    let mut owned = String::new();
    owned.try_reserve_exact(value.len())?;
    owned.push_str(value);
    Ok(owned)
}

/// Reads a required environment variable, treating empty as unset.
fn required_env(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::invalid_argument(format!(
            "{name} must be set and non-empty"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_identity() {
        assert!(matches!(
            ClientConfig::new("", "secret"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            ClientConfig::new("client", ""),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_setters_replace_previous_values() {
        let mut config = ClientConfig::new("client", "secret").unwrap();
        config.set_redirect_uri("https://first.example/cb").unwrap();
        config.set_redirect_uri("https://second.example/cb").unwrap();
        assert_eq!(config.redirect_uri(), Some("https://second.example/cb"));

        config.set_auth_code("first-code").unwrap();
        config.set_auth_code("second-code").unwrap();
        assert_eq!(config.auth_code(), Some("second-code"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = ClientConfig::new("client", "super-secret").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("fingerprint:"));
    }

    #[test]
    fn test_secret_fingerprint_is_stable() {
        let a = ClientConfig::new("client", "secret").unwrap();
        let b = ClientConfig::new("other-client", "secret").unwrap();
        assert_eq!(a.secret_fingerprint(), b.secret_fingerprint());
        assert_eq!(a.secret_fingerprint().len(), 8);
    }
}
