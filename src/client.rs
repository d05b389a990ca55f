// ABOUTME: OAuth2Client flow layer tying builders, transport, and extractor together
// ABOUTME: Authorization URL, code/refresh token exchange, password grant, and authenticated requests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # `OAuth2` client flows
//!
//! [`OAuth2Client`] drives the request builders and the response extractor
//! over a pluggable [`Transport`]. Flows that receive a response body take
//! `&mut ClientConfig` and keep its last-error slot current: a provider
//! error in the body is recorded, a clean body clears any stale record.
//! Local failures (bad arguments, transport faults) surface as `Err` and
//! leave the slot untouched, since nothing was learned about the provider.
//!
//! No flow retries, and no flow inspects HTTP status codes; a rejection the
//! provider delivers as a body is an `Ok` outcome with an empty
//! [`TokenPair`] and a populated error slot.

use crate::config::ClientConfig;
use crate::errors::{Error, Result};
use crate::models::{GrantKind, GrantRequest, TokenPair};
use crate::request;
use crate::response;
use crate::transport::{HttpTransport, Transport};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// `OAuth2` client-role flows over a pluggable transport.
#[derive(Clone)]
pub struct OAuth2Client {
    transport: Arc<dyn Transport>,
}

impl OAuth2Client {
    /// A client over the bundled [`HttpTransport`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_transport(Arc::new(HttpTransport::new()))
    }

    /// A client over a caller-supplied transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Builds the URL the resource owner's user agent is sent to for the
    /// authorization request. Pure assembly; nothing is dispatched.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `auth_server` is empty, the config has
    /// no redirect URI, or a present `scope`/`state` is empty;
    /// `AllocationFailed` if the URL buffer cannot be reserved.
    pub fn authorization_url(
        &self,
        config: &ClientConfig,
        auth_server: &str,
        scope: Option<&str>,
        state: Option<&str>,
    ) -> Result<String> {
        request::build_authorization_url(config, auth_server, scope, state)
    }

    /// Exchanges an authorization code for tokens at `token_endpoint`.
    ///
    /// A response the provider delivers is `Ok` even when it carries no
    /// tokens; `config.last_error()` then holds the provider's error state.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an empty endpoint or code, `Transport`
    /// for dispatch failures, and `MalformedResponse` for an unterminated
    /// field value in the response body.
    pub async fn exchange_code(
        &self,
        config: &mut ClientConfig,
        token_endpoint: &str,
        code: &str,
    ) -> Result<TokenPair> {
        self.request_tokens(config, token_endpoint, code, GrantKind::AuthorizationCode)
            .await
    }

    /// Trades a refresh token for a fresh token pair at `token_endpoint`.
    ///
    /// # Errors
    /// Same contract as [`OAuth2Client::exchange_code`].
    pub async fn refresh_tokens(
        &self,
        config: &mut ClientConfig,
        token_endpoint: &str,
        refresh_token: &str,
    ) -> Result<TokenPair> {
        self.request_tokens(config, token_endpoint, refresh_token, GrantKind::RefreshToken)
            .await
    }

    /// Sends resource-owner password credentials to `token_endpoint` and
    /// returns the raw response body. Callers pull tokens out of it with
    /// the response extractor.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for an empty endpoint, username, or
    /// password, `Transport` for dispatch failures, and `MalformedResponse`
    /// for an unterminated field value in the response body.
    pub async fn resource_owner_credentials(
        &self,
        config: &mut ClientConfig,
        token_endpoint: &str,
        username: &str,
        password: &str,
    ) -> Result<String> {
        if token_endpoint.is_empty() {
            return Err(Error::invalid_argument("token_endpoint must not be empty"));
        }

        let body = request::build_resource_owner_body(config, username, password)?;
        debug!(
            client = %config.secret_fingerprint(),
            endpoint = token_endpoint,
            "requesting password-grant tokens"
        );

        let response = self
            .transport
            .perform(GrantRequest::post(token_endpoint, body))
            .await?;
        Self::record_provider_outcome(config, &response)?;
        Ok(response)
    }

    /// Sends `params` plus the stored authorization code to `resource_url`
    /// and returns the raw response body.
    ///
    /// # Errors
    /// Returns `PreconditionFailed` when the config has no auth code,
    /// `NotImplemented` when `params` is absent, `InvalidArgument` for an
    /// empty URL or empty `params`, `Transport` for dispatch failures, and
    /// `MalformedResponse` for an unterminated field value in the response
    /// body.
    pub async fn authenticated_request(
        &self,
        config: &mut ClientConfig,
        resource_url: &str,
        params: Option<&str>,
    ) -> Result<String> {
        if resource_url.is_empty() {
            return Err(Error::invalid_argument("resource_url must not be empty"));
        }

        let body = request::build_authenticated_request_body(config, params)?;
        debug!(
            client = %config.secret_fingerprint(),
            url = resource_url,
            "dispatching authenticated request"
        );

        let response = self
            .transport
            .perform(GrantRequest::post(resource_url, body))
            .await?;
        Self::record_provider_outcome(config, &response)?;
        Ok(response)
    }

    /// Shared core for the code and refresh exchanges.
    async fn request_tokens(
        &self,
        config: &mut ClientConfig,
        token_endpoint: &str,
        token: &str,
        grant: GrantKind,
    ) -> Result<TokenPair> {
        if token_endpoint.is_empty() {
            return Err(Error::invalid_argument("token_endpoint must not be empty"));
        }

        let body = request::build_token_exchange_body(config, token, grant)?;
        debug!(
            client = %config.secret_fingerprint(),
            grant = grant.grant_type(),
            endpoint = token_endpoint,
            body_len = body.len(),
            "requesting tokens"
        );

        let response = self
            .transport
            .perform(GrantRequest::post(token_endpoint, body))
            .await?;
        Self::record_provider_outcome(config, &response)?;

        let tokens = response::extract_tokens(&response)?;
        if tokens.is_empty() {
            debug!(grant = grant.grant_type(), "response carried no tokens");
        } else {
            info!(grant = grant.grant_type(), "token grant completed");
        }
        Ok(tokens)
    }

    /// Scans a delivered body for a provider error and keeps the config's
    /// last-error slot current either way.
    fn record_provider_outcome(config: &mut ClientConfig, body: &str) -> Result<()> {
        match response::extract_error_state(body)? {
            Some(state) => {
                warn!(
                    code = state.code().as_str(),
                    description = state.description().unwrap_or_default(),
                    "authorization server reported an error"
                );
                config.set_last_error(state);
            }
            None => config.clear_last_error(),
        }
        Ok(())
    }
}

impl Default for OAuth2Client {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OAuth2Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Client").finish_non_exhaustive()
    }
}
