// ABOUTME: Core data model for OAuth2 request construction and token extraction
// ABOUTME: Token pairs, provider error state, grant kinds, and the transport request shape
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Data Model
//!
//! Value types shared across the crate. [`TokenPair`] and [`ErrorState`] are
//! what flows hand back to callers; [`GrantRequest`] is the transient bundle
//! a [`crate::transport::Transport`] consumes; [`GrantKind`] selects between
//! the two token-exchange shapes.

use crate::constants::{grants, params};
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP methods the transport contract supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// Retrieve a resource.
    Get,
    /// Submit a form-encoded body.
    Post,
    /// Replace a resource with a form-encoded body.
    Put,
}

impl HttpMethod {
    /// Wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single assembled request, consumed by [`crate::transport::Transport`]
/// and then discarded.
///
/// Headers are name/value pairs applied as-is; the bundled transport adds
/// `Content-Type: application/x-www-form-urlencoded` when `body` is present
/// and the caller supplied no content type of its own.
#[derive(Debug, Clone)]
pub struct GrantRequest {
    /// HTTP method to dispatch with.
    pub method: HttpMethod,
    /// Absolute request URL.
    pub url: String,
    /// Optional header name/value pairs.
    pub headers: Option<Vec<(String, String)>>,
    /// Optional form-encoded body.
    pub body: Option<String>,
}

impl GrantRequest {
    /// A POST carrying a form-encoded body.
    #[must_use]
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: None,
            body: Some(body.into()),
        }
    }

    /// A bodyless GET.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: None,
            body: None,
        }
    }

    /// Replaces the header list.
    #[must_use]
    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = Some(headers);
        self
    }
}

/// Which token-exchange shape a request uses.
///
/// Selects both the `grant_type` value and the name of the parameter that
/// carries the token (`code` for an authorization code, `refresh_token` for
/// a refresh token).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantKind {
    /// Exchange an authorization code for tokens.
    AuthorizationCode,
    /// Exchange a refresh token for fresh tokens.
    RefreshToken,
}

impl GrantKind {
    /// The `grant_type` parameter value.
    #[must_use]
    pub const fn grant_type(self) -> &'static str {
        match self {
            Self::AuthorizationCode => grants::AUTHORIZATION_CODE,
            Self::RefreshToken => grants::REFRESH_TOKEN,
        }
    }

    /// The parameter name that carries the token value.
    #[must_use]
    pub const fn token_param(self) -> &'static str {
        match self {
            Self::AuthorizationCode => params::CODE,
            Self::RefreshToken => params::REFRESH_TOKEN,
        }
    }
}

/// Tokens pulled out of a provider response.
///
/// Either field may be absent: providers omit the refresh token on some
/// grants, and a rejected exchange yields a pair with both fields `None`
/// (the rejection itself lands in the config's [`ErrorState`] slot).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Token that authorizes resource requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Token that obtains a new access token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl TokenPair {
    /// True when neither token was located.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

/// RFC 6749 protocol error codes, plus the cleared state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No error recorded.
    #[default]
    None,
    /// The request is missing a parameter or is otherwise malformed.
    InvalidRequest,
    /// Client authentication failed.
    InvalidClient,
    /// The grant or refresh token is invalid, expired, or revoked.
    InvalidGrant,
    /// The client is not authorized to use this grant type.
    UnauthorizedClient,
    /// The grant type is not supported by the provider.
    UnsupportedGrantType,
    /// The requested scope is invalid or exceeds what was granted.
    InvalidScope,
    /// The resource owner or provider denied the request.
    AccessDenied,
    /// The provider does not support this response type.
    UnsupportedResponseType,
    /// The provider encountered an internal error.
    ServerError,
    /// The provider is temporarily unable to handle the request.
    TemporarilyUnavailable,
    /// The provider sent a code this crate does not know.
    Unrecognized,
}

impl ErrorCode {
    /// Maps a wire value to its code; unknown values become
    /// [`ErrorCode::Unrecognized`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "invalid_request" => Self::InvalidRequest,
            "invalid_client" => Self::InvalidClient,
            "invalid_grant" => Self::InvalidGrant,
            "unauthorized_client" => Self::UnauthorizedClient,
            "unsupported_grant_type" => Self::UnsupportedGrantType,
            "invalid_scope" => Self::InvalidScope,
            "access_denied" => Self::AccessDenied,
            "unsupported_response_type" => Self::UnsupportedResponseType,
            "server_error" => Self::ServerError,
            "temporarily_unavailable" => Self::TemporarilyUnavailable,
            _ => Self::Unrecognized,
        }
    }

    /// Wire value of the code; the two local states map to fixed labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::InvalidRequest => "invalid_request",
            Self::InvalidClient => "invalid_client",
            Self::InvalidGrant => "invalid_grant",
            Self::UnauthorizedClient => "unauthorized_client",
            Self::UnsupportedGrantType => "unsupported_grant_type",
            Self::InvalidScope => "invalid_scope",
            Self::AccessDenied => "access_denied",
            Self::UnsupportedResponseType => "unsupported_response_type",
            Self::ServerError => "server_error",
            Self::TemporarilyUnavailable => "temporarily_unavailable",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The provider-reported error attached to a config after a rejected
/// request.
///
/// Invariant: `code == ErrorCode::None` iff every optional field is absent.
/// The constructors maintain this; fields are private so it cannot be
/// broken from outside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorState {
    code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
}

impl ErrorState {
    /// The cleared state: no error recorded.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// An error reported by the provider. `code` must not be
    /// [`ErrorCode::None`]; use [`ErrorState::none`] for the cleared state.
    #[must_use]
    pub fn provider(
        code: ErrorCode,
        description: Option<String>,
        uri: Option<String>,
        state: Option<String>,
    ) -> Self {
        debug_assert!(code != ErrorCode::None, "provider errors carry a code");
        Self {
            code,
            description,
            uri,
            state,
        }
    }

    /// The recorded protocol error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// The provider's human-readable description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The provider's documentation URI, if any.
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// The state value echoed back with the error, if any.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    /// True when no error is recorded.
    #[must_use]
    pub const fn is_clear(&self) -> bool {
        matches!(self.code, ErrorCode::None)
    }
}
