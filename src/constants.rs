// ABOUTME: Protocol constants for OAuth2 request construction and token extraction
// ABOUTME: Parameter names, grant-type values, marker spacing, env vars, transport defaults
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Constants Module
//!
//! Wire-level names used by the request builders and the response extractor.
//! Builders consume these so that tests and callers can refer to the exact
//! strings that appear on the wire.

/// Query and body parameter names defined by RFC 6749.
pub mod params {
    /// Authorization request response type selector.
    pub const RESPONSE_TYPE: &str = "response_type";
    /// Client identifier.
    pub const CLIENT_ID: &str = "client_id";
    /// Client secret (confidential clients only).
    pub const CLIENT_SECRET: &str = "client_secret";
    /// Redirect URI registered with the provider.
    pub const REDIRECT_URI: &str = "redirect_uri";
    /// Requested scope list.
    pub const SCOPE: &str = "scope";
    /// Opaque state echoed back by the provider.
    pub const STATE: &str = "state";
    /// Grant type selector for token requests.
    pub const GRANT_TYPE: &str = "grant_type";
    /// Authorization code being exchanged.
    pub const CODE: &str = "code";
    /// Refresh token being exchanged.
    pub const REFRESH_TOKEN: &str = "refresh_token";
    /// Resource owner user name (password grant).
    pub const USERNAME: &str = "username";
    /// Resource owner password (password grant).
    pub const PASSWORD: &str = "password";
    /// Access token attached to authenticated resource requests.
    pub const ACCESS_TOKEN: &str = "access_token";
}

/// `grant_type` and `response_type` values.
pub mod grants {
    /// Authorization-code exchange.
    pub const AUTHORIZATION_CODE: &str = "authorization_code";
    /// Refresh-token exchange.
    pub const REFRESH_TOKEN: &str = "refresh_token";
    /// Resource owner password credentials.
    pub const PASSWORD: &str = "password";
    /// `response_type` value for the authorization request.
    pub const RESPONSE_TYPE_CODE: &str = "code";
}

/// Response fields the extractor scans for.
pub mod fields {
    /// Access token field name.
    pub const ACCESS_TOKEN: &str = "access_token";
    /// Refresh token field name.
    pub const REFRESH_TOKEN: &str = "refresh_token";
    /// Provider error code field name.
    pub const ERROR: &str = "error";
    /// Provider error description field name.
    pub const ERROR_DESCRIPTION: &str = "error_description";
    /// Provider error documentation URI field name.
    pub const ERROR_URI: &str = "error_uri";
    /// State echoed back alongside a provider error.
    pub const STATE: &str = "state";
}

/// Environment variables read by `ClientConfig::from_env`.
pub mod env_vars {
    /// Client identifier (required).
    pub const CLIENT_ID: &str = "OAUTH2_CLIENT_ID";
    /// Client secret (required).
    pub const CLIENT_SECRET: &str = "OAUTH2_CLIENT_SECRET";
    /// Redirect URI (optional).
    pub const REDIRECT_URI: &str = "OAUTH2_REDIRECT_URI";
}

/// Defaults for the bundled reqwest transport.
pub mod transport {
    /// Content type for every produced request body.
    pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
    /// Header name the transport fills in when a body is present.
    pub const CONTENT_TYPE: &str = "content-type";
    /// Total request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Connection establishment timeout in seconds.
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
}
