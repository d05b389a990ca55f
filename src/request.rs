// ABOUTME: Pure builders that serialize OAuth2 parameters into transport-ready strings
// ABOUTME: Authorization URLs, token-exchange bodies, password-grant bodies, authenticated bodies
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Request Builders
//!
//! Deterministic serialization of `OAuth2` request parameters. Each builder
//! percent-encodes the caller-supplied values once, derives the exact output
//! length from those encoded pieces, reserves that capacity fallibly, and
//! writes the same pieces — sizing and content share one source of truth, so
//! the output can neither truncate nor over-allocate.
//!
//! Builders are pure: no network access, no config mutation, and identical
//! inputs yield byte-identical output.

use crate::config::ClientConfig;
use crate::constants::grants;
use crate::constants::params::{
    ACCESS_TOKEN, CLIENT_ID, CLIENT_SECRET, GRANT_TYPE, PASSWORD, REDIRECT_URI, RESPONSE_TYPE,
    SCOPE, STATE, USERNAME,
};
use crate::errors::{Error, Result};
use crate::models::GrantKind;
use std::borrow::Cow;
use urlencoding::encode;

/// One `key=value` pair with the value already percent-encoded.
type Pair<'a> = (&'static str, Cow<'a, str>);

/// Builds the authorization-request URL the caller sends the resource
/// owner's user agent to:
/// `<auth_server>?response_type=code&client_id=<id>&redirect_uri=<uri>[&scope=<scope>][&state=<state>]`.
///
/// `scope` and `state` are appended only when present, in that order;
/// omitting them leaves no empty parameter and no dangling `&`.
/// `auth_server` is used verbatim as the base; all parameter values are
/// percent-encoded.
///
/// # Errors
/// Returns `InvalidArgument` if `auth_server` is empty, the config has no
/// redirect URI, or a present `scope`/`state` is empty; `AllocationFailed`
/// if the output buffer cannot be reserved.
pub fn build_authorization_url(
    config: &ClientConfig,
    auth_server: &str,
    scope: Option<&str>,
    state: Option<&str>,
) -> Result<String> {
    require_filled(auth_server, "auth_server")?;
    let redirect_uri = require_redirect_uri(config, "an authorization URL")?;
    let scope = validate_optional(scope, "scope")?;
    let state = validate_optional(state, "state")?;

    let mut pairs: Vec<Pair<'_>> = Vec::with_capacity(5);
    pairs.push((RESPONSE_TYPE, Cow::Borrowed(grants::RESPONSE_TYPE_CODE)));
    pairs.push((CLIENT_ID, encode(config.client_id())));
    pairs.push((REDIRECT_URI, encode(redirect_uri)));
    if let Some(scope) = scope {
        pairs.push((SCOPE, encode(scope)));
    }
    if let Some(state) = state {
        pairs.push((STATE, encode(state)));
    }

    assemble(auth_server, Some('?'), &pairs)
}

/// Builds the token-exchange body for an authorization code or a refresh
/// token:
/// `grant_type=<kind>&client_id=<id>&client_secret=<secret>&<code|refresh_token>=<token>&redirect_uri=<uri>`.
///
/// The `grant_type` value and the token parameter name both follow `grant`.
///
/// # Errors
/// Returns `InvalidArgument` if `token` is empty or the config has no
/// redirect URI; `AllocationFailed` if the output buffer cannot be reserved.
pub fn build_token_exchange_body(
    config: &ClientConfig,
    token: &str,
    grant: GrantKind,
) -> Result<String> {
    require_filled(token, "token value")?;
    let redirect_uri = require_redirect_uri(config, "a token exchange body")?;

    let pairs: [Pair<'_>; 5] = [
        (GRANT_TYPE, Cow::Borrowed(grant.grant_type())),
        (CLIENT_ID, encode(config.client_id())),
        (CLIENT_SECRET, encode(config.client_secret())),
        (grant.token_param(), encode(token)),
        (REDIRECT_URI, encode(redirect_uri)),
    ];

    assemble("", None, &pairs)
}

/// Builds the resource-owner-password-credentials body:
/// `grant_type=password&client_id=<id>&username=<username>&password=<password>`.
///
/// # Errors
/// Returns `InvalidArgument` if `username` or `password` is empty;
/// `AllocationFailed` if the output buffer cannot be reserved.
pub fn build_resource_owner_body(
    config: &ClientConfig,
    username: &str,
    password: &str,
) -> Result<String> {
    require_filled(username, "username")?;
    require_filled(password, "password")?;

    let pairs: [Pair<'_>; 4] = [
        (GRANT_TYPE, Cow::Borrowed(grants::PASSWORD)),
        (CLIENT_ID, encode(config.client_id())),
        (USERNAME, encode(username)),
        (PASSWORD, encode(password)),
    ];

    assemble("", None, &pairs)
}

/// Appends `&access_token=<auth_code>` to a caller-assembled body for an
/// authenticated resource request. `params` is passed through verbatim; the
/// appended token value is percent-encoded.
///
/// A `params` of `None` is the bodyless token-in-query variant, which this
/// crate does not support and reports as `NotImplemented` rather than
/// silently producing nothing.
///
/// # Errors
/// Returns `PreconditionFailed` if no auth code is set, `NotImplemented`
/// for `params: None`, `InvalidArgument` for a present-but-empty `params`,
/// and `AllocationFailed` if the output buffer cannot be reserved.
pub fn build_authenticated_request_body(
    config: &ClientConfig,
    params: Option<&str>,
) -> Result<String> {
    let auth_code = config.auth_code().ok_or_else(|| {
        Error::precondition_failed("auth_code must be set before building an authenticated request")
    })?;

    let Some(existing) = params else {
        return Err(Error::not_implemented(
            "bodyless authenticated requests (token in the query string) are not supported",
        ));
    };
    if existing.is_empty() {
        return Err(Error::invalid_argument("params must not be empty when present"));
    }

    let pairs: [Pair<'_>; 1] = [(ACCESS_TOKEN, encode(auth_code))];
    assemble(existing, Some('&'), &pairs)
}

/// Joins `prefix`, an optional lead character, and `key=value` pairs
/// separated by `&` into one owned string of exactly the computed length.
///
/// The required capacity is derived from the same pieces that get written,
/// then reserved fallibly before the first write.
fn assemble(prefix: &str, lead: Option<char>, pairs: &[Pair<'_>]) -> Result<String> {
    let mut required = prefix.len() + lead.map_or(0, char::len_utf8);
    for (index, (key, value)) in pairs.iter().enumerate() {
        if index > 0 {
            required += 1;
        }
        required += key.len() + 1 + value.len();
    }

    let mut out = String::new();
    out.try_reserve_exact(required)?;

    out.push_str(prefix);
    if let Some(lead) = lead {
        out.push(lead);
    }
    for (index, (key, value)) in pairs.iter().enumerate() {
        if index > 0 {
            out.push('&');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(value);
    }

    debug_assert_eq!(out.len(), required);
    Ok(out)
}

fn require_filled(value: &str, name: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_argument(format!("{name} must not be empty")));
    }
    Ok(())
}

fn require_redirect_uri<'a>(config: &'a ClientConfig, target: &str) -> Result<&'a str> {
    config.redirect_uri().ok_or_else(|| {
        Error::invalid_argument(format!("redirect_uri must be set before building {target}"))
    })
}

/// Rejects present-but-empty optional parameters; `None` passes through.
fn validate_optional<'a>(value: Option<&'a str>, name: &str) -> Result<Option<&'a str>> {
    match value {
        Some("") => Err(Error::invalid_argument(format!(
            "{name} must not be empty when present"
        ))),
        other => Ok(other),
    }
}
