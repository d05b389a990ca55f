// ABOUTME: Integration tests for ClientConfig lifecycle and environment loading
// ABOUTME: Validates identity checks, setter replacement, the last-error slot, and secret redaction
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use oauth2_kit::{ClientConfig, Error, ErrorCode, ErrorState};
use serial_test::serial;

mod common;

// Construction and accessors

#[test]
fn test_new_rejects_empty_identity() {
    assert!(matches!(
        ClientConfig::new("", "secret"),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        ClientConfig::new("client-42", ""),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_new_config_starts_bare() {
    let config = ClientConfig::new("client-42", "hunter2-secret").unwrap();
    assert_eq!(config.client_id(), "client-42");
    assert_eq!(config.client_secret(), "hunter2-secret");
    assert_eq!(config.redirect_uri(), None);
    assert_eq!(config.auth_code(), None);
    assert!(config.last_error().is_clear());
}

// Setters

#[test]
fn test_setters_replace_previous_values() {
    let mut config = common::create_test_config().unwrap();
    assert_eq!(
        config.redirect_uri(),
        Some("https://app.example.com/callback")
    );

    config
        .set_redirect_uri("https://app.example.com/other")
        .unwrap();
    assert_eq!(config.redirect_uri(), Some("https://app.example.com/other"));

    config.set_auth_code("tok-1").unwrap();
    config.set_auth_code("tok-2").unwrap();
    assert_eq!(config.auth_code(), Some("tok-2"));
}

#[test]
fn test_setter_failure_keeps_previous_value() {
    let mut config = common::create_test_config().unwrap();
    config.set_auth_code("tok-1").unwrap();

    assert!(matches!(
        config.set_redirect_uri(""),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        config.set_auth_code(""),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(
        config.redirect_uri(),
        Some("https://app.example.com/callback")
    );
    assert_eq!(config.auth_code(), Some("tok-1"));
}

// Last-error slot

#[test]
fn test_last_error_slot_is_caller_controlled() {
    let mut config = common::create_test_config().unwrap();
    assert!(config.last_error().is_clear());

    config.set_last_error(ErrorState::provider(
        ErrorCode::InvalidScope,
        Some("scope not granted".into()),
        None,
        None,
    ));
    assert_eq!(config.last_error().code(), ErrorCode::InvalidScope);
    assert_eq!(config.last_error().description(), Some("scope not granted"));

    config.clear_last_error();
    assert!(config.last_error().is_clear());
    assert_eq!(config.last_error(), &ErrorState::none());
}

#[test]
fn test_clones_do_not_share_state() {
    let mut config = common::create_test_config().unwrap();
    let snapshot = config.clone();

    config.set_auth_code("tok-1").unwrap();
    config.set_last_error(ErrorState::provider(
        ErrorCode::ServerError,
        None,
        None,
        None,
    ));

    assert_eq!(snapshot.auth_code(), None);
    assert!(snapshot.last_error().is_clear());
}

// Secret handling

#[test]
fn test_secret_fingerprint_is_stable_and_short() {
    let config = ClientConfig::new("client-42", "hunter2-secret").unwrap();
    let fingerprint = config.secret_fingerprint();

    assert_eq!(fingerprint.len(), 8);
    assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(fingerprint, config.secret_fingerprint());

    let other = ClientConfig::new("client-42", "another-secret").unwrap();
    assert_ne!(fingerprint, other.secret_fingerprint());
}

#[test]
fn test_debug_output_redacts_secret_material() {
    let mut config = ClientConfig::new("client-42", "hunter2-secret").unwrap();
    config.set_auth_code("tok-77").unwrap();

    let rendered = format!("{config:?}");
    assert!(!rendered.contains("hunter2-secret"));
    assert!(!rendered.contains("tok-77"));
    assert!(rendered.contains("fingerprint:"));
    assert!(rendered.contains("<set>"));
}

// Environment loading

#[test]
#[serial]
fn test_from_env_loads_full_configuration() {
    std::env::set_var("OAUTH2_CLIENT_ID", "env-client");
    std::env::set_var("OAUTH2_CLIENT_SECRET", "env-secret");
    std::env::set_var("OAUTH2_REDIRECT_URI", "https://app.example.com/env-cb");

    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.client_id(), "env-client");
    assert_eq!(config.client_secret(), "env-secret");
    assert_eq!(
        config.redirect_uri(),
        Some("https://app.example.com/env-cb")
    );

    std::env::remove_var("OAUTH2_CLIENT_ID");
    std::env::remove_var("OAUTH2_CLIENT_SECRET");
    std::env::remove_var("OAUTH2_REDIRECT_URI");
}

#[test]
#[serial]
fn test_from_env_treats_empty_redirect_as_unset() {
    std::env::set_var("OAUTH2_CLIENT_ID", "env-client");
    std::env::set_var("OAUTH2_CLIENT_SECRET", "env-secret");
    std::env::set_var("OAUTH2_REDIRECT_URI", "");

    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.redirect_uri(), None);

    std::env::remove_var("OAUTH2_CLIENT_ID");
    std::env::remove_var("OAUTH2_CLIENT_SECRET");
    std::env::remove_var("OAUTH2_REDIRECT_URI");
}

#[test]
#[serial]
fn test_from_env_requires_identity_variables() {
    std::env::remove_var("OAUTH2_CLIENT_ID");
    std::env::remove_var("OAUTH2_CLIENT_SECRET");
    std::env::remove_var("OAUTH2_REDIRECT_URI");

    assert!(matches!(
        ClientConfig::from_env(),
        Err(Error::InvalidArgument(_))
    ));

    std::env::set_var("OAUTH2_CLIENT_ID", "env-client");
    std::env::set_var("OAUTH2_CLIENT_SECRET", "");
    assert!(matches!(
        ClientConfig::from_env(),
        Err(Error::InvalidArgument(_))
    ));

    std::env::remove_var("OAUTH2_CLIENT_ID");
    std::env::remove_var("OAUTH2_CLIENT_SECRET");
}
