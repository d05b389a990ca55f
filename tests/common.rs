// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides a scripted transport, config fixtures, and response-body builders
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::wildcard_in_or_patterns,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]
//! Shared test utilities for `oauth2_kit`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use async_trait::async_trait;
use oauth2_kit::{ClientConfig, GrantRequest, Result, Transport, TransportError};
use std::collections::VecDeque;
use std::sync::Once;
use tokio::sync::Mutex;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

#[derive(Default)]
struct ScriptedState {
    scripted: VecDeque<std::result::Result<String, TransportError>>,
    dispatched: Vec<GrantRequest>,
}

/// Transport double for flow tests: plays back scripted outcomes in order
/// and records every request the client dispatches.
#[derive(Default)]
pub struct ScriptedTransport {
    state: Mutex<ScriptedState>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response body
    pub async fn script_response(&self, body: impl Into<String>) {
        self.state.lock().await.scripted.push_back(Ok(body.into()));
    }

    /// Queue a transport-level failure
    pub async fn script_error(&self, message: &str) {
        self.state
            .lock()
            .await
            .scripted
            .push_back(Err(TransportError::new(message)));
    }

    /// Requests dispatched so far, oldest first
    pub async fn dispatched(&self) -> Vec<GrantRequest> {
        self.state.lock().await.dispatched.clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn perform(&self, request: GrantRequest) -> std::result::Result<String, TransportError> {
        let mut state = self.state.lock().await;
        state.dispatched.push(request);
        state
            .scripted
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("test scripted no further outcomes")))
    }
}

/// Standard test config: placeholder identity plus a registered redirect URI
pub fn create_test_config() -> Result<ClientConfig> {
    init_test_logging();
    let mut config = ClientConfig::new("client-42", "hunter2-secret")?;
    config.set_redirect_uri("https://app.example.com/callback")?;
    Ok(config)
}

/// Provider token response in the spaced field format the extractor scans
pub fn token_body(access_token: &str, refresh_token: Option<&str>) -> String {
    refresh_token.map_or_else(
        || format!("{{\"access_token\" : \"{access_token}\"}}"),
        |refresh| {
            format!(
                "{{\"access_token\" : \"{access_token}\", \"refresh_token\" : \"{refresh}\"}}"
            )
        },
    )
}

/// Provider error response in the spaced field format the extractor scans
pub fn error_body(code: &str, description: Option<&str>) -> String {
    description.map_or_else(
        || format!("{{\"error\" : \"{code}\"}}"),
        |description| {
            format!(
                "{{\"error\" : \"{code}\", \"error_description\" : \"{description}\"}}"
            )
        },
    )
}
