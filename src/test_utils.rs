// ABOUTME: Test doubles and response-body fixtures shared by unit and integration tests
// ABOUTME: MockTransport scripts transport outcomes and records every dispatched request
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Test utilities
//!
//! Compiled for this crate's own tests and, behind the `testing` feature,
//! for downstream suites and the bundled demos. [`MockTransport`] stands in
//! for the HTTP layer: outcomes are scripted up front and every request the
//! flows dispatch is recorded for assertion. The fixture builders produce
//! bodies in the provider format the extractor scans, including its exact
//! `"field" : "value"` spacing.

use crate::config::ClientConfig;
use crate::constants::fields;
use crate::models::GrantRequest;
use crate::transport::{Transport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Scripted [`Transport`] for tests: pops one queued outcome per request
/// and records what was dispatched.
///
/// An empty queue yields a `TransportError`, so a flow that dispatches more
/// requests than the test scripted fails loudly instead of hanging.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<std::result::Result<String, TransportError>>>,
    requests: Mutex<Vec<GrantRequest>>,
}

impl MockTransport {
    /// A mock with nothing scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock scripted with a single successful response body.
    #[must_use]
    pub fn with_response(body: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from([Ok(body.into())])),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues a successful response body.
    pub async fn push_response(&self, body: impl Into<String>) {
        self.responses.lock().await.push_back(Ok(body.into()));
    }

    /// Queues a transport failure.
    pub async fn push_error(&self, error: TransportError) {
        self.responses.lock().await.push_back(Err(error));
    }

    /// Every request dispatched so far, in order.
    pub async fn requests(&self) -> Vec<GrantRequest> {
        self.requests.lock().await.clone()
    }

    /// The most recently dispatched request, if any.
    pub async fn last_request(&self) -> Option<GrantRequest> {
        self.requests.lock().await.last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn perform(&self, request: GrantRequest) -> std::result::Result<String, TransportError> {
        self.requests.lock().await.push(request);
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no scripted response left")))
    }
}

/// A config with placeholder credentials and a redirect URI already set.
///
/// # Errors
/// Propagates construction failures; none occur for these fixed values.
pub fn test_config() -> crate::errors::Result<ClientConfig> {
    let mut config = ClientConfig::new("test-client-id", "test-client-secret")?;
    config.set_redirect_uri("https://app.example.com/callback")?;
    Ok(config)
}

/// A provider token response carrying `access_token` and optionally
/// `refresh_token`, in the spaced field format the extractor scans.
#[must_use]
pub fn token_response_body(access_token: &str, refresh_token: Option<&str>) -> String {
    let mut body = format!("{{\"{}\" : \"{access_token}\"", fields::ACCESS_TOKEN);
    if let Some(refresh) = refresh_token {
        body.push_str(&format!(", \"{}\" : \"{refresh}\"", fields::REFRESH_TOKEN));
    }
    body.push('}');
    body
}

/// A provider error response carrying `error` and optionally
/// `error_description`, in the spaced field format the extractor scans.
#[must_use]
pub fn error_response_body(code: &str, description: Option<&str>) -> String {
    let mut body = format!("{{\"{}\" : \"{code}\"", fields::ERROR);
    if let Some(description) = description {
        body.push_str(&format!(
            ", \"{}\" : \"{description}\"",
            fields::ERROR_DESCRIPTION
        ));
    }
    body.push('}');
    body
}
