// ABOUTME: Transport seam between assembled requests and the HTTP layer
// ABOUTME: Transport trait, opaque TransportError, and the bundled reqwest implementation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Transport
//!
//! The flow layer hands a [`GrantRequest`] to a [`Transport`] and gets back
//! the raw response body or an opaque [`TransportError`]. HTTP status codes
//! are never inspected anywhere in this crate: a 4xx/5xx answer delivered
//! successfully is a normal body for the extractor to scan, and only
//! transport-level failures (connect, TLS, body read) become errors.
//!
//! [`HttpTransport`] is the bundled implementation over a shared
//! connection-pooled reqwest client. Anything else that can perform a
//! request — a sandboxed stub, a recording proxy — plugs in through the
//! trait; `MockTransport` under the `testing` feature is one such
//! implementation.

use crate::constants::transport::{
    CONTENT_TYPE, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS, FORM_URLENCODED,
};
use crate::models::{GrantRequest, HttpMethod};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;

/// Global shared HTTP client with default configuration
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Opaque failure from the transport layer.
///
/// Carries only a display message; the core neither interprets nor
/// classifies transport failures, and retrying them is the caller's call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Wraps a failure description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self::new(error.to_string())
    }
}

/// Performs a single HTTP request for the flow layer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Dispatches one request and returns the raw response body.
    ///
    /// Implementations must return the body for any response that was
    /// delivered, regardless of its status code.
    ///
    /// # Errors
    /// Returns `TransportError` for failures below the response-body level.
    async fn perform(&self, request: GrantRequest) -> Result<String, TransportError>;
}

/// Get or create the shared HTTP client with default settings
fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        ClientBuilder::new()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Bundled [`Transport`] over reqwest with rustls.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Uses the shared connection-pooled client (30 s request timeout,
    /// 10 s connect timeout).
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: shared_client().clone(),
        }
    }

    /// Wraps a caller-configured client (custom proxy, timeouts, TLS).
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(&self, request: GrantRequest) -> Result<String, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(request.url.as_str()),
            HttpMethod::Post => self.client.post(request.url.as_str()),
            HttpMethod::Put => self.client.put(request.url.as_str()),
        };

        let caller_sets_content_type = request.headers.as_ref().is_some_and(|headers| {
            headers
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE))
        });

        if let Some(headers) = &request.headers {
            for (name, value) in headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
        }
        if request.body.is_some() && !caller_sets_content_type {
            builder = builder.header(CONTENT_TYPE, FORM_URLENCODED);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        // Status deliberately unexamined: provider rejections arrive as
        // ordinary bodies for the extractor.
        Ok(response.text().await?)
    }
}
