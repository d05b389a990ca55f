// ABOUTME: Main library entry point for the oauth2-kit client toolkit
// ABOUTME: Request builders, token extraction, and async client flows over a pluggable transport
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # oauth2-kit
//!
//! A minimal `OAuth2` client toolkit: assemble the client-role requests of
//! RFC 6749, hand them to a pluggable async transport, and pull tokens and
//! provider errors back out of the response bodies.
//!
//! ## Features
//!
//! - **Request builders**: authorization URL, code/refresh token exchange,
//!   resource-owner password grant, and token-bearing resource requests,
//!   all with percent-encoded values and exact-capacity assembly
//! - **Response extraction**: tolerant field scanning that distinguishes
//!   absent fields from malformed ones
//! - **Pluggable transport**: the bundled reqwest/rustls transport or any
//!   `Transport` implementation; HTTP status codes are never interpreted
//! - **Explicit errors**: every failure is a typed `Result`, and provider
//!   rejections land in a caller-visible last-error slot
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use oauth2_kit::{ClientConfig, OAuth2Client, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut config = ClientConfig::new("my-client-id", "my-client-secret")?;
//!     config.set_redirect_uri("https://app.example.com/callback")?;
//!
//!     let client = OAuth2Client::new();
//!     let url = client.authorization_url(
//!         &config,
//!         "https://provider.example.com/authorize",
//!         Some("profile"),
//!         Some("xyz-state"),
//!     )?;
//!     println!("send the resource owner to: {url}");
//!
//!     let tokens = client
//!         .exchange_code(&mut config, "https://provider.example.com/token", "the-code")
//!         .await?;
//!     println!("access token present: {}", tokens.access_token.is_some());
//!
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────

/// `OAuth2` client flows tying builders, transport, and extraction together
pub mod client;

/// Client identity, redirect URI, auth code, and the last-error slot
pub mod config;

/// Protocol parameter names, grant types, field names, and transport defaults
pub mod constants;

/// Unified error handling with typed failure variants
pub mod errors;

/// Wire-level data types: methods, requests, token pairs, error states
pub mod models;

/// Pure request-assembly functions for every supported grant shape
pub mod request;

/// Field scanning over provider response bodies
pub mod response;

/// The `Transport` seam and the bundled reqwest implementation
pub mod transport;

/// Scripted transport and response fixtures for tests and demos
#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

// Re-export key types for convenience

pub use client::OAuth2Client;
pub use config::ClientConfig;
pub use errors::{Error, Result};
pub use models::{ErrorCode, ErrorState, GrantKind, GrantRequest, HttpMethod, TokenPair};
pub use transport::{HttpTransport, Transport, TransportError};
