// ABOUTME: Typed error model shared by every builder, extractor, and flow
// ABOUTME: Defines the crate-wide Error enum and Result alias
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Error Model
//!
//! Every fallible operation in this crate returns [`Result`]. Errors are
//! returned to the immediate caller and never retried internally; retry
//! policy for transient transport failures belongs to the caller.
//!
//! Provider-side rejections (an `error` field in a response body) are not
//! values of [`Error`] — they are protocol data, surfaced as
//! [`crate::models::ErrorState`] on the [`crate::config::ClientConfig`]
//! that made the request.

use crate::transport::TransportError;
use std::collections::TryReserveError;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by request construction, response extraction, and the
/// flow layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A required input was missing or empty.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was invoked before the config state it needs was set.
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// A string buffer could not reserve the capacity it computed.
    #[error("Allocation failed: {0}")]
    AllocationFailed(#[from] TryReserveError),

    /// Opaque failure from the transport layer, passed through uninterpreted.
    #[error("Transport request failed: {0}")]
    Transport(#[from] TransportError),

    /// A located response field had no terminator before end of input.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The operation is deliberately unsupported.
    #[error("Not implemented: {0}")]
    NotImplemented(String),
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn precondition_failed(message: impl Into<String>) -> Self {
        Self::PreconditionFailed(message.into())
    }

    pub(crate) fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub(crate) fn not_implemented(message: impl Into<String>) -> Self {
        Self::NotImplemented(message.into())
    }
}
