// ABOUTME: Tolerant substring extraction of named string fields from response bodies
// ABOUTME: Token pair extraction plus provider error-state extraction, bounded by input length
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Response Extraction
//!
//! Providers answer token requests with loosely JSON-shaped bodies. Rather
//! than pulling in a JSON parser, extraction scans for the literal marker
//! `"<field>" : "` (exact spacing) and takes everything up to the next
//! unescaped quote. That tolerance is deliberate: unknown surrounding
//! structure is ignored, an absent field is simply absent, and only a
//! located-but-unterminated value is an error.
//!
//! Extractors are pure functions over `&str`; every scan is bounded by the
//! input length.

use crate::constants::fields;
use crate::errors::{Error, Result};
use crate::models::{ErrorCode, ErrorState, TokenPair};
use tracing::warn;

/// Extracts one named string field from a response body.
///
/// Searches for `"<field>" : "` (exact spacing — provider formatting that
/// deviates from this yields an absent field, not an error); the value runs
/// from just after the marker to the next unescaped `"`. The first marker
/// occurrence wins. Escape sequences inside the value are preserved
/// verbatim.
///
/// # Errors
/// Returns `MalformedResponse` if the marker is found but no closing quote
/// exists before end of input.
pub fn extract_field(body: &str, field: &str) -> Result<Option<String>> {
    let marker = format!("\"{field}\" : \"");
    let Some(found) = body.find(&marker) else {
        return Ok(None);
    };

    let tail = &body[found + marker.len()..];
    match find_unescaped_quote(tail) {
        Some(end) => Ok(Some(tail[..end].to_owned())),
        None => Err(Error::malformed_response(format!(
            "value of \"{field}\" has no closing quote before end of input"
        ))),
    }
}

/// Extracts `access_token` and `refresh_token` from a response body.
///
/// Either field may be absent; that is a successful partial result, not an
/// error. A rejected exchange typically yields an empty pair — the
/// rejection itself is visible via [`extract_error_state`].
///
/// # Errors
/// Returns `MalformedResponse` if a located value has no closing quote.
pub fn extract_tokens(body: &str) -> Result<TokenPair> {
    Ok(TokenPair {
        access_token: extract_field(body, fields::ACCESS_TOKEN)?,
        refresh_token: extract_field(body, fields::REFRESH_TOKEN)?,
    })
}

/// Extracts the provider error fields (`error`, `error_description`,
/// `error_uri`, `state`) from a response body.
///
/// Returns `Ok(None)` when the body carries no `error` field. Unrecognized
/// error codes are kept as [`ErrorCode::Unrecognized`] and logged.
///
/// # Errors
/// Returns `MalformedResponse` if a located value has no closing quote.
pub fn extract_error_state(body: &str) -> Result<Option<ErrorState>> {
    let Some(raw_code) = extract_field(body, fields::ERROR)? else {
        return Ok(None);
    };

    let code = ErrorCode::parse(&raw_code);
    if code == ErrorCode::Unrecognized {
        warn!(code = %raw_code, "Provider sent an unrecognized error code");
    }

    let description = extract_field(body, fields::ERROR_DESCRIPTION)?;
    let uri = extract_field(body, fields::ERROR_URI)?;
    let state = extract_field(body, fields::STATE)?;
    Ok(Some(ErrorState::provider(code, description, uri, state)))
}

/// Byte offset of the first `"` in `input` that is not escaped by an odd
/// run of preceding backslashes; `None` if the input ends first.
fn find_unescaped_quote(input: &str) -> Option<usize> {
    let mut backslashes = 0usize;
    for (index, byte) in input.bytes().enumerate() {
        match byte {
            b'\\' => backslashes += 1,
            b'"' if backslashes % 2 == 0 => return Some(index),
            _ => backslashes = 0,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_spacing_is_exact() {
        // Compact formatting does not match the documented marker.
        assert_eq!(
            extract_field(r#"{"access_token":"abc"}"#, "access_token").unwrap(),
            None
        );
        assert_eq!(
            extract_field(r#"{"access_token" : "abc"}"#, "access_token").unwrap(),
            Some("abc".to_owned())
        );
    }

    #[test]
    fn test_first_marker_occurrence_wins() {
        let body = r#"{"state" : "first", "state" : "second"}"#;
        assert_eq!(
            extract_field(body, "state").unwrap(),
            Some("first".to_owned())
        );
    }

    #[test]
    fn test_escaped_quote_does_not_terminate() {
        let body = r#"{"access_token" : "ab\"cd"}"#;
        assert_eq!(
            extract_field(body, "access_token").unwrap(),
            Some(r#"ab\"cd"#.to_owned())
        );
    }

    #[test]
    fn test_even_backslash_run_terminates() {
        // Two backslashes are an escaped backslash; the quote after them
        // ends the value.
        let body = r#"{"access_token" : "ab\\"}"#;
        assert_eq!(
            extract_field(body, "access_token").unwrap(),
            Some(r"ab\\".to_owned())
        );
    }

    #[test]
    fn test_find_unescaped_quote_bounds() {
        assert_eq!(find_unescaped_quote(r#"abc"rest"#), Some(3));
        assert_eq!(find_unescaped_quote(r#"ab\"cd"e"#), Some(6));
        assert_eq!(find_unescaped_quote("no quote at all"), None);
        assert_eq!(find_unescaped_quote(""), None);
    }

    #[test]
    fn test_unterminated_value_is_malformed() {
        let err = extract_field(r#"{"access_token" : "abc"#, "access_token").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }
}
