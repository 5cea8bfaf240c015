//! ETag helpers for optimistic concurrency control.
//!
//! This module provides utilities for generating and parsing ETags for games,
//! enabling HTTP-native optimistic locking via ETag/If-Match headers.

use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Generate an ETag for a game resource.
///
/// Format: `"game-{id}-v{version}"` (with quotes, as required by HTTP spec)
pub fn game_etag(id: Uuid, version: i32) -> String {
    format!(r#""game-{id}-v{version}""#)
}

/// Parse the lock version from a game ETag value.
///
/// Accepts ETags in the format `"game-{id}-v{version}"` and extracts the
/// version number.
///
/// # Errors
/// Returns `AppError::bad_request` with `ErrorCode::InvalidHeader` if:
/// - The ETag is missing or malformed
/// - The version cannot be parsed as i32
pub fn parse_game_version_from_etag(s: &str) -> Result<i32, AppError> {
    // Remove quotes if present
    let s = s.trim_matches('"');

    // Expected format: game-{id}-v{version}
    // We need to extract the version after the last "-v"
    let version_prefix = "-v";
    let version_start = s
        .rfind(version_prefix)
        .ok_or_else(|| {
            AppError::bad_request(
                ErrorCode::InvalidHeader,
                format!("Invalid ETag format: missing version marker. Expected format: \"game-{{id}}-v{{version}}\", got: \"{s}\""),
            )
        })?
        + version_prefix.len();

    let version_str = &s[version_start..];
    version_str.parse::<i32>().map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidHeader,
            format!("Invalid ETag format: version must be a valid integer, got: \"{version_str}\""),
        )
    })
}
