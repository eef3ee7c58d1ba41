//! ETags for the shared game document.
//!
//! Format: `"state-v{version}"`. The same tag is accepted back in `If-Match`
//! for optimistic locking and in `If-None-Match` for conditional reads.

use crate::error::AppError;
use crate::errors::ErrorCode;

pub fn state_etag(version: i32) -> String {
    format!(r#""state-v{version}""#)
}

/// Parse the version out of a state ETag. Quotes and a weak `W/` prefix are
/// tolerated.
pub fn parse_state_version_from_etag(s: &str) -> Result<i32, AppError> {
    let s = s.trim();
    let s = s.strip_prefix("W/").unwrap_or(s).trim_matches('"');

    let version_str = s.strip_prefix("state-v").ok_or_else(|| {
        AppError::bad_request(
            ErrorCode::InvalidHeader,
            format!("Invalid ETag format: expected \"state-v{{version}}\", got: \"{s}\""),
        )
    })?;

    match version_str.parse::<i32>() {
        Ok(v) if v >= 0 => Ok(v),
        _ => Err(AppError::bad_request(
            ErrorCode::InvalidHeader,
            format!("Invalid ETag format: version must be a non-negative integer, got: \"{version_str}\""),
        )),
    }
}

/// True when an `If-None-Match` value covers `etag` (wildcard or list member).
///
/// Uses weak comparison: a `W/` prefix on either side is ignored.
pub fn if_none_match_covers(header: &str, etag: &str) -> bool {
    let wanted = opaque_tag(etag);
    header.trim() == "*"
        || header
            .split(',')
            .map(opaque_tag)
            .any(|tag| tag == wanted)
}

fn opaque_tag(tag: &str) -> &str {
    let tag = tag.trim();
    tag.strip_prefix("W/").unwrap_or(tag)
}
