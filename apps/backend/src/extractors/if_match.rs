use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::IF_MATCH;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::http::etag::parse_state_version_from_etag;

/// Expected document version from an optional `If-Match` header.
///
/// Absent header or `*` yields `None` (no precondition). Anything else must
/// be a state ETag or the request is rejected with `INVALID_HEADER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfMatch(pub Option<i32>);

impl IfMatch {
    pub fn expected(&self) -> Option<i32> {
        self.0
    }
}

impl FromRequest for IfMatch {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(parse(req))
    }
}

fn parse(req: &HttpRequest) -> Result<IfMatch, AppError> {
    let Some(raw) = req.headers().get(IF_MATCH) else {
        return Ok(IfMatch(None));
    };
    let value = raw.to_str().map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidHeader,
            "If-Match header is not valid ASCII".to_string(),
        )
    })?;

    if value.trim() == "*" {
        return Ok(IfMatch(None));
    }
    parse_state_version_from_etag(value).map(|v| IfMatch(Some(v)))
}
