//! Problem Details assertions, independent of backend types.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

const TYPE_PREFIX: &str = "https://hideseek.app/errors/";

/// Mirror of the backend's error body.
#[derive(Debug, Deserialize)]
pub struct ProblemDetailsLike {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Assert the error contract on raw response parts and return the parsed body.
///
/// Checks status, `application/problem+json`, `type` URL, and that the
/// `x-trace-id` header equals the body's `trace_id`.
pub fn assert_problem_details_from_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    assert_eq!(status, expected_status, "unexpected HTTP status");

    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "expected problem+json content type, got '{content_type}'"
    );

    let problem: ProblemDetailsLike =
        serde_json::from_slice(body).expect("Response body should be valid ProblemDetails JSON");

    let trace_id_header = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    assert_eq!(
        problem.trace_id, trace_id_header,
        "trace_id in body should match x-trace-id header"
    );

    assert_eq!(problem.code, expected_code);
    assert_eq!(problem.status, expected_status.as_u16());
    assert_eq!(problem.type_, format!("{TYPE_PREFIX}{expected_code}"));

    if let Some(expected_detail) = expected_detail_contains {
        assert!(
            problem.detail.contains(expected_detail),
            "Expected detail to contain '{expected_detail}', but got '{}'",
            problem.detail
        );
    }

    problem
}

/// Same contract, read from a `ServiceResponse` produced by `actix_web::test`.
pub async fn assert_problem_details_from_service_response(
    resp: actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) -> ProblemDetailsLike {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        expected_code,
        expected_status,
        expected_detail_contains,
    )
}
