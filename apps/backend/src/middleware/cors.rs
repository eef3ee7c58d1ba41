use std::env;

use actix_cors::Cors;
use actix_web::http::header;

const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Parse `CORS_ALLOWED_ORIGINS` (comma separated). Blank, `null` and
/// non-http(s) entries are dropped; nothing valid falls back to localhost.
pub fn allowed_origins(raw: &str) -> Vec<String> {
    let parsed: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    if parsed.is_empty() {
        DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        parsed
    }
}

pub fn cors_middleware() -> Cors {
    let origins = allowed_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::IF_MATCH,
            header::IF_NONE_MATCH,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::ETAG,
        ])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(&origin);
    }
    cors
}
