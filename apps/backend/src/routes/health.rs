use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;

pub async fn root() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().body("HK Hide-and-Seek backend"))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    store: &'static str,
    store_status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    store_error: Option<String>,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let store = app_state.store();
    let (store_status, store_error) = match store.ping().await {
        Ok(()) => ("ok", None),
        Err(e) => ("error", Some(e.to_string())),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        store: store.kind().as_str(),
        store_status,
        store_error,
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(health)));
}
