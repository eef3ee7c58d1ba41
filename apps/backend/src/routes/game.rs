//! Game HTTP routes.
//!
//! Reads go through a point read of the store; mutations answer with the new
//! document and its ETag. All mutations accept an optional `If-Match`.

use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::state::GameState;
use crate::domain::view::{project, ChallengeFilter};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{IfMatch, ValidatedJson};
use crate::http::etag::{if_none_match_covers, state_etag};
use crate::services::game_controller::MutationOutcome;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct StateResponse<'a> {
    version: i32,
    state: &'a GameState,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MoveRequest {
    player: String,
    destination: String,
}

#[derive(Debug, Deserialize)]
struct ViewQuery {
    filter: Option<String>,
}

#[derive(Debug, Serialize)]
struct StationEntry<'a> {
    name: &'a str,
    neighbors: &'a [String],
}

#[derive(Debug, Serialize)]
struct StationsResponse<'a> {
    start_station: &'a str,
    stations: Vec<StationEntry<'a>>,
}

/// 304 with the ETag when `If-None-Match` already covers it.
fn not_modified(req: &HttpRequest, etag: &str) -> Option<HttpResponse> {
    let header = req.headers().get(IF_NONE_MATCH)?.to_str().ok()?;
    if_none_match_covers(header, etag).then(|| {
        HttpResponse::build(StatusCode::NOT_MODIFIED)
            .insert_header((ETAG, etag.to_string()))
            .finish()
    })
}

fn mutation_response(outcome: &MutationOutcome) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((ETAG, state_etag(outcome.version())))
        .json(StateResponse {
            version: outcome.version(),
            state: &outcome.state,
        })
}

/// GET /api/game/state
async fn get_state(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let current = app_state.controller.current().await?;
    let etag = state_etag(current.version);
    if let Some(resp) = not_modified(&req, &etag) {
        return Ok(resp);
    }

    Ok(HttpResponse::Ok()
        .insert_header((ETAG, etag))
        .json(StateResponse {
            version: current.version,
            state: &current.state,
        }))
}

/// GET /api/game/view?filter=all|done|notdone
async fn get_view(
    req: HttpRequest,
    query: web::Query<ViewQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let filter = match query.filter.as_deref() {
        Some(raw) => raw.parse::<ChallengeFilter>()?,
        None => ChallengeFilter::All,
    };

    let current = app_state.controller.current().await?;
    let etag = state_etag(current.version);
    if let Some(resp) = not_modified(&req, &etag) {
        return Ok(resp);
    }

    let view = project(&current.state, current.version, app_state.setup(), filter);
    Ok(HttpResponse::Ok().insert_header((ETAG, etag)).json(view))
}

/// GET /api/game/stations
async fn get_stations(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let setup = app_state.setup();
    let stations = setup
        .graph()
        .adjacency()
        .map(|(name, neighbors)| StationEntry { name, neighbors })
        .collect();

    Ok(HttpResponse::Ok().json(StationsResponse {
        start_station: setup.start_station(),
        stations,
    }))
}

/// POST /api/game/assign-teams
async fn assign_teams(
    if_match: IfMatch,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = app_state
        .controller
        .assign_teams(if_match.expected())
        .await?;
    Ok(mutation_response(&outcome))
}

/// POST /api/game/moves
async fn move_player(
    if_match: IfMatch,
    body: ValidatedJson<MoveRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = app_state
        .controller
        .move_player(&body.player, &body.destination, if_match.expected())
        .await?;
    Ok(mutation_response(&outcome))
}

/// POST /api/game/challenges/{index}/toggle
async fn toggle_challenge(
    path: web::Path<String>,
    if_match: IfMatch,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();
    let index = raw.parse::<usize>().map_err(|_| {
        AppError::bad_request(
            ErrorCode::BadRequest,
            format!("Challenge index must be a non-negative integer, got '{raw}'"),
        )
    })?;

    let outcome = app_state
        .controller
        .toggle_challenge(index, if_match.expected())
        .await?;
    Ok(mutation_response(&outcome))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/state").route(web::get().to(get_state)))
        .service(web::resource("/view").route(web::get().to(get_view)))
        .service(web::resource("/stations").route(web::get().to(get_stations)))
        .service(web::resource("/assign-teams").route(web::post().to(assign_teams)))
        .service(web::resource("/moves").route(web::post().to(move_player)))
        .service(
            web::resource("/challenges/{index}/toggle").route(web::post().to(toggle_challenge)),
        );
}
