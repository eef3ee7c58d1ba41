use actix_web::{web, App, HttpServer};
use hideseek_backend::config::db::StoreConfig;
use hideseek_backend::config::game::GameConfig;
use hideseek_backend::config::settings::{GameSettings, ServerConfig};
use hideseek_backend::error::AppError;
use hideseek_backend::infra::state::build_state;
use hideseek_backend::middleware::cors::cors_middleware;
use hideseek_backend::middleware::request_trace::RequestTrace;
use hideseek_backend::middleware::structured_logger::StructuredLogger;
use hideseek_backend::routes;
use hideseek_backend::state::app_state::AppState;

mod telemetry;

async fn load() -> Result<(ServerConfig, AppState), AppError> {
    let server = ServerConfig::from_env()?;
    let state = build_state()
        .with_store_config(StoreConfig::from_env()?)
        .with_game_config(GameConfig::from_env()?)
        .with_settings(GameSettings::from_env()?)
        .build()
        .await?;
    Ok((server, state))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let (server, app_state) = match load().await {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("❌ Failed to start: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting HK Hide-and-Seek backend on http://{}:{} (store: {})",
        server.host,
        server.port,
        app_state.store().kind().as_str()
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
