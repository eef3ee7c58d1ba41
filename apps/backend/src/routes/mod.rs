use actix_web::web;

pub mod game;
pub mod health;
pub mod realtime;

/// Register every route. `main.rs` and the test app builder share this so
/// tests exercise the same paths; middleware is wrapped by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));

    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Game routes: /api/game/**
    cfg.service(web::scope("/api/game").configure(game::configure_routes));

    // Realtime routes: /api/ws
    cfg.service(web::scope("/api/ws").configure(realtime::configure_routes));
}
