use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// JSON logs on stdout. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,actix_web=info,sqlx=warn,sea_orm=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_ansi(false).json())
        .init();
}
