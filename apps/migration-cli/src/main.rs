use clap::Parser;
use migration::MigrationCommand;

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Hide-and-seek game document schema migrations")]
struct Args {
    /// up | down | fresh | reset | refresh | status
    command: String,

    /// SeaORM connection URL (sqlite://... or postgresql://...)
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let command = match args.command.parse::<MigrationCommand>() {
        Ok(command) => command,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    if args.database_url.contains(":memory:") {
        eprintln!("❌ In-memory SQLite is not supported here: the database would vanish when the command exits.");
        std::process::exit(2);
    }

    let db = match migration::connect(&args.database_url).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ Unable to connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&db, command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
