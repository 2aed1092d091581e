use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use merch_store::auth::TokenIssuer;
use merch_store::config::AppConfig;
use merch_store::database::Database;
use merch_store::AppState;

#[derive(Parser)]
#[command(name = "merch-store")]
#[command(about = "Merch store API server")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides MERCH_API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, help = "PostgreSQL connection URL (overrides DATABASE_URL)")]
    database_url: Option<String>,

    #[arg(long, help = "Do not create missing tables on start-up")]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("merch_store=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url = url;
    }
    if args.skip_migrations {
        config.database.run_migrations = false;
    }
    config.validate()?;

    tracing::info!("Starting merch store in {:?} mode", config.environment);
    tracing::info!("Connecting to database at {}", config.redacted_database_url());

    let database = Database::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    if config.database.run_migrations {
        database.migrate().await.context("failed to run migrations")?;
    }

    let tokens = TokenIssuer::from_config(&config.security)?;
    let state = AppState::new(database, tokens, &config);
    let app = merch_store::app(state, config.security.enable_cors);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Merch store listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
