use anyhow::Context;
use scoreboard::{
    config::Config,
    images,
    state::{AppState, SessionSettings},
};
use storage::{Database, repository::admin::AdminRepository, services::admin_auth};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting scoreboard API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    bootstrap_admin(&db, &config)
        .await
        .context("Failed to bootstrap admin account")?;

    let state = AppState::new(
        db,
        images::from_config(&config),
        SessionSettings::from(&config),
    );
    let app = scoreboard::app(state, &config.upload_dir);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn bootstrap_admin(db: &Database, config: &Config) -> anyhow::Result<()> {
    match &config.admin_password {
        Some(password) => {
            if admin_auth::ensure_admin(db.pool(), &config.admin_username, password).await? {
                tracing::info!("Created admin account '{}'", config.admin_username);
            }
        }
        None => {
            if AdminRepository::new(db.pool()).count().await? == 0 {
                tracing::warn!(
                    "No admin account exists; set ADMIN_PASSWORD or run `scoreboard-admin reset-password`"
                );
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
