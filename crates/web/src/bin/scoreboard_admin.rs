use clap::{Parser, Subcommand};
use storage::{
    Database,
    repository::session::SessionRepository,
    services::{admin_auth, standings},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scoreboard-admin")]
#[command(about = "Scoreboard maintenance tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Set an admin's password, creating the admin if needed
    ResetPassword {
        #[arg(long, default_value = "admin")]
        username: String,

        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Recompute every department's total points and rank
    Recalculate,
    /// Delete expired admin sessions
    PurgeSessions,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scoreboard_admin=info,storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = Database::new(&cli.database_url).await?;
    db.run_migrations().await?;

    match cli.command {
        Commands::ResetPassword { username, password } => {
            anyhow::ensure!(!password.is_empty(), "password must not be empty");
            let admin = admin_auth::reset_password(db.pool(), &username, &password).await?;
            tracing::info!(admin_id = admin.id, "Password updated for '{}'", admin.username);
        }
        Commands::Recalculate => {
            let departments = standings::recalculate_standings(db.pool()).await?;
            for department in &departments {
                println!(
                    "{:>3}. {:<40} {:>6}",
                    department.rank, department.name, department.total_points
                );
            }
            tracing::info!(departments = departments.len(), "Standings recalculated");
        }
        Commands::PurgeSessions => {
            let purged = SessionRepository::new(db.pool()).purge_expired().await?;
            tracing::info!(purged, "Expired sessions removed");
        }
    }

    Ok(())
}
