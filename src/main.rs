use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use academic_connector::config::{AppConfig, LoggingConfig};
use academic_connector::database::{DatabaseManager, MySqlExecutor};
use academic_connector::{app, AppState};

#[derive(Parser)]
#[command(name = "academic-connector")]
#[command(about = "Read-only REST connector over academic records")]
#[command(version)]
struct Cli {
    #[arg(long, env = "ENV_FILE", help = "Env file to load before reading the environment (default: app.env)")]
    env_file: Option<PathBuf>,

    #[arg(long, help = "Port to listen on, overriding APP_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.env_file.as_deref()).context("failed to load configuration")?;
    if let Some(port) = cli.port {
        config.app.port = port;
    }

    init_tracing(&config.logging);
    tracing::info!(
        environment = ?config.environment,
        locale = %config.app.locale,
        instance_mode = %config.app.default_instance_mode,
        unflatten_mode = %config.unflatten.mode,
        "Starting {}",
        config.app.name
    );

    if config.is_production() && config.security.cors_origins.is_empty() {
        tracing::warn!("SECURITY_CORS_ORIGINS is empty, allowing any origin");
    }

    let pool = DatabaseManager::connect(&config.database).await.context("failed to connect to MySQL")?;
    let executor = Arc::new(MySqlExecutor::new(pool.clone(), &config.database));

    let bind_addr = config.bind_address();
    let state = AppState::new(config, executor);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` wins over `LOG_LEVEL` when set.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
