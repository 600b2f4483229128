//! Nutrition Tracker Backend
//!
//! Serves daily energy metrics and weight goals over HTTP.

use anyhow::{Context, Result};
use nutrition_tracker_backend::config::AppConfig;
use nutrition_tracker_backend::{db, routes, state::AppState};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let production = AppConfig::is_production();
    init_tracing(production);

    let config = AppConfig::load().context("loading configuration")?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        production, "Starting Nutrition Tracker Backend"
    );

    if production {
        check_production_config(&config)?;
    }

    let pool = db::create_pool(&config.database)
        .await
        .context("connecting to the database")?;
    if production {
        info!("Skipping migrations; they run as a release step in production");
    } else {
        db::run_migrations(&pool).await?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Listening");

    let app = routes::create_router(AppState::new(pool, config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Stopped");
    Ok(())
}

/// JSON lines in production, human-readable output otherwise
fn init_tracing(production: bool) {
    let default_filter = if production {
        "nutrition_tracker_backend=info,tower_http=info"
    } else {
        "nutrition_tracker_backend=debug,tower_http=debug,sqlx=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);

    if production {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

fn check_production_config(config: &AppConfig) -> Result<()> {
    if config.database.url.contains("localhost") {
        warn!("Production database URL points at localhost");
    }

    let issues = config.production_issues();
    for issue in &issues {
        error!(%issue, "Unsafe production configuration");
    }
    if !issues.is_empty() {
        anyhow::bail!("refusing to start with {} configuration issue(s)", issues.len());
    }
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Could not listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Could not listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("Interrupted, shutting down"),
        _ = terminate => info!("Terminated, shutting down"),
    }
}
