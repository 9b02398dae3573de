//! Aduan server entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use aduan_api::{health_router, middleware::AppState, router as api_router};
use aduan_common::Config;
use aduan_core::{ComplaintService, UserService};
use aduan_db::repositories::{ComplaintRepository, UserRepository};
use axum::{Router, extract::DefaultBodyLimit, middleware};
use tokio::signal;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Largest accepted request body. Complaints are plain text.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// Install the global subscriber, as JSON lines when configured.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aduan=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first so the log format can follow it
    let config = Config::load()?;
    init_tracing(config.logging.json);

    info!("Starting aduan server...");

    // Connect to database
    let db = Arc::new(aduan_db::init(&config).await?);
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    aduan_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let complaint_repo = ComplaintRepository::new(Arc::clone(&db));
    let user_repo = UserRepository::new(Arc::clone(&db));

    // Initialize services
    let complaint_service = ComplaintService::new(complaint_repo, &config.listing);
    let user_service = UserService::new(user_repo);

    if let Some(admin) = &config.admin {
        let user = user_service.ensure_admin(admin).await?;
        info!(email = %user.email, "Administrator account ready");
    } else {
        tracing::warn!("No [admin] section configured; nobody can sign in to the dashboard");
    }

    let state = AppState {
        complaint_service,
        user_service,
    };

    // Build router
    let app = Router::new()
        .merge(health_router())
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            aduan_api::middleware::auth_middleware,
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let ip: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(ip, config.server.port);
    info!(url = %config.server.url, "Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
