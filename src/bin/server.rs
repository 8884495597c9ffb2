//! Gatherly REST Server
//!
//! Serves the activities and values resources over HTTP/JSON, persisted in
//! SQLite.
//!
//! # Configuration
//!
//! Environment variables:
//! - `GATHERLY_PORT`: Port to listen on (default: 5000)
//! - `GATHERLY_DATABASE_PATH`: SQLite database file
//!   (default: <data dir>/gatherly/gatherly.db)
//!
//! # Endpoints
//!
//! - `GET /health`: Health check endpoint
//! - `GET /api/values`, `GET /api/values/{id}`: placeholder resource
//! - `GET|POST /api/activities`, `GET|PUT|DELETE /api/activities/{id}`

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gatherly::db::init_db;
use gatherly::server::{router, AppState};

/// Server configuration
#[derive(Debug, Clone)]
struct Config {
    /// Port to listen on
    port: u16,
    /// SQLite database file
    database_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        let port = std::env::var("GATHERLY_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let database_path = std::env::var("GATHERLY_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("gatherly")
                    .join("gatherly.db")
            });

        Self {
            port,
            database_path,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gatherly=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();

    tracing::info!("Database: {}", config.database_path.display());

    // Initialize database and run migrations
    let pool = match init_db(config.database_path.clone()).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    // Build router
    let app = router(AppState::new(pool));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
