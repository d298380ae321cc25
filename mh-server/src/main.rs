use mh_auth::{DevVerifier, GoogleVerifier, IdentityVerifier, TokenManager};
use mh_core::Permission;
use mh_server::{AppState, build_router, logger};

use std::error::Error;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::TcpListener;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = mh_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = mh_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting mh-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());

    let pool = mh_db::connect(&database_path).await?;
    info!("Database connection established");

    info!("Running database migrations...");
    mh_db::migrate(&pool).await?;
    info!("Migrations complete");

    ensure_protected_roles(&pool).await;

    // Token manager (validate() ensures the secret is present)
    let secret = config
        .auth
        .jwt_secret
        .as_deref()
        .ok_or("auth.jwt_secret missing after validation")?;
    let tokens = Arc::new(TokenManager::new(
        secret.as_bytes(),
        config.auth.token_validity_days,
    ));

    // Identity verifier seam
    let verifier: Arc<dyn IdentityVerifier> = if config.auth.dev_login {
        warn!("Dev login ENABLED - credentials are not verified against an identity provider");
        Arc::new(DevVerifier)
    } else {
        let client_id = config
            .auth
            .client_id
            .clone()
            .ok_or("auth.client_id missing after validation")?;
        info!("Google id token verification enabled");
        Arc::new(GoogleVerifier::new(client_id))
    };

    // Build application state
    let app_state = AppState {
        pool,
        tokens,
        verifier,
        allowed_domain: config.auth.allowed_domain.clone(),
        pagination: config.pagination.clone(),
    };

    // Build router
    let app = build_router(app_state);

    // Create TCP listener
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    // Start server with graceful shutdown on SIGINT
    info!("Server ready to accept connections");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => error!("Failed to listen for SIGINT: {}", e),
    }
}

/// Ensure the protected roles exist so they can be assigned from day one.
async fn ensure_protected_roles(pool: &sqlx::SqlitePool) {
    let defaults = [
        ("Default", "#9e9e9e", Vec::new()),
        ("Admin", "#d32f2f", Permission::ALL.to_vec()),
    ];

    for (name, color, permissions) in defaults {
        let permissions = match serde_json::to_string(&permissions) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to encode permissions for role {}: {}", name, e);
                continue;
            }
        };

        match sqlx::query(
            "INSERT OR IGNORE INTO roles (id, name, color, permissions) VALUES (?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(color)
        .bind(permissions)
        .execute(pool)
        .await
        {
            Ok(result) => {
                if result.rows_affected() > 0 {
                    info!("Created protected role: {}", name);
                }
            }
            Err(e) => {
                warn!("Failed to create role {} (may already exist): {}", name, e);
            }
        }
    }
}
