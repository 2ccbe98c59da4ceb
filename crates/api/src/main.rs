use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zemli_api::auth::password::hash_password;
use zemli_api::config::ServerConfig;
use zemli_api::router::build_app_router;
use zemli_api::state::AppState;
use zemli_api::storage::MediaStore;
use zemli_core::roles::ROLE_ADMIN;
use zemli_db::models::user::CreateUser;
use zemli_db::repositories::UserRepo;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zemli_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = zemli_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    zemli_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    zemli_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Admin bootstrap ---
    // A fresh deployment has no staff users; create the first admin from
    // ADMIN_EMAIL / ADMIN_PASSWORD if it does not exist yet.
    if let (Ok(email), Ok(password)) = (
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        let existing = UserRepo::find_by_email(&pool, &email)
            .await
            .expect("Failed to query users for admin bootstrap");
        if existing.is_none() {
            let password_hash = hash_password(&password).expect("Failed to hash admin password");
            UserRepo::create(
                &pool,
                &CreateUser {
                    email: email.clone(),
                    password_hash,
                    role: ROLE_ADMIN.to_string(),
                },
            )
            .await
            .expect("Failed to create bootstrap admin");
            tracing::info!(email = %email, "Bootstrap admin created");
        }
    }

    // --- Upload directory ---
    let media_store = MediaStore::new(&config.upload_dir, config.upload_base_url.clone());
    media_store
        .ensure_root()
        .await
        .expect("Failed to create upload directory");
    tracing::info!(dir = %config.upload_dir, "Upload directory ready");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media_store: Arc::new(media_store),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
