mod application;
mod config;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;

use crate::infrastructure::driven::persistence::{self, SqlitePermissionRepository};
use crate::infrastructure::driving::http::{cors_layer, permission_routes};
use crate::infrastructure::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "permission_service=debug,tower_http=debug".into()),
        )
        .init();

    let settings = config::Settings::load()?;

    let pool = Arc::new(persistence::create_pool(&settings.database_path)?);
    persistence::ensure_schema(&pool)?;
    tracing::info!("Connected to database at {}", settings.database_path);

    let state = AppState {
        permission_repo: Arc::new(SqlitePermissionRepository::new(pool)),
    };

    let app = permission_routes()
        .layer(cors_layer(&settings)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::new(settings.host.parse()?, settings.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("============================================================");
    tracing::info!("PERMISSION SERVICE IS RUNNING!");
    tracing::info!("Server: http://{addr}");
    tracing::info!("============================================================");

    axum::serve(listener, app).await?;

    Ok(())
}
