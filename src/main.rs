mod config;
mod entities;
mod services;
mod handlers;
mod routes;
mod utils;
mod models;
mod seeders;
mod middleware;
#[cfg(test)]
mod test_support;

use config::{AppState, Config};
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!("🔥 {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cfg = Config::init()?;
    tracing::info!("🚀 Starting blog-pages...");

    // 1. Database Connection
    let db = Database::connect(&cfg.database_url)
        .await
        .map_err(|e| format!("Failed to connect to database: {}", e))?;
    tracing::info!("✅ Database connected");

    // 2. Schema
    if cfg.auto_migrate {
        Migrator::up(&db, None)
            .await
            .map_err(|e| format!("Migration failed: {}", e))?;
        tracing::info!("✅ Migrations applied");
    }

    // 3. Database Seeding
    seeders::run_seeders(&db).await.map_err(|e| format!("Seeding failed: {}", e))?;
    tracing::info!("🌱 Seeding successful");

    // 4. App State & Router
    let state = AppState::new(db, &cfg);
    let app = routes::create_routes(state.clone()).with_state(state);

    // 5. Start Server
    let addr: SocketAddr = format!("{}:{}", cfg.server_host, cfg.server_port)
        .parse()
        .map_err(|_| "Invalid HOST/PORT combination".to_string())?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;
    tracing::info!("🎯 Server ready! Listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))
}
