//! Schema CLI for deployments that run with `AUTO_MIGRATE=false`:
//! `DATABASE_URL=... cargo run -p migration -- up`
use sea_orm_migration::prelude::*;
use migration::Migrator;

#[async_std::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
