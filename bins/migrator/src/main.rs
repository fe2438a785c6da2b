//! Schema migration runner for the Sideline database.
//!
//! Wraps the sea-orm-migration CLI:
//!   migrator up      - Run all pending migrations
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! Reads DATABASE_URL from the environment (or a local .env file).

use sea_orm_migration::prelude::*;
use sideline_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The migrator CLI sets up its own tracing.
    cli::run_cli(Migrator).await;
}
