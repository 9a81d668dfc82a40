//! Migration CLI tool.
//!
//! `DATABASE_URL` selects the target database; run `migration up` to apply
//! pending migrations or `migration down` to roll back the last one.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    tracing::info!("Running Yatube migrations");
    cli::run_cli(migration::Migrator).await;
}
