//! ECOQUEST Server — application entry point.

use chrono::Local;
use ecoquest_db::repository::SurrealMissionSetRepository;
use ecoquest_db::{DbConfig, DbManager, run_migrations};
use ecoquest_engine::missions::{DailyMissionBoard, spawn_reset_task};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting ECOQUEST server...");

    let mut db_config = DbConfig::default();
    if let Ok(dir) = std::env::var("ECOQUEST_DATA_DIR") {
        db_config.path = Some(dir.into());
    }

    let db = DbManager::open(&db_config).await?;
    run_migrations(db.client()).await?;

    let board = DailyMissionBoard::new(SurrealMissionSetRepository::new(db.client().clone()));
    let missions = board.active_missions(Local::now().naive_local()).await?;
    tracing::info!(count = missions.len(), "Daily missions ready");

    let reset_task = spawn_reset_task(board);

    tokio::signal::ctrl_c().await?;
    reset_task.shutdown();

    tracing::info!("ECOQUEST server stopped.");
    Ok(())
}
