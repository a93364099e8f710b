use anyhow::Result;
use sqlx::Executor;

use crate::Connection;

/// Install the database schema. Safe to run against an
/// already initialized database.
pub async fn install(db: &Connection) -> Result<()> {
    let mut conn = db.lock().await;
    let schema_data = include_str!("../db/schema.sql");
    log::info!("installing database schema");
    (*conn).execute(schema_data).await?;
    Ok(())
}
