use crate::Result as DbErrorResult;

use std::path::Path;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};

/// Open (creating if missing) the database file and return a pool.
pub async fn connect(path: &Path) -> DbErrorResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .busy_timeout(Duration::from_secs(5))
                .foreign_keys(true),
        )
        .await?;

    Ok(pool)
}

/// Run the embedded migrations.
pub async fn migrate(pool: &SqlitePool) -> DbErrorResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
