use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::AppConfig;

/// Failure surfaced by a repository call.
#[derive(Debug, Error)]
pub enum RepoError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated")]
    Conflict,
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => RepoError::Conflict,
            _ => RepoError::Database(err),
        }
    }
}

/// Owns the Postgres pool for the lifetime of the process.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        info!(max_connections = config.db_max_connections, "database pool ready");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("run migrations")?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }

    /// Wipes every row so a test run starts from an empty schema.
    #[cfg(all(test, feature = "live-db-tests"))]
    pub async fn clean_db(&self) -> anyhow::Result<()> {
        tracing::warn!("cleaning database");
        sqlx::query("TRUNCATE TABLE bookmarks, users RESTART IDENTITY CASCADE")
            .execute(&self.pool)
            .await
            .context("truncate tables")?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_not_conflicts() {
        let err = RepoError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepoError::Database(sqlx::Error::RowNotFound)));
    }

    #[cfg(feature = "live-db-tests")]
    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn clean_db_empties_tables() {
        let db = live::test_database().await;
        sqlx::query("INSERT INTO users (email, password_hash) VALUES ('a@b.co', 'x')")
            .execute(db.pool())
            .await
            .expect("insert user");

        db.clean_db().await.expect("clean");

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(db.pool())
            .await
            .expect("count users");
        assert_eq!(count, 0);
        db.close().await;
    }
}
