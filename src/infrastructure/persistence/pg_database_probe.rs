//! PostgreSQL implementation of the database probe.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::DatabaseProbe;
use crate::error::AppError;

/// Probes a PostgreSQL pool with `SELECT 1`.
pub struct PgDatabaseProbe {
    pool: Arc<PgPool>,
}

impl PgDatabaseProbe {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseProbe for PgDatabaseProbe {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
