//! PostgreSQL implementation of the link backend.

use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgPool, Row};
use tracing::{debug, info};

use crate::domain::entities::{Link, Snapshot};
use crate::domain::error::{StorageError, StorageResult};
use crate::domain::repositories::LinkBackend;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// PostgreSQL backend over a single `links` table.
///
/// ```sql
/// links(person text, short text unique, long text, deleted bool)
/// ```
///
/// Soft delete flips `deleted`; rows are never removed, so a short id stays
/// taken after deletion.
#[derive(Debug, Clone)]
pub struct PgBackend {
    pool: PgPool,
}

impl PgBackend {
    /// Creates a backend from an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a lazily connected pool and applies migrations.
    ///
    /// The pool is cached for the lifetime of the backend; connections are
    /// opened on first use.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::BackendUnavailable`] if the DSN is invalid or
    /// the database cannot be migrated.
    pub async fn connect(dsn: &str, options: PgPoolOptions) -> StorageResult<Self> {
        let pool = options.connect_lazy(dsn).map_err(map_sqlx_error)?;

        Self::migrate(&pool).await?;
        info!("Connected to database");

        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies embedded migrations to `pool`.
    pub async fn migrate(pool: &PgPool) -> StorageResult<()> {
        MIGRATOR.run(pool).await.map_err(|e| {
            StorageError::BackendUnavailable(format!("failed to apply migrations: {e}"))
        })
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_) => StorageError::InvalidData(message),
        _ => StorageError::BackendUnavailable(message),
    }
}

#[async_trait]
impl LinkBackend for PgBackend {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn load(&self) -> StorageResult<Snapshot> {
        let rows = sqlx::query(
            r#"
            SELECT person, short, long, deleted
            FROM links
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let mut snapshot = Snapshot::default();

        for row in rows {
            let person: String = row.try_get("person").map_err(map_sqlx_error)?;
            let short: String = row.try_get("short").map_err(map_sqlx_error)?;
            let long: String = row.try_get("long").map_err(map_sqlx_error)?;
            let deleted: bool = row.try_get("deleted").map_err(map_sqlx_error)?;

            let link = Link::new(short, long, person);
            if deleted {
                snapshot.deleted.push(link);
            } else {
                snapshot.active.push(link);
            }
        }

        debug!(rows = snapshot.len(), "Loaded links from database");
        Ok(snapshot)
    }

    async fn persist(&self, person: &str, short_id: &str, long_url: &str) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO links (person, short, long)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(person)
        .bind(short_id)
        .bind(long_url)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(StorageError::duplicate(short_id)),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn mark_deleted(&self, person: &str, short_id: &str) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET deleted = TRUE
            WHERE person = $1
              AND short = $2
            "#,
        )
        .bind(person)
        .bind(short_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(
            short_id,
            rows = result.rows_affected(),
            "Marked link deleted in database"
        );
        Ok(())
    }

    async fn is_healthy(&self) -> bool {
        match self.pool.acquire().await {
            Ok(mut conn) => conn.ping().await.is_ok(),
            Err(_) => false,
        }
    }
}
