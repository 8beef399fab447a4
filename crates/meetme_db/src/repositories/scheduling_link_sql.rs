//! SQL implementation of the scheduling link store

use chrono::{DateTime, Utc};
use meetme_common::{BoxFuture, LinkStore, LinkStoreError, NewSchedulingLink, SchedulingLink};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::error::DbError;
use crate::DbClient;

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, duration_minutes, slug, created_at FROM scheduling_links";

/// Scheduling links in the `scheduling_links` table.
#[derive(Debug, Clone)]
pub struct SqlLinkStore {
    db_client: DbClient,
}

impl SqlLinkStore {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Creates the table if it does not exist yet.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing scheduling link schema");

        // created_at holds an RFC 3339 string; the Any driver has no portable timestamp type.
        let query = r#"
            CREATE TABLE IF NOT EXISTS scheduling_links (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                duration_minutes BIGINT NOT NULL,
                slug TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            )
        "#;
        self.db_client.execute(query).await?;

        info!("Scheduling link schema initialized successfully");
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<SchedulingLink>, DbError> {
        let query = format!("{} ORDER BY created_at, id", SELECT_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list scheduling links: {}", e);
                DbError::QueryError(e.to_string())
            })?;
        rows.iter().map(link_from_row).collect()
    }

    async fn fetch_by_slug(&self, slug: &str) -> Result<Option<SchedulingLink>, DbError> {
        let query = format!("{} WHERE slug = $1", SELECT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(slug)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find scheduling link '{}': {}", slug, e);
                DbError::QueryError(e.to_string())
            })?;
        row.as_ref().map(link_from_row).transpose()
    }

    async fn insert(&self, link: NewSchedulingLink) -> Result<SchedulingLink, LinkStoreError> {
        if self.fetch_by_slug(&link.slug).await?.is_some() {
            return Err(LinkStoreError::DuplicateSlug(link.slug));
        }

        let created = SchedulingLink {
            id: Uuid::new_v4().to_string(),
            title: link.title,
            description: link.description,
            duration_minutes: link.duration_minutes,
            slug: link.slug,
            created_at: Utc::now(),
        };

        let query = r#"
            INSERT INTO scheduling_links (id, title, description, duration_minutes, slug, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
        "#;
        let result = sqlx::query(query)
            .bind(&created.id)
            .bind(&created.title)
            .bind(&created.description)
            .bind(created.duration_minutes)
            .bind(&created.slug)
            .bind(created.created_at.to_rfc3339())
            .execute(self.db_client.pool())
            .await;

        match result {
            Ok(_) => {
                info!("Stored scheduling link '{}'", created.slug);
                Ok(created)
            }
            // A concurrent insert can still win the race for the slug.
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(LinkStoreError::DuplicateSlug(created.slug))
            }
            Err(e) => {
                error!("Failed to insert scheduling link: {}", e);
                Err(DbError::QueryError(e.to_string()).into())
            }
        }
    }

    async fn remove(&self, id: &str) -> Result<bool, DbError> {
        let affected = sqlx::query("DELETE FROM scheduling_links WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to delete scheduling link {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn link_from_row(row: &AnyRow) -> Result<SchedulingLink, DbError> {
    let created_at: String = row.try_get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| DbError::CorruptRow(format!("created_at '{}': {}", created_at, e)))?
        .with_timezone(&Utc);

    Ok(SchedulingLink {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        duration_minutes: row.try_get("duration_minutes")?,
        slug: row.try_get("slug")?,
        created_at,
    })
}

impl LinkStore for SqlLinkStore {
    fn list(&self) -> BoxFuture<'_, Vec<SchedulingLink>, LinkStoreError> {
        Box::pin(async move { Ok(self.fetch_all().await?) })
    }

    fn get_by_slug<'a>(
        &'a self,
        slug: &'a str,
    ) -> BoxFuture<'a, Option<SchedulingLink>, LinkStoreError> {
        Box::pin(async move { Ok(self.fetch_by_slug(slug).await?) })
    }

    fn create(&self, link: NewSchedulingLink) -> BoxFuture<'_, SchedulingLink, LinkStoreError> {
        Box::pin(self.insert(link))
    }

    fn delete_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, bool, LinkStoreError> {
        Box::pin(async move { Ok(self.remove(id).await?) })
    }
}
