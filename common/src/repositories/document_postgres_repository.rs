use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde_json::Value as JsonValue;
use sqlx::{migrate::MigrateError, types::Json, PgPool};
use tracing::warn;
use uuid::Uuid;

use crate::{
    domain::entities::document::{Document, DocumentType, StoredDocument},
    ports::document_store::{check_partition_key, DocumentStore, DocumentStoreError},
};

/// Document store implemented on a Postgres `documents` table.
///
/// The partition key is the `document_type` column. Rows are never updated,
/// and the natural order is `(created_at, id)`.
pub struct DocumentPostgresRepository {
    pool: PgPool,
}

impl DocumentPostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Creates or upgrades the `documents` table
#[tracing::instrument(name = "Running document store migrations", skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../migrations").run(pool).await
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    document_type: String,
    date: NaiveDate,
    payload: Json<JsonValue>,
}

impl TryFrom<DocumentRow> for StoredDocument {
    type Error = DocumentStoreError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let document_type = row
            .document_type
            .parse::<DocumentType>()
            .map_err(DocumentStoreError::InvalidDocument)?;

        Ok(Document {
            id: row.id,
            payload: row.payload.0,
            date: row.date,
            document_type,
        })
    }
}

/// Sorts `sqlx` failures into the store error kinds
fn store_error(error: sqlx::Error) -> DocumentStoreError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            DocumentStoreError::Conflict(error.to_string())
        }
        // invalid_authorization_specification / invalid_password
        sqlx::Error::Database(db_error)
            if matches!(db_error.code().as_deref(), Some("28000") | Some("28P01")) =>
        {
            DocumentStoreError::Unauthorized(error.to_string())
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => DocumentStoreError::Unavailable(error.to_string()),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            DocumentStoreError::InvalidDocument(error.to_string())
        }
        _ => DocumentStoreError::Transient(error.to_string()),
    }
}

#[async_trait]
impl DocumentStore for DocumentPostgresRepository {
    #[tracing::instrument(
        name = "Saving document in database",
        skip(self, document),
        fields(document_id = %document.id, date = %document.date)
    )]
    async fn create_document(
        &self,
        document: &StoredDocument,
        partition_key: DocumentType,
    ) -> Result<(), DocumentStoreError> {
        check_partition_key(document, partition_key)?;

        sqlx::query(
            r#"
    INSERT INTO documents (id, document_type, date, payload, created_at)
    VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(document.id)
        .bind(partition_key.as_str())
        .bind(document.date)
        .bind(Json(&document.payload))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    #[tracing::instrument(name = "Querying document by date in database", skip(self))]
    async fn query_by_date(
        &self,
        partition_key: DocumentType,
        date: NaiveDate,
    ) -> Result<Option<StoredDocument>, DocumentStoreError> {
        // Two rows are enough to notice a duplicate
        let mut rows = sqlx::query_as::<_, DocumentRow>(
            r#"
    SELECT id, document_type, date, payload FROM documents
    WHERE document_type = $1 AND date = $2
    ORDER BY created_at, id
    LIMIT 2
            "#,
        )
        .bind(partition_key.as_str())
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        if rows.len() > 1 {
            warn!("Several documents describe the same date, returning the first one");
        }

        if rows.is_empty() {
            return Ok(None);
        }
        rows.swap_remove(0).try_into().map(Some)
    }

    #[tracing::instrument(name = "Querying a page of documents in database", skip(self))]
    async fn query_paged(
        &self,
        partition_key: DocumentType,
        skip: u64,
        take: u64,
    ) -> Result<(Vec<StoredDocument>, u64), DocumentStoreError> {
        let total_count: i64 = sqlx::query_scalar(
            r#"
    SELECT COUNT(*) FROM documents
    WHERE document_type = $1
            "#,
        )
        .bind(partition_key.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
    SELECT id, document_type, date, payload FROM documents
    WHERE document_type = $1
    ORDER BY created_at, id
    OFFSET $2
    LIMIT $3
            "#,
        )
        .bind(partition_key.as_str())
        .bind(i64::try_from(skip).unwrap_or(i64::MAX))
        .bind(i64::try_from(take).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let items = rows
            .into_iter()
            .map(StoredDocument::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((items, total_count.max(0) as u64))
    }
}
