use std::sync::Arc;

use sqlx::{migrate::MigrateError, postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::{
    configuration::{DatabaseSettings, DocumentStoreBackend, DocumentStoreSettings},
    ports::document_store::DocumentStore,
    repositories::{
        document_in_memory_repository::DocumentInMemoryRepository,
        document_postgres_repository::{run_migrations, DocumentPostgresRepository},
    },
};

pub fn get_connection_pool(settings: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(settings.with_db())
}

/// Creates the document store selected in the settings
///
/// The Postgres schema is migrated before the store is handed out.
#[tracing::instrument(name = "Setting up document store", skip(database))]
pub async fn set_up_document_store(
    settings: &DocumentStoreSettings,
    database: &DatabaseSettings,
) -> Result<Arc<dyn DocumentStore>, MigrateError> {
    match settings.backend {
        DocumentStoreBackend::Postgres => {
            let pool = get_connection_pool(database);
            run_migrations(&pool).await?;
            info!(
                "🗄️ Document store ready on database {}",
                database.database_name
            );
            Ok(Arc::new(DocumentPostgresRepository::new(pool)))
        }
        DocumentStoreBackend::InMemory => {
            info!("Serving documents from an in-memory store, nothing is persisted");
            Ok(Arc::new(DocumentInMemoryRepository::new()))
        }
    }
}
