use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::warn;

use crate::{
    domain::entities::document::{DocumentType, StoredDocument},
    ports::document_store::{check_partition_key, DocumentStore, DocumentStoreError},
};

/// Document store kept in process memory
///
/// Documents are kept in insertion order, which is the natural order of
/// `query_by_date` and `query_paged`. Nothing survives the process.
#[derive(Default)]
pub struct DocumentInMemoryRepository {
    documents: RwLock<Vec<StoredDocument>>,
}

impl DocumentInMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored document, in insertion order
    pub async fn documents(&self) -> Vec<StoredDocument> {
        self.documents.read().await.clone()
    }
}

#[async_trait]
impl DocumentStore for DocumentInMemoryRepository {
    #[tracing::instrument(
        name = "Saving document in memory",
        skip(self, document),
        fields(document_id = %document.id, date = %document.date)
    )]
    async fn create_document(
        &self,
        document: &StoredDocument,
        partition_key: DocumentType,
    ) -> Result<(), DocumentStoreError> {
        check_partition_key(document, partition_key)?;

        let mut documents = self.documents.write().await;
        if documents.iter().any(|stored| stored.id == document.id) {
            return Err(DocumentStoreError::Conflict(document.id.to_string()));
        }
        documents.push(document.clone());

        Ok(())
    }

    #[tracing::instrument(name = "Querying document by date in memory", skip(self))]
    async fn query_by_date(
        &self,
        partition_key: DocumentType,
        date: NaiveDate,
    ) -> Result<Option<StoredDocument>, DocumentStoreError> {
        let documents = self.documents.read().await;
        let mut matches = documents
            .iter()
            .filter(|document| document.document_type == partition_key && document.date == date);

        let first = matches.next().cloned();
        let duplicates = matches.count();
        if duplicates > 0 {
            warn!(
                duplicates,
                "Several documents describe the same date, returning the first one"
            );
        }

        Ok(first)
    }

    #[tracing::instrument(name = "Querying a page of documents in memory", skip(self))]
    async fn query_paged(
        &self,
        partition_key: DocumentType,
        skip: u64,
        take: u64,
    ) -> Result<(Vec<StoredDocument>, u64), DocumentStoreError> {
        let documents = self.documents.read().await;
        let partition: Vec<&StoredDocument> = documents
            .iter()
            .filter(|document| document.document_type == partition_key)
            .collect();

        let total_count = partition.len() as u64;
        let items = partition
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(take).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok((items, total_count))
    }
}
