use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    domain::entities::document::{DocumentType, StoredDocument},
    helper::error_chain_fmt,
};

/// Partitioned document container.
///
/// Documents are only ever created, never updated or deleted. The partition
/// key of every call is the `DocumentType` of the domain being written or read.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persists `document` in the `partition_key` partition.
    ///
    /// `partition_key` must be the document's own `document_type`.
    async fn create_document(
        &self,
        document: &StoredDocument,
        partition_key: DocumentType,
    ) -> Result<(), DocumentStoreError>;

    /// Returns the document of `partition_key` describing `date`, if any.
    ///
    /// When several documents match, the first one in natural order is returned.
    async fn query_by_date(
        &self,
        partition_key: DocumentType,
        date: NaiveDate,
    ) -> Result<Option<StoredDocument>, DocumentStoreError>;

    /// Returns at most `take` documents of `partition_key` after skipping `skip`,
    /// with the number of documents in the whole partition.
    async fn query_paged(
        &self,
        partition_key: DocumentType,
        skip: u64,
        take: u64,
    ) -> Result<(Vec<StoredDocument>, u64), DocumentStoreError>;
}

#[derive(thiserror::Error)]
pub enum DocumentStoreError {
    #[error("A document with the same id already exists: {0}")]
    Conflict(String),
    #[error("Document store is unavailable: {0}")]
    Unavailable(String),
    #[error("Document store rejected the credentials: {0}")]
    Unauthorized(String),
    #[error("Document store request failed: {0}")]
    Transient(String),
    #[error("Document of type {document_type} cannot be written to partition {partition_key}")]
    PartitionKeyMismatch {
        document_type: DocumentType,
        partition_key: DocumentType,
    },
    #[error("Stored document is malformed: {0}")]
    InvalidDocument(String),
}

impl std::fmt::Debug for DocumentStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Rejects writes whose partition key is not the document's own type
pub fn check_partition_key(
    document: &StoredDocument,
    partition_key: DocumentType,
) -> Result<(), DocumentStoreError> {
    if document.document_type != partition_key {
        return Err(DocumentStoreError::PartitionKeyMismatch {
            document_type: document.document_type,
            partition_key,
        });
    }
    Ok(())
}
