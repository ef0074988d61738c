use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value as JsonValue;
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::helper::error_chain_fmt;

/// Discriminator of a metric domain.
///
/// Also the physical partition key of the document container: every write
/// and every partition-scoped read of a domain goes through this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(alias = "activity")]
    Activity,
    #[serde(alias = "sleep")]
    Sleep,
    #[serde(alias = "weight")]
    Weight,
    #[serde(alias = "food")]
    Food,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Activity => "Activity",
            DocumentType::Sleep => "Sleep",
            DocumentType::Weight => "Weight",
            DocumentType::Food => "Food",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "activity" => Ok(DocumentType::Activity),
            "sleep" => Ok(DocumentType::Sleep),
            "weight" => Ok(DocumentType::Weight),
            "food" => Ok(DocumentType::Food),
            other => Err(format!("Invalid DocumentType: {}", other)),
        }
    }
}

/// Canonical persisted record for one metric observation.
///
/// `date` is serialized as `YYYY-MM-DD`. A document is never mutated once
/// created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Document<P> {
    #[builder(default=Uuid::new_v4())]
    pub id: Uuid,

    pub payload: P,

    /// Day described by the payload
    pub date: NaiveDate,

    pub document_type: DocumentType,
}

/// Shape the document store works with: the payload is kept as raw JSON
pub type StoredDocument = Document<JsonValue>;

impl<P: Serialize> Document<P> {
    pub fn to_stored(&self) -> Result<StoredDocument, DocumentConversionError> {
        Ok(Document {
            id: self.id,
            payload: serde_json::to_value(&self.payload)?,
            date: self.date,
            document_type: self.document_type,
        })
    }
}

impl StoredDocument {
    pub fn try_into_typed<P: DeserializeOwned>(self) -> Result<Document<P>, DocumentConversionError> {
        Ok(Document {
            id: self.id,
            payload: serde_json::from_value(self.payload)?,
            date: self.date,
            document_type: self.document_type,
        })
    }
}

#[derive(thiserror::Error)]
pub enum DocumentConversionError {
    #[error("Document payload does not match the expected shape: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl std::fmt::Debug for DocumentConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
