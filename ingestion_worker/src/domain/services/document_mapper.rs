use chrono::NaiveDate;
use common::{
    domain::{
        entities::document::{Document, DocumentConversionError, StoredDocument},
        metric::{FetchWindow, Metric},
    },
    helper::error_chain_fmt,
};
use serde_json::Value as JsonValue;

/// Wraps `payload` into a new document of `M`'s partition describing `date`
pub fn map_document<M: Metric>(date: NaiveDate, payload: M::Payload) -> Document<M::Payload> {
    Document::builder()
        .payload(payload)
        .date(date)
        .document_type(M::DOCUMENT_TYPE)
        .build()
}

/// Converts a provider response into the documents to persist, in provider order.
///
/// Daily domains yield one document dated with the window's as-of date.
/// Weight yields one document per sample, each dated with its own sample date.
pub fn map_raw<M: Metric>(
    window: &FetchWindow,
    raw: JsonValue,
) -> Result<Vec<StoredDocument>, MappingError> {
    let raw: M::Raw = serde_json::from_value(raw)?;

    M::observations(raw, window)
        .into_iter()
        .map(|(date, payload)| {
            map_document::<M>(date, payload)
                .to_stored()
                .map_err(MappingError::from)
        })
        .collect()
}

#[derive(thiserror::Error)]
pub enum MappingError {
    #[error("Provider payload does not have the expected shape: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    #[error(transparent)]
    Conversion(#[from] DocumentConversionError),
}

impl std::fmt::Debug for MappingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
