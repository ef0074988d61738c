use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::NaiveDate;
use common::{
    domain::{
        entities::document::{DocumentConversionError, DocumentType},
        metric::Metric,
    },
    helper::error_chain_fmt,
    ports::document_store::{DocumentStore, DocumentStoreError},
};
use serde_json::json;
use tracing::info;

/// Returns the document of the `M` domain describing the day in the path
#[tracing::instrument(
    name = "Get document by date",
    skip(store, path),
    fields(document_type = %M::DOCUMENT_TYPE, date = %path)
)]
pub async fn get_document_by_date<M: Metric>(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, GetDocumentByDateError> {
    let raw_date = path.into_inner();
    let date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
        .map_err(|_| GetDocumentByDateError::InvalidDate(raw_date))?;

    let Some(document) = store.query_by_date(M::DOCUMENT_TYPE, date).await? else {
        // Absence is an expected answer, not a failure
        info!("No document for this date");
        return Err(GetDocumentByDateError::NotFound {
            document_type: M::DOCUMENT_TYPE,
            date,
        });
    };
    let document = document.try_into_typed::<M::Payload>()?;

    info!(id = %document.id, "Found document");
    Ok(HttpResponse::Ok().json(document))
}

#[derive(thiserror::Error)]
pub enum GetDocumentByDateError {
    #[error("Invalid date {0}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("No {document_type} document for {date}")]
    NotFound {
        document_type: DocumentType,
        date: NaiveDate,
    },
    #[error(transparent)]
    StoreError(#[from] DocumentStoreError),
    #[error(transparent)]
    ConversionError(#[from] DocumentConversionError),
}

impl std::fmt::Debug for GetDocumentByDateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for GetDocumentByDateError {
    fn status_code(&self) -> StatusCode {
        match self {
            GetDocumentByDateError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            GetDocumentByDateError::NotFound { .. } => StatusCode::NOT_FOUND,
            GetDocumentByDateError::StoreError(_) | GetDocumentByDateError::ConversionError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    #[tracing::instrument(name = "Response error from get_document_by_date controller", skip(self), fields(error = %self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
