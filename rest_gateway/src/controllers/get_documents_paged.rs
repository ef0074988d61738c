use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use common::{
    domain::{
        entities::document::{DocumentConversionError, StoredDocument},
        metric::Metric,
        pagination::PaginationRequest,
    },
    helper::error_chain_fmt,
    ports::document_store::{DocumentStore, DocumentStoreError},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

/// Raw query string of a listing
///
/// Values are kept as text: a value that is not an integer counts as unset
/// and falls back to the pagination defaults instead of rejecting the request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_number: Option<String>,
    pub page_size: Option<String>,
}

impl PageQuery {
    pub fn to_request(&self) -> PaginationRequest {
        PaginationRequest::normalize(
            parse_lenient(self.page_number.as_deref()),
            parse_lenient(self.page_size.as_deref()),
        )
    }
}

fn parse_lenient(value: Option<&str>) -> Option<i64> {
    value.and_then(|value| value.trim().parse().ok())
}

/// Returns one page of the `M` domain documents, in the store's natural order
#[tracing::instrument(
    name = "Get documents paged",
    skip(store, query),
    fields(document_type = %M::DOCUMENT_TYPE)
)]
pub async fn get_documents_paged<M: Metric>(
    store: web::Data<dyn DocumentStore>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, GetDocumentsPagedError> {
    let request = query.to_request();

    let (items, total_count) = store
        .query_paged(M::DOCUMENT_TYPE, request.skip(), request.take())
        .await?;

    let page = request
        .build_response(items, total_count)
        .try_map(StoredDocument::try_into_typed::<M::Payload>)?;

    info!(
        page_number = page.page_number,
        page_size = page.page_size,
        total_count = page.total_count,
        "Listed documents"
    );
    Ok(HttpResponse::Ok().json(page))
}

#[derive(thiserror::Error)]
pub enum GetDocumentsPagedError {
    #[error(transparent)]
    StoreError(#[from] DocumentStoreError),
    #[error(transparent)]
    ConversionError(#[from] DocumentConversionError),
}

impl std::fmt::Debug for GetDocumentsPagedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for GetDocumentsPagedError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    #[tracing::instrument(name = "Response error from get_documents_paged controller", skip(self), fields(error = %self))]
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({ "error": self.to_string() }))
    }
}
