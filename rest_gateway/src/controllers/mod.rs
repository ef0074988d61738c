pub mod get_document_by_date;
pub mod get_documents_paged;
pub mod health_check;

pub use get_document_by_date::*;
pub use get_documents_paged::*;
pub use health_check::*;
