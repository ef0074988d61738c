pub mod document_in_memory_repository;
pub mod document_postgres_repository;
pub mod document_store_setup;
