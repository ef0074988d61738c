pub mod document_mapper;
