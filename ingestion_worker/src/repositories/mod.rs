pub mod metric_source_http_repository;
