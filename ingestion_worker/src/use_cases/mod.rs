pub mod ingest_metric;
