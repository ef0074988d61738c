pub mod ingestion_run;
