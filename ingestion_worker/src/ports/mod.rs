pub mod metric_source;
