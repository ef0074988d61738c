pub mod entities;
pub mod metric;
pub mod pagination;
