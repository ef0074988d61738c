pub mod activity;
pub mod document;
pub mod food;
pub mod sleep;
pub mod weight;
