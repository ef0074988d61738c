pub mod configuration;
pub mod domain;
pub mod helper;
pub mod ports;
pub mod repositories;
pub mod telemetry;
