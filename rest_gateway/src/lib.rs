pub mod configuration;
pub mod controllers;
pub mod startup;
