//! Configuration management for the placement backend

pub mod loader;
mod schema;

pub use loader::load_config;
pub use schema::*;
