//! Placement management backend
//!
//! A web backend where students browse and apply to jobs posted by
//! recruiters, behind a role-gated session login.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod store;

pub use config::Config;
pub use error::Error;
