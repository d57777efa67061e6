//! The `taskboard` library crate.
//!
//! This crate contains the configuration, the document-store capability,
//! the request-authorization pipeline, domain models, route handlers and
//! error handling for the taskboard backend. It is used by the main binary
//! (`main.rs`) to construct and run the application.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
