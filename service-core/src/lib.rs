//! service-core: Shared infrastructure for the document front end services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
