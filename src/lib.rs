pub mod common;
pub mod config;
pub mod domain;
pub mod mapper;
pub mod observability;
pub mod status;

// Layered boundaries for application and infrastructure
pub mod app;
pub mod infra;

pub use common::error::{IngestError, Result};
