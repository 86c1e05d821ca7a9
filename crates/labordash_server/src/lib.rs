//! Labordash Server
//!
//! Serves the composed dashboard page and its visualization artifacts.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod config;

pub use api::{DashboardServer, ServerError, ServerResult, router};
pub use config::ServerConfig;
