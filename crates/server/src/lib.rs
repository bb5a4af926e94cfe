//! Formcheck Server - HTTP REST API for form template classification
//!
//! This crate provides a production-ready HTTP server around the
//! formcheck engine and store. It supports:
//!
//! - **Record Classification**: Match a flat record against the stored
//!   templates, or infer per-field types when nothing matches
//! - **Template Management**: List stored templates and seed the
//!   built-in mock set
//! - **Health Probes**: Liveness and readiness endpoints
//!
//! # Features
//!
//! - **Middleware**: Compression, CORS, request ID tracking, structured logging
//! - **Configuration**: Environment variable and file-based configuration
//! - **Error Handling**: Error responses with stable error codes
//! - **Graceful Shutdown**: Proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe
//! - `POST /api/v1/classify` - Classify a record (JSON body, form body,
//!   or query parameters)
//! - `GET /api/v1/templates` - List stored templates in catalog order
//! - `POST /api/v1/templates/seed` - Seed the built-in mock templates

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
