//! Travel Health REST API
//!
//! Axum routes over the application services: cities with their ratings,
//! hospitals, vaccines, common illnesses, emergency and insurance info.
//!
//! ## Architecture
//!
//! - **app**: Router assembly and middleware stack
//! - **routes**: HTTP handlers, `/health` and `/ready` at the root and the
//!   resource API under `/api/v1`
//! - **middleware**: Request id propagation and request logging
//! - **extractors**: JSON extractor with API-formatted rejections
//! - **responses**: Success envelopes
//! - **error**: Application error to HTTP status mapping
//!
//! ## Usage
//!
//! ```rust,no_run
//! use travel_health_api_rest::{build_router, AppState};
//! use travel_health_common::AppConfig;
//! use travel_health_infrastructure::DatabasePool;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = AppConfig::load()?;
//! let pool = DatabasePool::connect(&config.database).await?;
//! let app = build_router(AppState::postgres(pool), &config.server);
//!
//! let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]

pub mod app;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod routes;
pub mod state;

pub use app::build_router;
pub use error::{ApiError, ApiResult};
pub use state::{AlwaysReady, AppState, ReadinessCheck};
