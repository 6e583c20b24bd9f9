//! HTTP route handlers.
//!
//! Operational endpoints live at the root, the resource API under `/api/v1`.

pub mod health;
pub mod v1;

pub use health::routes as health_routes;
pub use v1::routes as v1_routes;
