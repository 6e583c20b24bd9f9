//! Repository implementations for data persistence.
//!
//! PostgreSQL-backed implementations of the repository ports declared by
//! the application layer.

mod child_repository;
mod city_repository;
mod emergency_repository;
mod insurance_repository;
mod rating_repository;

pub use child_repository::{ChildTable, PgChildRepository};
pub use city_repository::PgCityRepository;
pub use emergency_repository::PgEmergencyRepository;
pub use insurance_repository::PgInsuranceRepository;
pub use rating_repository::PgRatingRepository;
