//! Infrastructure layer for the travel health service
//!
//! This crate provides implementations for:
//! - Database access (PostgreSQL with sqlx)
//! - The repository ports declared by the application layer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use travel_health_application::Services;
//! use travel_health_infrastructure::{postgres_repositories, DatabasePool};
//!
//! let pool = DatabasePool::connect(&config.database).await?;
//! pool.migrate().await?;
//! let services = Services::new(postgres_repositories(&pool));
//! ```

pub mod database;
pub mod repositories;

use std::sync::Arc;
use travel_health_application::{ApplicationError, RepositorySet};
use travel_health_domain::{CommonIllness, Hospital, Vaccine};
use tracing::error;

pub use database::{DatabasePool, HealthStatus, TransactionExt};
pub use repositories::{
    ChildTable, PgChildRepository, PgCityRepository, PgEmergencyRepository,
    PgInsuranceRepository, PgRatingRepository,
};

pub type Result<T> = std::result::Result<T, Error>;

/// SQLSTATE for a foreign key violation
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Infrastructure-level errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database errors from sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration errors
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The parent city row does not exist
    #[error("City not found")]
    CityNotFound,
}

impl Error {
    /// Whether the database rejected a reference to a missing parent row
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            Error::Database(sqlx::Error::Database(db)) => {
                db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION)
            }
            _ => false,
        }
    }
}

impl From<Error> for ApplicationError {
    fn from(err: Error) -> Self {
        // City ids are the only foreign keys taken from client input; every
        // other reference is resolved by the service before writing.
        if matches!(err, Error::CityNotFound) || err.is_foreign_key_violation() {
            return ApplicationError::city_not_found();
        }
        error!(error = %err, "Storage operation failed");
        ApplicationError::Storage(err.to_string())
    }
}

/// Every repository port backed by `pool`
pub fn postgres_repositories(pool: &DatabasePool) -> RepositorySet {
    let pool = pool.pool().clone();
    RepositorySet {
        cities: Arc::new(PgCityRepository::new(pool.clone())),
        ratings: Arc::new(PgRatingRepository::new(pool.clone())),
        hospitals: Arc::new(PgChildRepository::<Hospital>::new(pool.clone())),
        vaccines: Arc::new(PgChildRepository::<Vaccine>::new(pool.clone())),
        illnesses: Arc::new(PgChildRepository::<CommonIllness>::new(pool.clone())),
        emergency: Arc::new(PgEmergencyRepository::new(pool.clone())),
        insurance: Arc::new(PgInsuranceRepository::new(pool)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_become_storage() {
        let err: ApplicationError = Error::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, ApplicationError::Storage(_)));
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn test_row_not_found_is_not_a_foreign_key_violation() {
        assert!(!Error::Database(sqlx::Error::RowNotFound).is_foreign_key_violation());
    }

    #[test]
    fn test_missing_city_maps_to_not_found() {
        let err: ApplicationError = Error::CityNotFound.into();
        assert_eq!(err, ApplicationError::city_not_found());
    }
}
