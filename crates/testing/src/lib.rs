//! Testing utilities for the travel health service
//!
//! This crate provides:
//! - An in-memory store implementing every repository port
//! - Test fixtures with realistic data
//! - A builder for seeding a store with a populated city
//!
//! # Examples
//!
//! ```
//! use travel_health_testing::{CityBuilder, InMemoryStore};
//!
//! let store = InMemoryStore::shared();
//! let city = CityBuilder::new().with_name("Lisbon").with_hospitals(2).insert(&store);
//! assert_eq!(store.hospitals_of(city.id).len(), 2);
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
