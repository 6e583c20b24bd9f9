//! Application state shared across handlers.

use async_trait::async_trait;
use std::sync::Arc;
use travel_health_application::Services;
use travel_health_infrastructure::{postgres_repositories, DatabasePool};

/// Dependency probe used by the readiness endpoint
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    async fn is_ready(&self) -> bool;
}

#[async_trait]
impl ReadinessCheck for DatabasePool {
    async fn is_ready(&self) -> bool {
        self.health_check().await.healthy
    }
}

/// Readiness probe for stores without an external dependency
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReady;

#[async_trait]
impl ReadinessCheck for AlwaysReady {
    async fn is_ready(&self) -> bool {
        true
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub readiness: Arc<dyn ReadinessCheck>,
}

impl AppState {
    pub fn new(services: Services, readiness: Arc<dyn ReadinessCheck>) -> Self {
        Self { services, readiness }
    }

    /// State backed by the PostgreSQL repositories
    pub fn postgres(pool: DatabasePool) -> Self {
        let services = Services::new(postgres_repositories(&pool));
        Self::new(services, Arc::new(pool))
    }
}
