//! API v1 routes.

use crate::state::AppState;
use axum::Router;
use travel_health_application::validation::{HospitalInput, IllnessInput, VaccineInput};
use travel_health_domain::{CommonIllness, Hospital, Vaccine};

pub mod children;
pub mod cities;
pub mod emergency;
pub mod insurance;
pub mod ratings;

/// Create all v1 API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(cities::routes())
        .merge(ratings::routes())
        .merge(children::routes::<Hospital, HospitalInput>())
        .merge(children::routes::<Vaccine, VaccineInput>())
        .merge(children::routes::<CommonIllness, IllnessInput>())
        .merge(emergency::routes())
        .merge(insurance::routes())
}
