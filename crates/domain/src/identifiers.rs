//! Strongly-typed identifier types for the travel health domain.
//!
//! Every entity gets its own UUID-backed identifier so a hospital id can
//! never be passed where a city id is expected. New ids use UUID v7 so
//! rows created in one batch keep their insertion order.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new ID with a time-ordered UUID v7
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Create an ID from an existing UUID
            #[inline]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get a reference to the underlying UUID
            #[inline]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Convert to the underlying UUID
            #[inline]
            pub fn into_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(CityId, "Unique identifier for cities");

define_id!(GeneralRatingId, "Unique identifier for general ratings");

define_id!(HealthRatingId, "Unique identifier for health ratings");

define_id!(HospitalId, "Unique identifier for hospitals");

define_id!(VaccineId, "Unique identifier for recommended vaccines");

define_id!(IllnessId, "Unique identifier for common illnesses");

define_id!(
    EmergencyInfoId,
    "Unique identifier for a city's emergency information"
);

define_id!(
    AmbulanceServiceId,
    "Unique identifier for ambulance services"
);

define_id!(InsuranceInfoId, "Unique identifier for insurance information");
