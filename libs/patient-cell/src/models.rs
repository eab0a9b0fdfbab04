use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::error::AppError;

pub const DEFAULT_USER_NAME: &str = "HospiGo User";
pub const DEFAULT_CITY: &str = "Mumbai";
pub const DEFAULT_PREFERRED_HOSPITAL: &str = "Apollo Hospital";

/// Patient profile as stored under `hospi_user_profile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub blood_group: String,
    pub age: Option<u32>,
    pub gender: String,
    pub city: String,
    pub emergency_contact: String,
    pub allergies: String,
    pub chronic_conditions: String,
    pub preferred_hospital: String,
}

impl UserProfile {
    /// Profile shown before the patient has saved anything.
    pub fn for_user(username: Option<&str>) -> Self {
        Self {
            name: username
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_USER_NAME)
                .to_string(),
            city: DEFAULT_CITY.to_string(),
            preferred_hospital: DEFAULT_PREFERRED_HOSPITAL.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BookingStats {
    pub doctor_appointments: usize,
    pub lab_bookings: usize,
    pub upcoming: usize,
}

#[derive(Error, Debug)]
pub enum PatientError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<PatientError> for AppError {
    fn from(err: PatientError) -> Self {
        match err {
            PatientError::Validation(msg) => AppError::ValidationError(msg),
            PatientError::Store(err) => AppError::from(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_uses_username() {
        let profile = UserProfile::for_user(Some("priya"));
        assert_eq!(profile.name, "priya");
        assert_eq!(profile.city, "Mumbai");

        assert_eq!(UserProfile::for_user(Some("  ")).name, "HospiGo User");
        assert_eq!(UserProfile::for_user(None).preferred_hospital, "Apollo Hospital");
    }

    #[test]
    fn test_partial_profile_deserializes() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "name": "Priya",
            "bloodGroup": "B+",
            "emergencyContact": "+91 99999 00000"
        }))
        .unwrap();

        assert_eq!(profile.blood_group, "B+");
        assert_eq!(profile.age, None);
        assert!(profile.city.is_empty());
    }
}
