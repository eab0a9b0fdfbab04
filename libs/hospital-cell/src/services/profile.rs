use std::sync::Arc;

use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::{keys, AppState, LocalStore};
use shared_utils::latency::simulate_latency;

use crate::models::{HospitalError, HospitalProfile, RegisterHospitalRequest, HOSPITAL_TYPES};

pub struct HospitalProfileService {
    config: AppConfig,
    store: Arc<LocalStore>,
}

impl HospitalProfileService {
    pub fn new(state: &AppState) -> Self {
        Self {
            config: state.config.clone(),
            store: state.store.clone(),
        }
    }

    pub async fn register(&self, request: RegisterHospitalRequest) -> Result<HospitalProfile, HospitalError> {
        let profile = HospitalProfile {
            name: required(&request.hospital_name, "Hospital name is required")?,
            hospital_type: hospital_type(request.hospital_type.as_deref())?,
            reg_number: required(&request.registration_number, "Registration number is required")?,
            phone: required(&request.phone, "Phone number is required")?,
            email: required(&request.email, "Email is required")?,
            website: request.website.unwrap_or_default().trim().to_string(),
            address: required(&request.address, "Address is required")?,
            city: request
                .city
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "Mumbai".to_string()),
            pincode: required(&request.pincode, "Pincode is required")?,
            total_beds: request
                .total_beds
                .ok_or_else(|| HospitalError::Validation("Total beds is required".to_string()))?,
            icu_beds: request.icu_beds.unwrap_or(0),
            emergency_units: request.emergency_units.unwrap_or(0),
            ambulances: request.ambulance_count.unwrap_or(0),
            description: String::new(),
            image: None,
        };

        debug!("Registering hospital {}", profile.name);
        simulate_latency(&self.config).await;

        self.persist(&profile).await?;
        info!("Hospital {} registered", profile.name);
        Ok(profile)
    }

    /// Stored profile, or the demo profile when none has been saved.
    pub async fn profile(&self) -> HospitalProfile {
        self.store
            .load_or_else(keys::HOSPITAL_PROFILE, HospitalProfile::default)
            .await
    }

    pub async fn update_profile(&self, mut profile: HospitalProfile) -> Result<HospitalProfile, HospitalError> {
        profile.name = required(&profile.name, "Hospital name is required")?;
        self.persist(&profile).await?;
        info!("Hospital profile updated for {}", profile.name);
        Ok(profile)
    }

    async fn persist(&self, profile: &HospitalProfile) -> Result<(), HospitalError> {
        self.store.save(keys::HOSPITAL_PROFILE, profile).await?;
        self.store
            .set_item(keys::HOSPITAL_NAME, profile.name.clone())
            .await?;
        Ok(())
    }
}

fn hospital_type(value: Option<&str>) -> Result<String, HospitalError> {
    match value.map(str::trim) {
        None | Some("") => Ok("General".to_string()),
        Some(value) => HOSPITAL_TYPES
            .iter()
            .find(|known| known.eq_ignore_ascii_case(value))
            .map(|known| known.to_string())
            .ok_or_else(|| HospitalError::Validation(format!("Unknown hospital type: {}", value))),
    }
}

fn required(value: &str, message: &str) -> Result<String, HospitalError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(HospitalError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}
