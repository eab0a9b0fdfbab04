use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::error::AppError;

pub const HOSPITAL_TYPES: [&str; 4] = ["General", "Multi-Specialty", "Specialty", "Clinic"];

/// Default map centre (Bandra, Mumbai).
pub const DEFAULT_ORIGIN: (f64, f64) = (19.0760, 72.8777);

pub const DIRECTORY_LIMIT: usize = 50;

// ==============================================================================
// PROFILE
// ==============================================================================

/// Hospital profile as stored under `hospital_profile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HospitalProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub hospital_type: String,
    pub reg_number: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub website: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub total_beds: u32,
    #[serde(default)]
    pub icu_beds: u32,
    #[serde(default)]
    pub emergency_units: u32,
    #[serde(default)]
    pub ambulances: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Default for HospitalProfile {
    fn default() -> Self {
        Self {
            name: "City General Hospital".to_string(),
            hospital_type: "Multi-Specialty".to_string(),
            reg_number: "HOSP-MUM-2024-8921".to_string(),
            phone: "+91 98765 43210".to_string(),
            email: "admin@citygeneral.com".to_string(),
            website: "www.citygeneral.com".to_string(),
            address: "12, Link Road, Andheri West".to_string(),
            city: "Mumbai".to_string(),
            pincode: "400053".to_string(),
            total_beds: 150,
            icu_beds: 25,
            emergency_units: 8,
            ambulances: 4,
            description: "A leading healthcare provider committed to excellence in medical care and patient safety. Equipped with state-of-the-art facilities.".to_string(),
            image: None,
        }
    }
}

/// The "Register Hospital" details form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterHospitalRequest {
    pub hospital_name: String,
    #[serde(rename = "type", default)]
    pub hospital_type: Option<String>,
    pub registration_number: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub website: Option<String>,
    pub address: String,
    #[serde(default)]
    pub city: Option<String>,
    pub pincode: String,
    pub total_beds: Option<u32>,
    #[serde(default)]
    pub icu_beds: Option<u32>,
    #[serde(default)]
    pub emergency_units: Option<u32>,
    #[serde(default)]
    pub ambulance_count: Option<u32>,
}

// ==============================================================================
// DIRECTORY
// ==============================================================================

/// A hospital pin on the patient's map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DirectoryHospital {
    pub hospital_id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "availableBeds")]
    pub available_beds: u32,
    #[serde(rename = "totalBeds")]
    pub total_beds: u32,
    pub rating: f64,
    pub specialties: Vec<String>,
}

impl DirectoryHospital {
    pub fn distance_from(&self, origin: (f64, f64)) -> f64 {
        ((self.lat - origin.0).powi(2) + (self.lng - origin.1).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DirectorySort {
    Closest,
    Availability,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryQuery {
    pub search: Option<String>,
    /// Comma separated, e.g. `beds,icu`.
    pub filters: Option<String>,
    pub sort: Option<DirectorySort>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl DirectoryQuery {
    pub fn origin(&self) -> (f64, f64) {
        (
            self.lat.unwrap_or(DEFAULT_ORIGIN.0),
            self.lng.unwrap_or(DEFAULT_ORIGIN.1),
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectoryResult {
    pub hospitals: Vec<DirectoryHospital>,
    pub total: usize,
    /// Live bed data could not be fetched; only the built-in hospitals are listed.
    pub degraded: bool,
}

// ==============================================================================
// HOSPITAL CATALOGUE
// ==============================================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CatalogueTab {
    #[default]
    Doctors,
    Labs,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CatalogueSort {
    #[serde(rename = "default")]
    Recommended,
    #[serde(rename = "fee-low")]
    FeeLow,
    #[serde(rename = "exp")]
    Experience,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HospitalCatalogueQuery {
    #[serde(default)]
    pub tab: CatalogueTab,
    pub search: Option<String>,
    pub sort: Option<CatalogueSort>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum HospitalError {
    #[error("{0}")]
    Validation(String),

    #[error("Unknown filter '{0}'")]
    UnknownFilter(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<HospitalError> for AppError {
    fn from(err: HospitalError) -> Self {
        match err {
            HospitalError::Validation(msg) => AppError::ValidationError(msg),
            HospitalError::UnknownFilter(_) => AppError::ValidationError(err.to_string()),
            HospitalError::Store(err) => AppError::from(err),
        }
    }
}
