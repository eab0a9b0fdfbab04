use std::cmp::Ordering;

use tracing::{debug, warn};

use shared_database::{AppState, BedAvailability, HospiGoApiClient};

use crate::models::{
    DirectoryHospital, DirectoryQuery, DirectoryResult, DirectorySort, HospitalError,
    DEFAULT_ORIGIN, DIRECTORY_LIMIT,
};

pub const DIRECTORY_FILTERS: [&str; 8] = [
    "beds", "icu", "oncology", "cardiology", "xrays", "mri", "ctscan", "pathology",
];

pub fn known_hospitals() -> Vec<DirectoryHospital> {
    let hospital = |id, name: &str, lat, lng, available, total, rating, specialties: &[&str]| {
        DirectoryHospital {
            hospital_id: id,
            name: name.to_string(),
            lat,
            lng,
            available_beds: available,
            total_beds: total,
            rating,
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
        }
    };

    vec![
        hospital(1, "Apollo Hospitals", 19.0694, 72.8258, 45, 300, 4.5, &["ICU"]),
        hospital(2, "Cigma Hospital", 19.0542, 72.8250, 31, 250, 4.0, &["ICU", "Cardiology"]),
        hospital(3, "Kamlayan Bajaj", 19.0720, 72.8340, 42, 280, 4.2, &["ICU"]),
        hospital(4, "Hedgewar Hospital", 19.1245, 72.8231, 28, 220, 4.3, &["ICU"]),
        hospital(5, "Nanavati Hospital", 19.0630, 72.8210, 15, 120, 4.1, &["ICU", "Oncology"]),
    ]
}

/// Map pin for a hospital only known from the beds feed.
pub fn from_bed_feed(beds: &BedAvailability) -> DirectoryHospital {
    let offset = beds.hospital_id as f64 * 0.001;
    DirectoryHospital {
        hospital_id: beds.hospital_id,
        name: format!("Hospital {}", beds.hospital_id),
        lat: DEFAULT_ORIGIN.0 + offset,
        lng: DEFAULT_ORIGIN.1 + offset,
        available_beds: beds.available,
        total_beds: beds.total,
        rating: 4.0,
        specialties: Vec::new(),
    }
}

/// Filters, searches, sorts and truncates the merged hospital list.
pub fn apply_query(
    hospitals: Vec<DirectoryHospital>,
    query: &DirectoryQuery,
) -> Result<Vec<DirectoryHospital>, HospitalError> {
    let filters: Vec<String> = query
        .filters
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty())
        .collect();
    if let Some(unknown) = filters.iter().find(|f| !DIRECTORY_FILTERS.contains(&f.as_str())) {
        return Err(HospitalError::UnknownFilter(unknown.clone()));
    }

    let search = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut result: Vec<DirectoryHospital> = hospitals
        .into_iter()
        .filter(|h| {
            filters.iter().all(|filter| match filter.as_str() {
                "beds" => h.available_beds > 0,
                specialty => h.specialties.iter().any(|s| s.eq_ignore_ascii_case(specialty)),
            })
        })
        .filter(|h| {
            search
                .as_deref()
                .map_or(true, |term| h.name.to_lowercase().contains(term))
        })
        .collect();

    match query.sort.unwrap_or(DirectorySort::Closest) {
        DirectorySort::Closest => {
            let origin = query.origin();
            result.sort_by(|a, b| {
                a.distance_from(origin)
                    .partial_cmp(&b.distance_from(origin))
                    .unwrap_or(Ordering::Equal)
            });
        }
        DirectorySort::Availability => {
            result.sort_by(|a, b| b.available_beds.cmp(&a.available_beds))
        }
    }

    result.truncate(DIRECTORY_LIMIT);
    Ok(result)
}

pub struct DirectoryService {
    api: HospiGoApiClient,
}

impl DirectoryService {
    pub fn new(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
        }
    }

    pub async fn directory(&self, query: &DirectoryQuery) -> Result<DirectoryResult, HospitalError> {
        let mut hospitals = known_hospitals();

        let degraded = match self.api.beds_availability().await {
            Ok(beds) => {
                debug!("Merging {} hospitals from the beds feed", beds.len());
                hospitals.extend(beds.iter().map(from_bed_feed));
                false
            }
            Err(e) => {
                warn!("Beds feed unavailable, listing known hospitals only: {}", e);
                true
            }
        };

        let hospitals = apply_query(hospitals, query)?;
        Ok(DirectoryResult {
            total: hospitals.len(),
            hospitals,
            degraded,
        })
    }
}
