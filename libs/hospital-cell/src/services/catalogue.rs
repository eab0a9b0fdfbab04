use doctor_cell::{Doctor, DoctorService};
use lab_cell::{LabService, LabTest};
use shared_database::AppState;
use tracing::debug;

use crate::models::{CatalogueSort, HospitalCatalogueQuery};

fn search_term(query: &HospitalCatalogueQuery) -> Option<String> {
    query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

pub fn filter_doctors(doctors: Vec<Doctor>, query: &HospitalCatalogueQuery) -> Vec<Doctor> {
    let search = search_term(query);
    let mut result: Vec<Doctor> = doctors
        .into_iter()
        .filter(|d| {
            search.as_deref().map_or(true, |term| {
                d.name.to_lowercase().contains(term) || d.specialty.to_lowercase().contains(term)
            })
        })
        .collect();

    match query.sort {
        Some(CatalogueSort::FeeLow) => result.sort_by_key(|d| d.fee),
        Some(CatalogueSort::Experience) => result.sort_by(|a, b| b.experience.cmp(&a.experience)),
        Some(CatalogueSort::Recommended) | None => {}
    }
    result
}

/// Labs have no experience, so `exp` keeps the saved order.
pub fn filter_labs(labs: Vec<LabTest>, query: &HospitalCatalogueQuery) -> Vec<LabTest> {
    let search = search_term(query);
    let mut result: Vec<LabTest> = labs
        .into_iter()
        .filter(|l| {
            search.as_deref().map_or(true, |term| {
                l.name.to_lowercase().contains(term) || l.category.to_lowercase().contains(term)
            })
        })
        .collect();

    if query.sort == Some(CatalogueSort::FeeLow) {
        result.sort_by_key(|l| l.price);
    }
    result
}

/// What the hospital has published, as seen on its services page.
pub struct HospitalCatalogueService {
    doctors: DoctorService,
    labs: LabService,
}

impl HospitalCatalogueService {
    pub fn new(state: &AppState) -> Self {
        Self {
            doctors: DoctorService::new(state),
            labs: LabService::new(state),
        }
    }

    pub async fn doctors(&self, query: &HospitalCatalogueQuery) -> Vec<Doctor> {
        debug!("Hospital catalogue doctors for {:?}", query);
        filter_doctors(self.doctors.saved_doctors().await, query)
    }

    pub async fn labs(&self, query: &HospitalCatalogueQuery) -> Vec<LabTest> {
        debug!("Hospital catalogue labs for {:?}", query);
        filter_labs(self.labs.saved_labs().await, query)
    }
}
