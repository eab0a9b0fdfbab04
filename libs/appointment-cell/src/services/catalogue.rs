use std::sync::Arc;

use tracing::debug;

use shared_database::{keys, AppState, LocalStore};
use shared_utils::format::parse_inr;

use crate::models::{
    AppointmentError, CatalogueQuery, CatalogueSort, HospitalRef, LabOffering, Specialist,
};

pub const SPECIALIST_FILTERS: [&str; 3] = ["cardiology", "physiotherapist", "neurosurgeon"];
pub const LAB_FILTERS: [&str; 5] = ["blood", "urine", "xray", "mri", "ctscan"];

pub fn mock_specialists() -> Vec<Specialist> {
    let specialist = |id, name: &str, specialty: &str, timing: &str, hospital_id, hospital: &str| {
        Specialist {
            id,
            name: name.to_string(),
            specialty: specialty.to_string(),
            timing: timing.to_string(),
            hospital_id,
            hospital: HospitalRef { name: hospital.to_string() },
        }
    };

    vec![
        specialist(1, "Dr. Amit Sharma", "Cardiology", "Mon-Fri 9AM-5PM", 1, "Apollo Hospital"),
        specialist(2, "Dr. Priya Patel", "Physiotherapist", "Mon-Sat 10AM-6PM", 1, "Apollo Hospital"),
        specialist(3, "Dr. Rahul Desai", "Neurosurgeon", "Tue-Thu 2PM-8PM", 2, "Lilavati Hospital"),
        specialist(4, "Dr. Sneha Gupta", "Cardiology", "Daily 8AM-4PM", 2, "Lilavati Hospital"),
        specialist(5, "Dr. Vikram Singh", "Physiotherapist", "Mon-Fri 11AM-7PM", 3, "Fortis Hospital"),
        specialist(6, "Dr. Meera Joshi", "Neurosurgeon", "Wed-Fri 1PM-7PM", 3, "Fortis Hospital"),
        specialist(7, "Dr. Karan Mehta", "Cardiology", "Sat-Sun 10AM-4PM", 1, "Apollo Hospital"),
    ]
}

pub fn mock_lab_offerings() -> Vec<LabOffering> {
    let offering = |id, name: &str, hospital: &str, price: &str, turnaround: &str, category: &str, available| {
        LabOffering {
            id,
            name: name.to_string(),
            hospital: hospital.to_string(),
            price: price.to_string(),
            turnaround: turnaround.to_string(),
            category: category.to_string(),
            available,
        }
    };

    vec![
        offering(1, "Complete Blood Count (CBC)", "Apollo Hospital", "₹450", "6-12 hours", "blood", true),
        offering(2, "Urine Routine & Microscopy", "Lilavati Hospital", "₹250", "4-8 hours", "urine", true),
        offering(3, "X-Ray Chest PA View", "Fortis Hospital", "₹800", "2-4 hours", "xray", true),
        offering(4, "MRI Brain", "Apollo Hospital", "₹6500", "24-48 hours", "mri", false),
        offering(5, "CT Scan Abdomen", "Lilavati Hospital", "₹4500", "12-24 hours", "ctscan", true),
        offering(6, "Lipid Profile", "Fortis Hospital", "₹600", "8-12 hours", "blood", true),
        offering(7, "Liver Function Test (LFT)", "Apollo Hospital", "₹700", "6-10 hours", "blood", true),
    ]
}

fn validate_filters(keys: &[String], known: &[&str]) -> Result<(), AppointmentError> {
    match keys.iter().find(|key| !known.contains(&key.as_str())) {
        Some(unknown) => Err(AppointmentError::UnknownFilter(unknown.clone())),
        None => Ok(()),
    }
}

fn search_term(query: &CatalogueQuery) -> Option<String> {
    query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

/// Specialists matching the query. Every active filter must match the specialty.
pub fn filter_specialists(
    specialists: Vec<Specialist>,
    query: &CatalogueQuery,
) -> Result<Vec<Specialist>, AppointmentError> {
    let filters = query.filter_keys();
    validate_filters(&filters, &SPECIALIST_FILTERS)?;
    let search = search_term(query);

    let mut result: Vec<Specialist> = specialists
        .into_iter()
        .filter(|s| {
            search.as_deref().map_or(true, |term| {
                s.name.to_lowercase().contains(term) || s.specialty.to_lowercase().contains(term)
            })
        })
        .filter(|s| {
            let specialty = s.specialty.to_lowercase();
            filters.iter().all(|key| specialty.contains(key.as_str()))
        })
        .collect();

    match query.sort {
        Some(CatalogueSort::Closest) | None => result.sort_by(|a, b| a.name.cmp(&b.name)),
        Some(CatalogueSort::Availability) => {
            result.sort_by(|a, b| b.timing.len().cmp(&a.timing.len()))
        }
        Some(CatalogueSort::Price) => {}
    }

    Ok(result)
}

/// Lab tests matching the query. A test matches when its category is any active filter.
pub fn filter_lab_offerings(
    offerings: Vec<LabOffering>,
    query: &CatalogueQuery,
) -> Result<Vec<LabOffering>, AppointmentError> {
    let filters = query.filter_keys();
    validate_filters(&filters, &LAB_FILTERS)?;
    let search = search_term(query);

    let mut result: Vec<LabOffering> = offerings
        .into_iter()
        .filter(|lab| {
            search.as_deref().map_or(true, |term| {
                lab.name.to_lowercase().contains(term) || lab.hospital.to_lowercase().contains(term)
            })
        })
        .filter(|lab| filters.is_empty() || filters.iter().any(|key| *key == lab.category))
        .collect();

    match query.sort {
        Some(CatalogueSort::Closest) | None => result.sort_by(|a, b| a.name.cmp(&b.name)),
        Some(CatalogueSort::Availability) => result.sort_by_key(|lab| !lab.available),
        Some(CatalogueSort::Price) => {
            result.sort_by_key(|lab| parse_inr(&lab.price).unwrap_or(u32::MAX))
        }
    }

    Ok(result)
}

pub struct CatalogueService {
    store: Arc<LocalStore>,
}

impl CatalogueService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// Specialists are only shown to a logged-in patient.
    pub async fn specialists(&self, query: &CatalogueQuery) -> Result<Vec<Specialist>, AppointmentError> {
        let user_id = self.store.get_item(keys::USER_ID).await;
        if user_id.map_or(true, |id| id.trim().is_empty()) {
            return Err(AppointmentError::NotLoggedIn);
        }

        debug!("Listing specialists for {:?}", query);
        filter_specialists(mock_specialists(), query)
    }

    pub async fn lab_offerings(&self, query: &CatalogueQuery) -> Result<Vec<LabOffering>, AppointmentError> {
        debug!("Listing lab tests for {:?}", query);
        filter_lab_offerings(mock_lab_offerings(), query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn query(search: Option<&str>, filters: Option<&str>, sort: Option<CatalogueSort>) -> CatalogueQuery {
        CatalogueQuery {
            search: search.map(str::to_string),
            filters: filters.map(str::to_string),
            sort,
        }
    }

    #[test]
    fn test_specialists_sorted_by_name_by_default() {
        let result = filter_specialists(mock_specialists(), &CatalogueQuery::default()).unwrap();

        assert_eq!(result.len(), 7);
        assert_eq!(result[0].name, "Dr. Amit Sharma");
        assert_eq!(result[6].name, "Dr. Vikram Singh");
    }

    #[test]
    fn test_specialist_filters_must_all_match() {
        let cardiology = filter_specialists(mock_specialists(), &query(None, Some("cardiology"), None)).unwrap();
        assert_eq!(cardiology.len(), 3);

        let both = filter_specialists(
            mock_specialists(),
            &query(None, Some("cardiology,neurosurgeon"), None),
        )
        .unwrap();
        assert!(both.is_empty());
    }

    #[test]
    fn test_specialist_search_and_availability_sort() {
        let result = filter_specialists(
            mock_specialists(),
            &query(Some("PHYSIO"), None, Some(CatalogueSort::Availability)),
        )
        .unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].timing, "Mon-Sat 10AM-6PM");
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        assert_matches!(
            filter_specialists(mock_specialists(), &query(None, Some("dermatology"), None)),
            Err(AppointmentError::UnknownFilter(key)) if key == "dermatology"
        );
    }

    #[test]
    fn test_lab_filters_match_any_category() {
        let result = filter_lab_offerings(mock_lab_offerings(), &query(None, Some("mri,ctscan"), None)).unwrap();

        let names: Vec<&str> = result.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["CT Scan Abdomen", "MRI Brain"]);
    }

    #[test]
    fn test_lab_price_sort() {
        let result = filter_lab_offerings(
            mock_lab_offerings(),
            &query(None, Some("blood"), Some(CatalogueSort::Price)),
        )
        .unwrap();

        let prices: Vec<&str> = result.iter().map(|l| l.price.as_str()).collect();
        assert_eq!(prices, vec!["₹450", "₹600", "₹700"]);
    }

    #[test]
    fn test_lab_availability_sort_puts_unavailable_last() {
        let result = filter_lab_offerings(
            mock_lab_offerings(),
            &query(Some("apollo"), None, Some(CatalogueSort::Availability)),
        )
        .unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result.last().map(|l| l.name.as_str()), Some("MRI Brain"));
    }
}
