use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use appointment_cell::services::CalendarService;
use appointment_cell::{Booking, CalendarKind};
use shared_database::{keys, AppState, LocalStore};

use crate::models::{BookingStats, PatientError, UserProfile};

pub fn booking_stats(bookings: &[Booking], today: NaiveDate) -> BookingStats {
    BookingStats {
        doctor_appointments: bookings.iter().filter(|b| b.kind == CalendarKind::Doctor).count(),
        lab_bookings: bookings.iter().filter(|b| b.kind == CalendarKind::Lab).count(),
        upcoming: bookings.iter().filter(|b| b.date >= today).count(),
    }
}

pub struct UserProfileService {
    store: Arc<LocalStore>,
    calendar: CalendarService,
}

impl UserProfileService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            calendar: CalendarService::new(state),
        }
    }

    pub async fn profile(&self) -> UserProfile {
        if let Some(profile) = self.store.load::<UserProfile>(keys::HOSPI_USER_PROFILE).await {
            return profile;
        }
        let username = self.store.get_item(keys::USERNAME).await;
        UserProfile::for_user(username.as_deref())
    }

    pub async fn update_profile(&self, mut profile: UserProfile) -> Result<UserProfile, PatientError> {
        profile.name = profile.name.trim().to_string();
        if profile.name.is_empty() {
            return Err(PatientError::Validation("Name is required".to_string()));
        }
        if !profile.email.is_empty() && !profile.email.contains('@') {
            return Err(PatientError::Validation("Please enter a valid email".to_string()));
        }

        debug!("Saving profile for {}", profile.name);
        self.store.save(keys::HOSPI_USER_PROFILE, &profile).await?;
        info!("Profile updated for {}", profile.name);
        Ok(profile)
    }

    pub async fn stats(&self) -> BookingStats {
        booking_stats(&self.calendar.bookings().await, CalendarService::today())
    }
}
