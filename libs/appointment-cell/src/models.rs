use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::{Record, StoreError};
use shared_models::error::AppError;
use shared_models::schedule::{ScheduleError, Weekday};

// ==============================================================================
// CATALOGUES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HospitalRef {
    pub name: String,
}

/// A specialist listed on the patient's appointments page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Specialist {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    /// Free-text availability, e.g. `Mon-Fri 9AM-5PM`.
    pub timing: String,
    pub hospital_id: i64,
    pub hospital: HospitalRef,
}

/// A bookable diagnostic test listed on the lab appointments page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabOffering {
    pub id: i64,
    pub name: String,
    pub hospital: String,
    pub price: String,
    pub turnaround: String,
    pub category: String,
    pub available: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CatalogueSort {
    Closest,
    Availability,
    Price,
}

/// `filters` is a comma separated list, e.g. `cardiology,neurosurgeon`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogueQuery {
    pub search: Option<String>,
    pub filters: Option<String>,
    pub sort: Option<CatalogueSort>,
}

impl CatalogueQuery {
    pub fn filter_keys(&self) -> Vec<String> {
        self.filters
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|key| key.trim().to_lowercase())
            .filter(|key| !key.is_empty())
            .collect()
    }
}

// ==============================================================================
// CALENDARS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CalendarKind {
    Doctor,
    Lab,
}

/// Opening hours and simulated demand of a booking calendar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarProfile {
    pub first_hour: u32,
    pub last_hour: u32,
    pub step_minutes: u32,
    pub booked_probability: f64,
    /// Slots still offered when booking for today.
    pub today_limit: usize,
}

impl CalendarKind {
    pub fn profile(&self) -> CalendarProfile {
        match self {
            CalendarKind::Doctor => CalendarProfile {
                first_hour: 9,
                last_hour: 19,
                step_minutes: 30,
                booked_probability: 0.3,
                today_limit: 12,
            },
            CalendarKind::Lab => CalendarProfile {
                first_hour: 8,
                last_hour: 18,
                step_minutes: 30,
                booked_probability: 0.25,
                today_limit: 10,
            },
        }
    }

    pub fn booking_type(&self) -> &'static str {
        match self {
            CalendarKind::Doctor => "Doctor Appointment",
            CalendarKind::Lab => "Lab Test",
        }
    }

    pub fn confirmation_title(&self) -> &'static str {
        match self {
            CalendarKind::Doctor => "Appointment Confirmed!",
            CalendarKind::Lab => "Lab Test Confirmed!",
        }
    }
}

impl fmt::Display for CalendarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarKind::Doctor => f.write_str("doctor"),
            CalendarKind::Lab => f.write_str("lab"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeekQuery {
    /// Any date inside the wanted week; defaults to today.
    pub date: Option<NaiveDate>,
    /// Whole weeks to move forward (positive) or back (negative).
    pub offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub is_today: bool,
    pub is_weekend: bool,
    pub bookable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekView {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Header text, e.g. `Oct 19 - Oct 25, 2026`.
    pub label: String,
    pub previous: NaiveDate,
    pub next: NaiveDate,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarSlot {
    pub time: String,
    pub is_booked: bool,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DaySlots {
    pub kind: CalendarKind,
    pub resource_id: i64,
    pub date: NaiveDate,
    pub bookable: bool,
    pub slots: Vec<CalendarSlot>,
}

// ==============================================================================
// BOOKINGS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSlotRequest {
    pub resource_id: i64,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    /// Display names passed along from the catalogue page.
    pub name: Option<String>,
    pub hospital: Option<String>,
}

/// A confirmed calendar booking as stored under `user_bookings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: i64,
    pub kind: CalendarKind,
    pub resource_id: i64,
    pub name: String,
    pub hospital: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record for Booking {
    fn id(&self) -> i64 {
        self.id
    }
}

/// What the confirmation page shows for a booking.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Confirmation {
    pub booking_id: i64,
    #[serde(rename = "type")]
    pub booking_type: String,
    pub title: String,
    pub status: String,
    pub name: String,
    pub hospital: String,
    /// Long date, e.g. `Mon Oct 19 2026`.
    pub date: String,
    pub time: String,
    pub id: i64,
    pub confirmation_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Please login first")]
    NotLoggedIn,

    #[error("Please select date and time")]
    MissingSelection,

    #[error("Bookings are not available on weekends ({0})")]
    Weekend(NaiveDate),

    #[error("The {time} slot on {date} is not available")]
    SlotNotAvailable { date: NaiveDate, time: String },

    #[error("Booking {0} not found")]
    BookingNotFound(i64),

    #[error("Unknown filter '{0}'")]
    UnknownFilter(String),

    #[error("Week {offset} from {date} is outside the supported calendar range")]
    WeekOutOfRange { date: NaiveDate, offset: i64 },

    #[error(transparent)]
    InvalidTime(#[from] ScheduleError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotLoggedIn => AppError::Auth(err.to_string()),
            AppointmentError::MissingSelection
            | AppointmentError::Weekend(_)
            | AppointmentError::UnknownFilter(_) => AppError::ValidationError(err.to_string()),
            AppointmentError::SlotNotAvailable { .. } => AppError::Conflict(err.to_string()),
            AppointmentError::BookingNotFound(_) => AppError::NotFound(err.to_string()),
            AppointmentError::WeekOutOfRange { .. } => AppError::BadRequest(err.to_string()),
            AppointmentError::InvalidTime(err) => AppError::from(err),
            AppointmentError::Store(err) => AppError::from(err),
        }
    }
}
