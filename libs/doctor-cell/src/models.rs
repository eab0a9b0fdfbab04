use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::{Record, StoreError};
use shared_models::error::AppError;
use shared_models::schedule::{DaySchedule, ScheduleError, Scheduled, Weekday, WeeklySchedule};

/// Specializations offered by the add-doctor form.
pub const SPECIALIZATIONS: [&str; 5] = [
    "Cardiology",
    "Neurology",
    "Orthopedics",
    "Pediatrics",
    "General",
];

pub const DEFAULT_SPECIALIZATION: &str = "Cardiology";

// ==============================================================================
// CORE DOCTOR MODELS
// ==============================================================================

/// A doctor as persisted under `hospital_doctors`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialty: String,
    #[serde(rename = "qual")]
    pub qualification: String,
    #[serde(rename = "exp")]
    pub experience: u32,
    pub fee: u32,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub schedule: WeeklySchedule,
}

impl Record for Doctor {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Scheduled for Doctor {
    fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    fn schedule_mut(&mut self) -> &mut WeeklySchedule {
        &mut self.schedule
    }
}

/// Schedule given to newly added doctors: weekdays 09:00-17:00, a short
/// Saturday and Sunday off.
pub fn default_schedule() -> Result<WeeklySchedule, ScheduleError> {
    let weekday = DaySchedule::open("09:00", "17:00")?;
    let saturday = DaySchedule::open("09:00", "14:00")?;

    Ok(WeeklySchedule::from_fn(|day| match day {
        Weekday::Sat => saturday.clone(),
        Weekday::Sun => DaySchedule::day_off(),
        _ => weekday.clone(),
    }))
}

/// Roster shown before any doctor has been saved.
pub fn seed_doctors() -> Vec<Doctor> {
    let open = |start: &str, end: &str| {
        DaySchedule::open(start, end).unwrap_or_else(|_| DaySchedule::closed(start, end))
    };

    let schedule = WeeklySchedule::from_fn(|day| match day {
        Weekday::Mon | Weekday::Tue => open("09:00", "17:00"),
        Weekday::Wed => DaySchedule::closed("09:00", "17:00"),
        Weekday::Thu => open("10:00", "18:00"),
        Weekday::Fri => open("09:00", "14:00"),
        Weekday::Sat => open("10:00", "14:00"),
        Weekday::Sun => DaySchedule::day_off(),
    });

    vec![Doctor {
        id: 1,
        name: "Dr. Rahul Mehta".to_string(),
        specialty: "Cardiology".to_string(),
        qualification: "MBBS, MD".to_string(),
        experience: 12,
        fee: 1500,
        available: true,
        designation: None,
        bio: None,
        schedule,
    }]
}

// ==============================================================================
// REQUEST / RESPONSE DTOs
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: String,
    #[serde(default)]
    pub specialization: Option<String>,
    pub qualification: String,
    pub experience: u32,
    #[serde(default)]
    pub designation: Option<String>,
    pub fee: u32,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Partial edit from the manage screen's details tab.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub name: Option<String>,
    pub specialty: Option<String>,
    #[serde(alias = "qual")]
    pub qualification: Option<String>,
    #[serde(alias = "exp")]
    pub experience: Option<u32>,
    pub fee: Option<u32>,
    pub available: Option<bool>,
    pub designation: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDoctorResponse {
    pub deleted_id: i64,
    pub remaining: Vec<Doctor>,
    /// Doctor the manage screen should select next, if any remain.
    pub next_selected_id: Option<i64>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("Doctor {0} not found")]
    NotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound(_) => AppError::NotFound(err.to_string()),
            DoctorError::Validation(msg) => AppError::ValidationError(msg),
            DoctorError::Schedule(err) => AppError::from(err),
            DoctorError::Store(err) => AppError::from(err),
        }
    }
}
