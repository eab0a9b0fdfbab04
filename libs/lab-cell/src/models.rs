use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::{Record, StoreError};
use shared_models::error::AppError;
use shared_models::schedule::{DaySchedule, ScheduleError, Scheduled, Weekday, WeeklySchedule};

pub const CATEGORIES: [&str; 4] = ["Blood", "Urine", "Imaging", "Pathology"];

pub const DEFAULT_CATEGORY: &str = "Blood";

/// A diagnostic test offered by the hospital's lab, persisted under `hospital_labs`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabTest {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: u32,
    /// Turnaround time as shown to patients, e.g. `6 Hrs`.
    pub tat: String,
    /// Home sample collection available.
    pub home: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub schedule: WeeklySchedule,
}

impl Record for LabTest {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Scheduled for LabTest {
    fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    fn schedule_mut(&mut self) -> &mut WeeklySchedule {
        &mut self.schedule
    }
}

/// Collection hours: 07:00-22:00 Monday to Saturday, 08:00-14:00 on Sunday.
pub fn default_schedule() -> Result<WeeklySchedule, ScheduleError> {
    let weekday = DaySchedule::open("07:00", "22:00")?;
    let sunday = DaySchedule::open("08:00", "14:00")?;

    Ok(WeeklySchedule::from_fn(|day| match day {
        Weekday::Sun => sunday.clone(),
        _ => weekday.clone(),
    }))
}

pub fn seed_labs() -> Vec<LabTest> {
    let schedule = default_schedule().unwrap_or_else(|_| {
        WeeklySchedule::from_fn(|_| DaySchedule::day_off())
    });

    vec![LabTest {
        id: 1,
        name: "Complete Blood Count (CBC)".to_string(),
        category: "Blood".to_string(),
        price: 450,
        tat: "6 Hrs".to_string(),
        home: true,
        instructions: None,
        schedule,
    }]
}

// Field aliases accept the add form's own input names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLabRequest {
    #[serde(alias = "testName")]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub price: u32,
    #[serde(alias = "turnaround")]
    pub tat: String,
    #[serde(default, alias = "isHomeCollection")]
    pub home: bool,
    #[serde(default)]
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLabRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<u32>,
    pub tat: Option<String>,
    pub home: Option<bool>,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLabResponse {
    pub deleted_id: i64,
    pub remaining: Vec<LabTest>,
    pub next_selected_id: Option<i64>,
}

#[derive(Error, Debug)]
pub enum LabError {
    #[error("Lab test {0} not found")]
    NotFound(i64),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<LabError> for AppError {
    fn from(err: LabError) -> Self {
        match err {
            LabError::NotFound(_) => AppError::NotFound(err.to_string()),
            LabError::Validation(msg) => AppError::ValidationError(msg),
            LabError::Schedule(err) => AppError::from(err),
            LabError::Store(err) => AppError::from(err),
        }
    }
}
