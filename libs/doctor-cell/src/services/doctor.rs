use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::{keys, AppState, Collection};
use shared_models::schedule::{DayScheduleView, RangeRequest, Weekday};
use shared_utils::ids::next_timestamp_id;
use shared_utils::latency::simulate_latency;
use shared_utils::schedule_editor::{EditError, ScheduleEditor};

use crate::models::{
    default_schedule, seed_doctors, CreateDoctorRequest, DeleteDoctorResponse, Doctor,
    DoctorError, UpdateDoctorRequest, DEFAULT_SPECIALIZATION, SPECIALIZATIONS,
};

pub struct DoctorService {
    config: AppConfig,
    doctors: Collection<Doctor>,
}

impl DoctorService {
    pub fn new(state: &AppState) -> Self {
        Self {
            config: state.config.clone(),
            doctors: Collection::new(state.store.clone(), keys::HOSPITAL_DOCTORS, seed_doctors),
        }
    }

    pub async fn list_doctors(&self) -> Vec<Doctor> {
        self.doctors.list().await
    }

    /// Doctors actually saved by the hospital; the demo roster is not included.
    pub async fn saved_doctors(&self) -> Vec<Doctor> {
        self.doctors.persisted().await
    }

    pub async fn get_doctor(&self, doctor_id: i64) -> Result<Doctor, DoctorError> {
        self.doctors
            .get(doctor_id)
            .await
            .ok_or(DoctorError::NotFound(doctor_id))
    }

    /// Registers a doctor from the add form. Returns the stored record.
    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<Doctor, DoctorError> {
        let name = required(&request.name, "Doctor name is required")?;
        let qualification = required(&request.qualification, "Qualification is required")?;

        let specialty = match request.specialization.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_SPECIALIZATION.to_string(),
            Some(value) => SPECIALIZATIONS
                .iter()
                .find(|known| known.eq_ignore_ascii_case(value))
                .map(|known| known.to_string())
                .ok_or_else(|| {
                    DoctorError::Validation(format!("Unknown specialization: {}", value))
                })?,
        };

        debug!("Creating doctor {} ({})", name, specialty);
        simulate_latency(&self.config).await;

        let mut doctors = self.doctors.persisted().await;
        let doctor = Doctor {
            id: next_timestamp_id(doctors.iter().map(|d| d.id)),
            name,
            specialty,
            qualification,
            experience: request.experience,
            fee: request.fee,
            available: true,
            designation: non_empty(request.designation),
            bio: non_empty(request.bio),
            schedule: default_schedule()?,
        };

        doctors.push(doctor.clone());
        self.doctors.save_all(&doctors).await?;

        info!("Doctor {} added with id {}", doctor.name, doctor.id);
        Ok(doctor)
    }

    pub async fn update_doctor(
        &self,
        doctor_id: i64,
        request: UpdateDoctorRequest,
    ) -> Result<Doctor, DoctorError> {
        let name = request
            .name
            .as_deref()
            .map(|value| required(value, "Doctor name is required"))
            .transpose()?;

        let updated = self
            .doctors
            .update(doctor_id, |doctor| {
                if let Some(name) = name {
                    doctor.name = name;
                }
                if let Some(specialty) = request.specialty {
                    doctor.specialty = specialty;
                }
                if let Some(qualification) = request.qualification {
                    doctor.qualification = qualification;
                }
                if let Some(experience) = request.experience {
                    doctor.experience = experience;
                }
                if let Some(fee) = request.fee {
                    doctor.fee = fee;
                }
                if let Some(available) = request.available {
                    doctor.available = available;
                }
                if request.designation.is_some() {
                    doctor.designation = non_empty(request.designation);
                }
                if request.bio.is_some() {
                    doctor.bio = non_empty(request.bio);
                }
                Ok::<_, DoctorError>(doctor.clone())
            })
            .await?;

        updated.ok_or(DoctorError::NotFound(doctor_id))
    }

    pub async fn delete_doctor(&self, doctor_id: i64) -> Result<DeleteDoctorResponse, DoctorError> {
        let (removed, remaining) = self
            .doctors
            .remove(doctor_id)
            .await?
            .ok_or(DoctorError::NotFound(doctor_id))?;

        info!("Deleted doctor {} ({})", removed.name, removed.id);

        Ok(DeleteDoctorResponse {
            deleted_id: removed.id,
            next_selected_id: remaining.first().map(|d| d.id),
            remaining,
        })
    }

    // ==========================================================================
    // WEEKLY SCHEDULE
    // ==========================================================================

    fn schedule_editor(&self) -> ScheduleEditor<'_, Doctor> {
        ScheduleEditor::new(&self.doctors, "Doctor")
    }

    pub async fn day_schedule(&self, doctor_id: i64, day: Weekday) -> Result<DayScheduleView, EditError> {
        self.schedule_editor().day(doctor_id, day).await
    }

    pub async fn toggle_day(&self, doctor_id: i64, day: Weekday) -> Result<DayScheduleView, EditError> {
        self.schedule_editor().toggle_day(doctor_id, day).await
    }

    pub async fn set_day_range(
        &self,
        doctor_id: i64,
        day: Weekday,
        range: &RangeRequest,
    ) -> Result<DayScheduleView, EditError> {
        self.schedule_editor().set_range(doctor_id, day, range).await
    }

    pub async fn toggle_slot(
        &self,
        doctor_id: i64,
        day: Weekday,
        slot: &str,
    ) -> Result<DayScheduleView, EditError> {
        self.schedule_editor().toggle_slot(doctor_id, day, slot).await
    }
}

fn required(value: &str, message: &str) -> Result<String, DoctorError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DoctorError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
