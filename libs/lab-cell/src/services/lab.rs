use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::{keys, AppState, Collection};
use shared_models::schedule::{DayScheduleView, RangeRequest, Weekday};
use shared_utils::ids::next_timestamp_id;
use shared_utils::latency::simulate_latency;
use shared_utils::schedule_editor::{EditError, ScheduleEditor};

use crate::models::{
    default_schedule, seed_labs, CreateLabRequest, DeleteLabResponse, LabError, LabTest,
    UpdateLabRequest, CATEGORIES, DEFAULT_CATEGORY,
};

pub struct LabService {
    config: AppConfig,
    labs: Collection<LabTest>,
}

impl LabService {
    pub fn new(state: &AppState) -> Self {
        Self {
            config: state.config.clone(),
            labs: Collection::new(state.store.clone(), keys::HOSPITAL_LABS, seed_labs),
        }
    }

    pub async fn list_labs(&self) -> Vec<LabTest> {
        self.labs.list().await
    }

    pub async fn saved_labs(&self) -> Vec<LabTest> {
        self.labs.persisted().await
    }

    pub async fn get_lab(&self, lab_id: i64) -> Result<LabTest, LabError> {
        self.labs.get(lab_id).await.ok_or(LabError::NotFound(lab_id))
    }

    pub async fn create_lab(&self, request: CreateLabRequest) -> Result<LabTest, LabError> {
        let name = required(&request.name, "Test name is required")?;
        let tat = required(&request.tat, "Turnaround time is required")?;
        let category = resolve_category(request.category.as_deref())?;

        debug!("Creating lab test {} ({})", name, category);
        simulate_latency(&self.config).await;

        let mut labs = self.labs.persisted().await;
        let lab = LabTest {
            id: next_timestamp_id(labs.iter().map(|l| l.id)),
            name,
            category,
            price: request.price,
            tat,
            home: request.home,
            instructions: request
                .instructions
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
            schedule: default_schedule()?,
        };

        labs.push(lab.clone());
        self.labs.save_all(&labs).await?;

        info!("Lab test {} added with id {}", lab.name, lab.id);
        Ok(lab)
    }

    pub async fn update_lab(&self, lab_id: i64, request: UpdateLabRequest) -> Result<LabTest, LabError> {
        let name = request
            .name
            .as_deref()
            .map(|value| required(value, "Test name is required"))
            .transpose()?;
        let category = request
            .category
            .as_deref()
            .map(|value| resolve_category(Some(value)))
            .transpose()?;

        let updated = self
            .labs
            .update(lab_id, |lab| {
                if let Some(name) = name {
                    lab.name = name;
                }
                if let Some(category) = category {
                    lab.category = category;
                }
                if let Some(price) = request.price {
                    lab.price = price;
                }
                if let Some(tat) = request.tat {
                    lab.tat = tat;
                }
                if let Some(home) = request.home {
                    lab.home = home;
                }
                if let Some(instructions) = request.instructions {
                    let instructions = instructions.trim().to_string();
                    lab.instructions = (!instructions.is_empty()).then_some(instructions);
                }
                Ok::<_, LabError>(lab.clone())
            })
            .await?;

        updated.ok_or(LabError::NotFound(lab_id))
    }

    pub async fn delete_lab(&self, lab_id: i64) -> Result<DeleteLabResponse, LabError> {
        let (removed, remaining) = self
            .labs
            .remove(lab_id)
            .await?
            .ok_or(LabError::NotFound(lab_id))?;

        info!("Deleted lab test {} ({})", removed.name, removed.id);

        Ok(DeleteLabResponse {
            deleted_id: removed.id,
            next_selected_id: remaining.first().map(|l| l.id),
            remaining,
        })
    }

    fn schedule_editor(&self) -> ScheduleEditor<'_, LabTest> {
        ScheduleEditor::new(&self.labs, "Lab test")
    }

    pub async fn day_schedule(&self, lab_id: i64, day: Weekday) -> Result<DayScheduleView, EditError> {
        self.schedule_editor().day(lab_id, day).await
    }

    pub async fn toggle_day(&self, lab_id: i64, day: Weekday) -> Result<DayScheduleView, EditError> {
        self.schedule_editor().toggle_day(lab_id, day).await
    }

    pub async fn set_day_range(
        &self,
        lab_id: i64,
        day: Weekday,
        range: &RangeRequest,
    ) -> Result<DayScheduleView, EditError> {
        self.schedule_editor().set_range(lab_id, day, range).await
    }

    pub async fn toggle_slot(&self, lab_id: i64, day: Weekday, slot: &str) -> Result<DayScheduleView, EditError> {
        self.schedule_editor().toggle_slot(lab_id, day, slot).await
    }
}

fn resolve_category(value: Option<&str>) -> Result<String, LabError> {
    match value.map(str::trim) {
        None | Some("") => Ok(DEFAULT_CATEGORY.to_string()),
        Some(value) => CATEGORIES
            .iter()
            .find(|known| known.eq_ignore_ascii_case(value))
            .map(|known| known.to_string())
            .ok_or_else(|| LabError::Validation(format!("Unknown category: {}", value))),
    }
}

fn required(value: &str, message: &str) -> Result<String, LabError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LabError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}
