use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use shared_database::{Collection, Record, StoreError};
use shared_models::error::AppError;
use shared_models::schedule::{
    DayScheduleView, RangeRequest, ScheduleError, Scheduled, Weekday,
};

#[derive(Error, Debug)]
pub enum EditError {
    #[error("{label} {id} not found")]
    NotFound { label: &'static str, id: i64 },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<EditError> for AppError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::NotFound { .. } => AppError::NotFound(err.to_string()),
            EditError::Schedule(err) => AppError::from(err),
            EditError::Store(err) => AppError::from(err),
        }
    }
}

/// Per-weekday schedule editing for any stored record that owns a weekly schedule.
pub struct ScheduleEditor<'a, T> {
    records: &'a Collection<T>,
    label: &'static str,
}

impl<'a, T> ScheduleEditor<'a, T>
where
    T: Record + Scheduled + Serialize + DeserializeOwned,
{
    pub fn new(records: &'a Collection<T>, label: &'static str) -> Self {
        Self { records, label }
    }

    fn not_found(&self, id: i64) -> EditError {
        EditError::NotFound { label: self.label, id }
    }

    pub async fn day(&self, id: i64, day: Weekday) -> Result<DayScheduleView, EditError> {
        let record = self.records.get(id).await.ok_or_else(|| self.not_found(id))?;
        Ok(DayScheduleView::new(day, record.schedule().day(day)))
    }

    pub async fn toggle_day(&self, id: i64, day: Weekday) -> Result<DayScheduleView, EditError> {
        let view = self
            .records
            .update(id, |record: &mut T| {
                let schedule = record.schedule_mut().day_mut(day);
                let active = schedule.toggle_active()?;
                debug!("{} {} {} is now {}", self.label, id, day, if active { "active" } else { "off" });
                Ok::<_, EditError>(DayScheduleView::new(day, schedule))
            })
            .await?;

        view.ok_or_else(|| self.not_found(id))
    }

    pub async fn set_range(
        &self,
        id: i64,
        day: Weekday,
        range: &RangeRequest,
    ) -> Result<DayScheduleView, EditError> {
        let view = self
            .records
            .update(id, |record: &mut T| {
                let schedule = record.schedule_mut().day_mut(day);
                schedule.set_range(range.start.as_deref(), range.end.as_deref())?;
                Ok::<_, EditError>(DayScheduleView::new(day, schedule))
            })
            .await?;

        let view = view.ok_or_else(|| self.not_found(id))?;
        info!(
            "{} {} {} range set to {}-{}",
            self.label, id, day, view.schedule.start, view.schedule.end
        );
        Ok(view)
    }

    pub async fn toggle_slot(
        &self,
        id: i64,
        day: Weekday,
        slot: &str,
    ) -> Result<DayScheduleView, EditError> {
        let view = self
            .records
            .update(id, |record: &mut T| {
                let schedule = record.schedule_mut().day_mut(day);
                schedule.toggle_slot(slot, day)?;
                Ok::<_, EditError>(DayScheduleView::new(day, schedule))
            })
            .await?;

        view.ok_or_else(|| self.not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use serde::Deserialize;
    use shared_database::LocalStore;
    use shared_models::schedule::{DaySchedule, WeeklySchedule};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Clinic {
        id: i64,
        schedule: WeeklySchedule,
    }

    impl Record for Clinic {
        fn id(&self) -> i64 {
            self.id
        }
    }

    impl Scheduled for Clinic {
        fn schedule(&self) -> &WeeklySchedule {
            &self.schedule
        }

        fn schedule_mut(&mut self) -> &mut WeeklySchedule {
            &mut self.schedule
        }
    }

    fn seed_clinics() -> Vec<Clinic> {
        vec![Clinic {
            id: 5,
            schedule: WeeklySchedule::from_fn(|day| {
                if day == Weekday::Sun {
                    DaySchedule::day_off()
                } else {
                    DaySchedule::open("09:00", "12:00").unwrap()
                }
            }),
        }]
    }

    fn clinics() -> Collection<Clinic> {
        Collection::new(Arc::new(LocalStore::in_memory()), "clinics", seed_clinics)
    }

    #[tokio::test]
    async fn test_toggle_day_persists() {
        let records = clinics();
        let editor = ScheduleEditor::new(&records, "Clinic");

        let view = editor.toggle_day(5, Weekday::Mon).await.unwrap();
        assert!(!view.schedule.active);

        let stored = records.persisted().await;
        assert!(stored[0].schedule.mon.slots.is_empty());
    }

    #[tokio::test]
    async fn test_set_range_only_touches_one_day() {
        let records = clinics();
        let editor = ScheduleEditor::new(&records, "Clinic");

        let range = RangeRequest { start: None, end: Some("10:00".to_string()) };
        let view = editor.set_range(5, Weekday::Tue, &range).await.unwrap();

        assert_eq!(view.schedule.slots, vec!["09:00"]);
        assert_eq!(records.get(5).await.unwrap().schedule.wed.slots.len(), 3);
    }

    #[tokio::test]
    async fn test_slot_toggle_on_day_off_is_rejected() {
        let records = clinics();
        let editor = ScheduleEditor::new(&records, "Clinic");

        assert_matches!(
            editor.toggle_slot(5, Weekday::Sun, "09:00").await,
            Err(EditError::Schedule(ScheduleError::DayInactive(Weekday::Sun)))
        );
    }

    #[tokio::test]
    async fn test_unknown_record() {
        let records = clinics();
        let editor = ScheduleEditor::new(&records, "Clinic");

        let err = editor.day(77, Weekday::Mon).await.unwrap_err();
        assert_eq!(err.to_string(), "Clinic 77 not found");
    }
}
