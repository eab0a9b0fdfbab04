use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::slots::{self, hourly_slots, management_grid, parse_time};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid weekday '{0}', expected one of Mon..Sun")]
    InvalidWeekday(String),

    #[error("End time {end} is before start time {start}")]
    InvalidRange { start: String, end: String },

    #[error("{0} is not an available day")]
    DayInactive(Weekday),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }

    pub fn from_chrono(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
            chrono::Weekday::Sun => Weekday::Sun,
        }
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self, Weekday::Sat | Weekday::Sun)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .iter()
            .copied()
            .find(|day| day.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ScheduleError::InvalidWeekday(s.to_string()))
    }
}

/// Availability for one weekday. `slots` is derived from `start`/`end` but can
/// be edited one slot at a time afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub active: bool,
    pub start: String,
    pub end: String,
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotState {
    pub time: String,
    pub open: bool,
}

impl DaySchedule {
    pub fn open(start: &str, end: &str) -> Result<Self, ScheduleError> {
        Ok(Self {
            active: true,
            start: start.to_string(),
            end: end.to_string(),
            slots: hourly_slots(start, end)?,
        })
    }

    pub fn closed(start: &str, end: &str) -> Self {
        Self {
            active: false,
            start: start.to_string(),
            end: end.to_string(),
            slots: Vec::new(),
        }
    }

    pub fn day_off() -> Self {
        Self::closed("00:00", "00:00")
    }

    /// Flips availability. Turning a day off clears its slots, turning it on
    /// regenerates them from the stored range.
    pub fn toggle_active(&mut self) -> Result<bool, ScheduleError> {
        let active = !self.active;
        self.slots = if active {
            hourly_slots(&self.start, &self.end)?
        } else {
            Vec::new()
        };
        self.active = active;
        Ok(active)
    }

    pub fn set_range(&mut self, start: Option<&str>, end: Option<&str>) -> Result<(), ScheduleError> {
        let new_start = start.unwrap_or(&self.start).trim().to_string();
        let new_end = end.unwrap_or(&self.end).trim().to_string();

        if parse_time(&new_end)? < parse_time(&new_start)? {
            return Err(ScheduleError::InvalidRange { start: new_start, end: new_end });
        }

        self.slots = if self.active {
            hourly_slots(&new_start, &new_end)?
        } else {
            Vec::new()
        };
        self.start = new_start;
        self.end = new_end;
        Ok(())
    }

    /// Opens or closes a single slot, returning whether it is open afterwards.
    pub fn toggle_slot(&mut self, slot: &str, day: Weekday) -> Result<bool, ScheduleError> {
        if !self.active {
            return Err(ScheduleError::DayInactive(day));
        }

        let slot = slots::normalize_slot(slot)?;
        if let Some(index) = self.slots.iter().position(|s| *s == slot) {
            self.slots.remove(index);
            Ok(false)
        } else {
            self.slots.push(slot);
            self.slots.sort();
            Ok(true)
        }
    }

    pub fn grid(&self) -> Vec<SlotState> {
        management_grid()
            .into_iter()
            .map(|time| SlotState {
                open: self.slots.contains(&time),
                time,
            })
            .collect()
    }
}

/// Weekly availability keyed by weekday abbreviation. Always exactly seven days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(rename = "Mon")]
    pub mon: DaySchedule,
    #[serde(rename = "Tue")]
    pub tue: DaySchedule,
    #[serde(rename = "Wed")]
    pub wed: DaySchedule,
    #[serde(rename = "Thu")]
    pub thu: DaySchedule,
    #[serde(rename = "Fri")]
    pub fri: DaySchedule,
    #[serde(rename = "Sat")]
    pub sat: DaySchedule,
    #[serde(rename = "Sun")]
    pub sun: DaySchedule,
}

impl WeeklySchedule {
    pub fn from_fn<F>(mut day_for: F) -> Self
    where
        F: FnMut(Weekday) -> DaySchedule,
    {
        Self {
            mon: day_for(Weekday::Mon),
            tue: day_for(Weekday::Tue),
            wed: day_for(Weekday::Wed),
            thu: day_for(Weekday::Thu),
            fri: day_for(Weekday::Fri),
            sat: day_for(Weekday::Sat),
            sun: day_for(Weekday::Sun),
        }
    }

    pub fn day(&self, day: Weekday) -> &DaySchedule {
        match day {
            Weekday::Mon => &self.mon,
            Weekday::Tue => &self.tue,
            Weekday::Wed => &self.wed,
            Weekday::Thu => &self.thu,
            Weekday::Fri => &self.fri,
            Weekday::Sat => &self.sat,
            Weekday::Sun => &self.sun,
        }
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut DaySchedule {
        match day {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
            Weekday::Sun => &mut self.sun,
        }
    }

    pub fn active_days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .iter()
            .copied()
            .filter(|day| self.day(*day).active)
            .collect()
    }
}

/// Records that own a weekly schedule (doctors and lab tests).
pub trait Scheduled {
    fn schedule(&self) -> &WeeklySchedule;
    fn schedule_mut(&mut self) -> &mut WeeklySchedule;
}

/// Body of a start/end range update; omitted bounds keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangeRequest {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotToggleRequest {
    pub slot: String,
}

/// One weekday of a schedule together with its management grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayScheduleView {
    pub day: Weekday,
    #[serde(flatten)]
    pub schedule: DaySchedule,
    pub grid: Vec<SlotState>,
}

impl DayScheduleView {
    pub fn new(day: Weekday, schedule: &DaySchedule) -> Self {
        Self {
            day,
            grid: schedule.grid(),
            schedule: schedule.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::Value;

    fn nine_to_five() -> WeeklySchedule {
        WeeklySchedule::from_fn(|day| {
            if day.is_weekend() {
                DaySchedule::day_off()
            } else {
                DaySchedule::open("09:00", "17:00").unwrap()
            }
        })
    }

    #[test]
    fn test_schedule_serializes_seven_weekday_keys() {
        let value = serde_json::to_value(nine_to_five()).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();

        assert_eq!(keys.len(), 7);
        for day in Weekday::ALL {
            assert!(value.get(day.as_str()).is_some(), "missing {}", day);
        }
    }

    #[test]
    fn test_schedule_missing_day_fails_to_parse() {
        let mut value = serde_json::to_value(nine_to_five()).unwrap();
        value.as_object_mut().unwrap().remove("Sun");

        assert!(serde_json::from_value::<WeeklySchedule>(value).is_err());
    }

    #[test]
    fn test_toggle_off_clears_and_on_regenerates() {
        let mut day = DaySchedule::open("10:00", "13:00").unwrap();

        assert_eq!(day.toggle_active().unwrap(), false);
        assert!(day.slots.is_empty());
        assert_eq!(day.start, "10:00");

        assert_eq!(day.toggle_active().unwrap(), true);
        assert_eq!(day.slots, vec!["10:00", "11:00", "12:00"]);
    }

    #[test]
    fn test_set_range_regenerates_slots() {
        let mut day = DaySchedule::open("09:00", "17:00").unwrap();
        day.set_range(None, Some("11:00")).unwrap();

        assert_eq!(day.end, "11:00");
        assert_eq!(day.slots, vec!["09:00", "10:00"]);
    }

    #[test]
    fn test_set_range_on_inactive_day_keeps_slots_empty() {
        let mut day = DaySchedule::day_off();
        day.set_range(Some("08:00"), Some("12:00")).unwrap();

        assert!(!day.active);
        assert!(day.slots.is_empty());
        assert_eq!(day.start, "08:00");
    }

    #[test]
    fn test_set_range_rejects_inverted_range() {
        let mut day = DaySchedule::open("09:00", "17:00").unwrap();
        assert_matches!(
            day.set_range(Some("18:00"), None),
            Err(ScheduleError::InvalidRange { .. })
        );
        assert_eq!(day.start, "09:00");
    }

    #[test]
    fn test_toggle_slot_keeps_slots_sorted() {
        let mut day = DaySchedule::open("09:00", "12:00").unwrap();

        assert_eq!(day.toggle_slot("10:00", Weekday::Mon).unwrap(), false);
        assert_eq!(day.slots, vec!["09:00", "11:00"]);

        assert_eq!(day.toggle_slot("08:00", Weekday::Mon).unwrap(), true);
        assert_eq!(day.toggle_slot("10:00", Weekday::Mon).unwrap(), true);
        assert_eq!(day.slots, vec!["08:00", "09:00", "10:00", "11:00"]);
    }

    #[test]
    fn test_toggle_slot_on_inactive_day_fails() {
        let mut day = DaySchedule::day_off();
        assert_matches!(
            day.toggle_slot("09:00", Weekday::Sun),
            Err(ScheduleError::DayInactive(Weekday::Sun))
        );
    }

    #[test]
    fn test_grid_marks_open_slots() {
        let day = DaySchedule::open("09:00", "11:00").unwrap();
        let open: Vec<String> = day
            .grid()
            .into_iter()
            .filter(|slot| slot.open)
            .map(|slot| slot.time)
            .collect();

        assert_eq!(open, vec!["09:00", "10:00"]);
    }

    #[test]
    fn test_weekday_parse() {
        assert_eq!("tue".parse::<Weekday>().unwrap(), Weekday::Tue);
        assert_matches!("Funday".parse::<Weekday>(), Err(ScheduleError::InvalidWeekday(_)));
        let value: Value = serde_json::to_value(Weekday::Sat).unwrap();
        assert_eq!(value, "Sat");
    }

    #[test]
    fn test_day_view_flattens_schedule() {
        let day = DaySchedule::open("09:00", "10:00").unwrap();
        let value = serde_json::to_value(DayScheduleView::new(Weekday::Fri, &day)).unwrap();

        assert_eq!(value["day"], "Fri");
        assert_eq!(value["active"], true);
        assert_eq!(value["slots"], serde_json::json!(["09:00"]));
        assert_eq!(value["grid"].as_array().unwrap().len(), 13);
    }
}
