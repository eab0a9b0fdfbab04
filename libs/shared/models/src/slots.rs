//! Conversion of time ranges into bookable slot labels.
//!
//! Every schedule editor and booking calendar goes through these functions;
//! slot labels are always zero-padded `HH:MM` so lexical order is time order.

use chrono::{NaiveTime, Timelike};

use crate::schedule::ScheduleError;

/// First hour shown on the management slot grid.
pub const GRID_FIRST_HOUR: u32 = 8;
/// Last hour shown on the management slot grid (inclusive).
pub const GRID_LAST_HOUR: u32 = 20;

pub fn parse_time(value: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| ScheduleError::InvalidTime(value.to_string()))
}

pub fn format_slot(hour: u32, minute: u32) -> String {
    format!("{:02}:{:02}", hour, minute)
}

/// Normalizes a user supplied slot label, e.g. `9:00` becomes `09:00`.
pub fn normalize_slot(value: &str) -> Result<String, ScheduleError> {
    let time = parse_time(value)?;
    Ok(format_slot(time.hour(), time.minute()))
}

/// Slots of `step_minutes` starting on every full hour in `[start_hour, end_hour)`.
pub fn interval_slots(start_hour: u32, end_hour: u32, step_minutes: u32) -> Vec<String> {
    let step = step_minutes.clamp(1, 60);
    let mut slots = Vec::new();

    for hour in start_hour..end_hour {
        let mut minute = 0;
        while minute < 60 {
            slots.push(format_slot(hour, minute));
            minute += step;
        }
    }

    slots
}

/// One slot per hour from the start hour up to (excluding) the end hour.
/// Minutes are ignored, so `09:30`-`12:00` yields `09:00, 10:00, 11:00`.
pub fn hourly_slots(start: &str, end: &str) -> Result<Vec<String>, ScheduleError> {
    let start = parse_time(start)?;
    let end = parse_time(end)?;

    Ok(interval_slots(start.hour(), end.hour(), 60))
}

/// Hourly grid rendered by the schedule editors.
pub fn management_grid() -> Vec<String> {
    (GRID_FIRST_HOUR..=GRID_LAST_HOUR)
        .map(|hour| format_slot(hour, 0))
        .collect()
}
