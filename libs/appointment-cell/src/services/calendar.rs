use chrono::{Datelike, Days, Local, NaiveDate, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::{keys, AppState, Collection};
use shared_models::schedule::Weekday;
use shared_models::slots::{interval_slots, normalize_slot};
use shared_utils::ids::next_timestamp_id;
use shared_utils::latency::simulate_latency;

use crate::models::{
    AppointmentError, BookSlotRequest, Booking, CalendarDay, CalendarKind, CalendarSlot,
    Confirmation, DaySlots, WeekQuery, WeekView,
};
use crate::services::catalogue::{mock_lab_offerings, mock_specialists};
use crate::services::receipt::confirmation_for;

/// Moves `date` by a signed number of days, or `None` past the calendar's range.
pub fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    shift_days(date, -i64::from(date.weekday().num_days_from_monday()))
}

/// Monday-to-Sunday view of the week containing `anchor`. `None` when the
/// week or its neighbours fall outside the representable dates.
pub fn week_view(anchor: NaiveDate, today: NaiveDate) -> Option<WeekView> {
    let start = week_start(anchor)?;
    let end = shift_days(start, 6)?;
    let previous = shift_days(start, -7)?;
    let next = shift_days(start, 7)?;

    let days = (0..7)
        .map(|offset| {
            let date = shift_days(start, offset)?;
            let weekday = Weekday::from_chrono(date.weekday());
            Some(CalendarDay {
                date,
                weekday,
                is_today: date == today,
                is_weekend: weekday.is_weekend(),
                bookable: !weekday.is_weekend(),
            })
        })
        .collect::<Option<Vec<_>>>()?;

    Some(WeekView {
        start,
        end,
        label: format!("{} - {}", start.format("%b %d"), end.format("%b %d, %Y")),
        previous,
        next,
        days,
    })
}

fn slot_seed(kind: CalendarKind, resource_id: i64, date: NaiveDate) -> u64 {
    let kind_tag: u64 = match kind {
        CalendarKind::Doctor => 0x0D0C,
        CalendarKind::Lab => 0x0AB5,
    };
    (resource_id as u64)
        .wrapping_mul(1_000_003)
        .wrapping_add((date.num_days_from_ce() as u64).wrapping_mul(7_919))
        ^ kind_tag
}

/// Slots offered on `date`. Occupancy is simulated but stable for a given
/// resource and date; `held` times are always booked.
pub fn day_slots(
    kind: CalendarKind,
    resource_id: i64,
    date: NaiveDate,
    today: NaiveDate,
    held: &[String],
) -> Vec<CalendarSlot> {
    let profile = kind.profile();
    let mut rng = StdRng::seed_from_u64(slot_seed(kind, resource_id, date));

    let mut slots: Vec<CalendarSlot> = interval_slots(profile.first_hour, profile.last_hour, profile.step_minutes)
        .into_iter()
        .map(|time| {
            let simulated = rng.gen_bool(profile.booked_probability);
            CalendarSlot {
                is_booked: simulated || held.contains(&time),
                duration: format!("{}min", profile.step_minutes),
                time,
            }
        })
        .collect();

    if date == today {
        slots.truncate(profile.today_limit);
    }
    slots
}

pub struct CalendarService {
    config: AppConfig,
    bookings: Collection<Booking>,
}

impl CalendarService {
    pub fn new(state: &AppState) -> Self {
        Self {
            config: state.config.clone(),
            bookings: Collection::new(state.store.clone(), keys::USER_BOOKINGS, Vec::new),
        }
    }

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn week(&self, query: &WeekQuery) -> Result<WeekView, AppointmentError> {
        let today = Self::today();
        let base = query.date.unwrap_or(today);
        let offset = query.offset.unwrap_or(0);

        offset
            .checked_mul(7)
            .and_then(|days| shift_days(base, days))
            .and_then(|anchor| week_view(anchor, today))
            .ok_or(AppointmentError::WeekOutOfRange { date: base, offset })
    }

    async fn held_times(&self, kind: CalendarKind, resource_id: i64, date: NaiveDate) -> Vec<String> {
        self.bookings
            .list()
            .await
            .into_iter()
            .filter(|b| b.kind == kind && b.resource_id == resource_id && b.date == date)
            .map(|b| b.time)
            .collect()
    }

    pub async fn slots(&self, kind: CalendarKind, resource_id: i64, date: NaiveDate) -> DaySlots {
        let weekday = Weekday::from_chrono(date.weekday());
        if weekday.is_weekend() {
            return DaySlots {
                kind,
                resource_id,
                date,
                bookable: false,
                slots: Vec::new(),
            };
        }

        let held = self.held_times(kind, resource_id, date).await;
        DaySlots {
            kind,
            resource_id,
            date,
            bookable: true,
            slots: day_slots(kind, resource_id, date, Self::today(), &held),
        }
    }

    /// Confirms a slot and records it under `user_bookings`.
    pub async fn book(
        &self,
        kind: CalendarKind,
        request: BookSlotRequest,
    ) -> Result<Confirmation, AppointmentError> {
        let (date, time) = match (request.date, request.time.as_deref().map(str::trim)) {
            (Some(date), Some(time)) if !time.is_empty() => (date, normalize_slot(time)?),
            _ => return Err(AppointmentError::MissingSelection),
        };

        if Weekday::from_chrono(date.weekday()).is_weekend() {
            return Err(AppointmentError::Weekend(date));
        }

        let offered = self.slots(kind, request.resource_id, date).await;
        let free = offered
            .slots
            .iter()
            .any(|slot| slot.time == time && !slot.is_booked);
        if !free {
            return Err(AppointmentError::SlotNotAvailable { date, time });
        }

        debug!("Booking {} {} on {} at {}", kind, request.resource_id, date, time);
        simulate_latency(&self.config).await;

        let mut bookings = self.bookings.list().await;
        let booking = describe_booking(
            next_timestamp_id(bookings.iter().map(|b| b.id)),
            kind,
            &request,
            date,
            time,
        );
        bookings.push(booking.clone());
        self.bookings.save_all(&bookings).await?;

        info!("Booking {} confirmed for {} on {}", booking.id, booking.name, booking.date);
        Ok(confirmation_for(&booking))
    }

    pub async fn bookings(&self) -> Vec<Booking> {
        self.bookings.list().await
    }

    pub async fn booking(&self, booking_id: i64) -> Result<Booking, AppointmentError> {
        self.bookings
            .get(booking_id)
            .await
            .ok_or(AppointmentError::BookingNotFound(booking_id))
    }
}

/// Fills in display details from the catalogues, falling back to what the
/// client sent for resources that are not listed.
fn describe_booking(
    id: i64,
    kind: CalendarKind,
    request: &BookSlotRequest,
    date: NaiveDate,
    time: String,
) -> Booking {
    let fallback_hospital = request.hospital.clone().unwrap_or_default();

    let (name, hospital, specialty, price) = match kind {
        CalendarKind::Doctor => match mock_specialists().into_iter().find(|s| s.id == request.resource_id) {
            Some(s) => (s.name, s.hospital.name, Some(s.specialty), None),
            None => (
                request.name.clone().unwrap_or_else(|| "Doctor".to_string()),
                fallback_hospital,
                None,
                None,
            ),
        },
        CalendarKind::Lab => match mock_lab_offerings().into_iter().find(|l| l.id == request.resource_id) {
            Some(l) => (l.name, l.hospital, None, Some(l.price)),
            None => (
                request.name.clone().unwrap_or_else(|| "Test".to_string()),
                fallback_hospital,
                None,
                None,
            ),
        },
    };

    Booking {
        id,
        kind,
        resource_id: request.resource_id,
        name,
        hospital,
        date,
        time,
        specialty,
        price,
        created_at: Utc::now(),
    }
}
