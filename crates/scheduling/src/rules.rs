//! Pure booking rules.
//!
//! Every function here takes the current appointment collection as a slice and
//! returns either a decision or the first violated rule. Nothing is mutated, so
//! a rejected request never leaves partial state behind.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use salonbook_core::AppointmentId;

use crate::appointment::{Appointment, AppointmentPatch, AppointmentStatus, BookingRequest};
use crate::config::{SchedulingConfig, Slot};
use crate::error::{SchedulingError, SchedulingResult};

/// Free slots for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub available_slots: Vec<Slot>,
    pub booked_count: usize,
    pub daily_capacity: usize,
}

impl SlotAvailability {
    /// Free slots may remain listed on a day that already hit its capacity.
    pub fn is_full(&self) -> bool {
        self.booked_count >= self.daily_capacity
    }
}

fn required_text(value: &Option<String>, field: &'static str) -> SchedulingResult<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(SchedulingError::MissingField(field)),
    }
}

fn optional_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Check that `raw_slot` on `date` can be booked.
///
/// Order: excluded weekday, daily capacity, slot taken, slot offered.
/// `ignoring` leaves one appointment out of the day's bookings (used when an
/// existing appointment is moved).
pub fn check_placement(
    config: &SchedulingConfig,
    existing: &[Appointment],
    date: NaiveDate,
    raw_slot: &str,
    ignoring: Option<AppointmentId>,
) -> SchedulingResult<Slot> {
    if config.is_excluded(date) {
        return Err(SchedulingError::ExcludedDay(date));
    }

    let booked: Vec<&Appointment> = existing
        .iter()
        .filter(|a| a.date == date && Some(a.id) != ignoring)
        .collect();

    if booked.len() >= config.daily_capacity {
        return Err(SchedulingError::DayFull {
            date,
            capacity: config.daily_capacity,
        });
    }

    let parsed = raw_slot.parse::<Slot>().ok();

    if let Some(slot) = parsed {
        if booked.iter().any(|a| a.slot == slot) {
            return Err(SchedulingError::SlotTaken { date, slot });
        }
    }

    match parsed {
        Some(slot) if config.offers_slot(slot) => Ok(slot),
        _ => Err(SchedulingError::InvalidSlot(raw_slot.to_string())),
    }
}

pub fn check_service(config: &SchedulingConfig, service: &str) -> SchedulingResult<()> {
    if config.offers_service(service) {
        Ok(())
    } else {
        Err(SchedulingError::InvalidService(service.to_string()))
    }
}

/// Validate a booking request and build the pending appointment.
pub fn book(
    config: &SchedulingConfig,
    existing: &[Appointment],
    request: &BookingRequest,
    id: AppointmentId,
    now: DateTime<Utc>,
) -> SchedulingResult<Appointment> {
    let customer_name = required_text(&request.customer_name, "customer_name")?;
    let email = required_text(&request.email, "email")?;
    let date = request.date.ok_or(SchedulingError::MissingField("date"))?;
    let raw_slot = required_text(&request.slot, "slot")?;
    let service = required_text(&request.service, "service")?;
    let customer_kind = request
        .customer_kind
        .ok_or(SchedulingError::MissingField("customer_kind"))?;

    let slot = check_placement(config, existing, date, &raw_slot, None)?;
    check_service(config, &service)?;

    Ok(Appointment {
        id,
        customer_name,
        email,
        phone: optional_text(&request.phone),
        date,
        slot,
        service,
        customer_kind,
        status: AppointmentStatus::Pending,
        notes: optional_text(&request.notes),
        photo: request.photo.clone(),
        created_at: now,
        updated_at: now,
    })
}

/// Validate a patch against `current` and return the updated appointment.
///
/// A changed date or slot is re-checked against the target day exactly like a
/// new booking, with `current` itself left out of the count.
pub fn apply_patch(
    config: &SchedulingConfig,
    existing: &[Appointment],
    current: &Appointment,
    patch: &AppointmentPatch,
    now: DateTime<Utc>,
) -> SchedulingResult<Appointment> {
    let mut next = current.clone();

    if patch.customer_name.is_some() {
        next.customer_name = required_text(&patch.customer_name, "customer_name")?;
    }
    if patch.email.is_some() {
        next.email = required_text(&patch.email, "email")?;
    }

    if patch.reschedules() {
        let date = patch.date.unwrap_or(current.date);
        let raw_slot = match &patch.slot {
            Some(raw) => raw.trim().to_string(),
            None => current.slot.to_string(),
        };
        next.date = date;
        next.slot = check_placement(config, existing, date, &raw_slot, Some(current.id))?;
    }

    if let Some(service) = &patch.service {
        let service = service.trim();
        check_service(config, service)?;
        next.service = service.to_string();
    }

    if let Some(kind) = patch.customer_kind {
        next.customer_kind = kind;
    }
    if let Some(status) = patch.status {
        next.status = status;
    }

    if let Some(phone) = &patch.phone {
        next.phone = optional_text(phone);
    }
    if let Some(notes) = &patch.notes {
        next.notes = optional_text(notes);
    }
    if let Some(photo) = &patch.photo {
        next.photo = photo.clone();
    }

    next.updated_at = now;
    Ok(next)
}

/// Offered slots not yet booked on `date`, in catalog order.
pub fn availability(
    config: &SchedulingConfig,
    existing: &[Appointment],
    date: NaiveDate,
) -> SchedulingResult<SlotAvailability> {
    if config.is_excluded(date) {
        return Err(SchedulingError::ExcludedDay(date));
    }

    let booked: Vec<Slot> = existing
        .iter()
        .filter(|a| a.date == date)
        .map(|a| a.slot)
        .collect();

    let available_slots = config
        .available_slots
        .iter()
        .copied()
        .filter(|slot| !booked.contains(slot))
        .collect();

    Ok(SlotAvailability {
        available_slots,
        booked_count: booked.len(),
        daily_capacity: config.daily_capacity,
    })
}
