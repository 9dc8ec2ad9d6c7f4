use chrono::NaiveDate;
use thiserror::Error;

use salonbook_auth::AuthzError;
use salonbook_core::StoreError;

use crate::config::Slot;

pub type SchedulingResult<T> = Result<T, SchedulingError>;

/// Booking failures. All are recoverable by the caller; none leave partial state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("appointment not found")]
    NotFound,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("appointments cannot be booked on {} ({})", .0, .0.format("%A"))]
    ExcludedDay(NaiveDate),

    #[error("{date} is fully booked ({capacity} appointments per day)")]
    DayFull { date: NaiveDate, capacity: usize },

    #[error("slot {slot} on {date} is already taken")]
    SlotTaken { date: NaiveDate, slot: Slot },

    #[error("'{0}' is not an offered slot")]
    InvalidSlot(String),

    #[error("'{0}' is not an offered service")]
    InvalidService(String),

    #[error(transparent)]
    Forbidden(#[from] AuthzError),

    #[error("appointment store: {0}")]
    Store(#[from] StoreError),
}

impl SchedulingError {
    /// Stable machine-readable code for transport layers and logs.
    pub fn code(&self) -> &'static str {
        match self {
            SchedulingError::NotFound => "not_found",
            SchedulingError::MissingField(_) => "missing_field",
            SchedulingError::ExcludedDay(_) => "excluded_day",
            SchedulingError::DayFull { .. } => "day_full",
            SchedulingError::SlotTaken { .. } => "slot_taken",
            SchedulingError::InvalidSlot(_) => "invalid_slot",
            SchedulingError::InvalidService(_) => "invalid_service",
            SchedulingError::Forbidden(_) => "forbidden",
            SchedulingError::Store(_) => "store_error",
        }
    }
}
