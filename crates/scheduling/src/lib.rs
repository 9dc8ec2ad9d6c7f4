//! Appointment scheduling for the salon.
//!
//! Booking rules (excluded weekdays, per-day capacity, one appointment per
//! slot, slot and service catalogs) are pure functions in [`rules`]; the
//! [`Scheduler`] runs them against a repository under a write lock.

pub mod appointment;
pub mod config;
pub mod error;
pub mod rules;
pub mod scheduler;
pub mod statistics;

pub use appointment::{
    Appointment, AppointmentPatch, AppointmentStatus, BookingRequest, CustomerKind,
};
pub use config::{ConfigError, SchedulingConfig, Slot};
pub use error::{SchedulingError, SchedulingResult};
pub use rules::SlotAvailability;
pub use scheduler::{AppointmentRepository, Scheduler};
pub use statistics::{AppointmentStatistics, MonthlyCount, ServiceCount};
