//! Aggregate counts over the appointment book.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::appointment::{Appointment, AppointmentStatus, CustomerKind};

/// Number of calendar months covered by the trailing histogram.
pub const HISTORY_MONTHS: i32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCount {
    pub service: String,
    pub count: usize,
}

/// Appointments whose `date` falls in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentStatistics {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub new_customers: usize,
    pub returning_customers: usize,
    /// One entry per catalog service, in catalog order.
    pub by_service: Vec<ServiceCount>,
    /// Oldest month first; the last entry is the month containing `today`.
    pub monthly: Vec<MonthlyCount>,
}

pub fn compute(appointments: &[Appointment], catalog: &[String], today: NaiveDate) -> AppointmentStatistics {
    let with_status = |status: AppointmentStatus| appointments.iter().filter(|a| a.status == status).count();
    let with_kind = |kind: CustomerKind| appointments.iter().filter(|a| a.customer_kind == kind).count();

    let by_service = catalog
        .iter()
        .map(|service| ServiceCount {
            service: service.clone(),
            count: appointments.iter().filter(|a| &a.service == service).count(),
        })
        .collect();

    let current = today.year() * 12 + today.month0() as i32;
    let monthly = (0..HISTORY_MONTHS)
        .rev()
        .map(|back| {
            let index = current - back;
            let year = index.div_euclid(12);
            let month = index.rem_euclid(12) as u32 + 1;
            MonthlyCount {
                year,
                month,
                count: appointments
                    .iter()
                    .filter(|a| a.date.year() == year && a.date.month() == month)
                    .count(),
            }
        })
        .collect();

    AppointmentStatistics {
        total: appointments.len(),
        pending: with_status(AppointmentStatus::Pending),
        confirmed: with_status(AppointmentStatus::Confirmed),
        completed: with_status(AppointmentStatus::Completed),
        new_customers: with_kind(CustomerKind::New),
        returning_customers: with_kind(CustomerKind::Returning),
        by_service,
        monthly,
    }
}
