//! Startup wiring and the summary logged once the services are up.

use std::sync::Arc;

use anyhow::Context;
use chrono::{Days, NaiveDate};
use tracing::info;

use salonbook_core::{Clock, IdGenerator};
use salonbook_infra::Services;
use salonbook_scheduling::SchedulingConfig;

use crate::settings::Settings;

/// Snapshot of what the service holds right after startup.
#[derive(Debug, Clone, PartialEq)]
pub struct StartupReport {
    pub services_offered: usize,
    pub appointments: usize,
    pub stock_items: usize,
    pub flagged_stock_items: usize,
    /// First bookable date from today and its free slot count.
    pub next_open_day: Option<(NaiveDate, usize)>,
}

/// Wire the components and load demo data if requested.
pub fn build(settings: &Settings, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> anyhow::Result<Services> {
    let services = Services::in_memory(settings.scheduling.clone(), settings.ledger.clone(), clock, ids)
        .context("invalid scheduling settings")?;

    if settings.seed_demo_data {
        services.seed_demo_data().context("failed to load demo data")?;
    }
    Ok(services)
}

fn next_open_day(config: &SchedulingConfig, from: NaiveDate) -> Option<NaiveDate> {
    (0..7u64)
        .filter_map(|offset| from.checked_add_days(Days::new(offset)))
        .find(|date| !config.is_excluded(*date))
}

pub fn report(services: &Services, today: NaiveDate) -> anyhow::Result<StartupReport> {
    let stats = services.scheduler.compute_statistics()?;
    let stock = services.ledger.compute_statistics()?;
    let alerts = services.ledger.list_alerts()?;

    let next_open_day = match next_open_day(services.scheduler.config(), today) {
        Some(date) => {
            let availability = services.scheduler.list_available_slots(date)?;
            let free = if availability.is_full() { 0 } else { availability.available_slots.len() };
            Some((date, free))
        }
        None => None,
    };

    let report = StartupReport {
        services_offered: services.scheduler.service_catalog().len(),
        appointments: stats.total,
        stock_items: stock.total_items,
        flagged_stock_items: alerts.total_flagged,
        next_open_day,
    };

    info!(
        services_offered = report.services_offered,
        appointments = report.appointments,
        pending = stats.pending,
        stock_items = report.stock_items,
        low_stock = stock.low_stock_count,
        critical_stock = stock.critical_stock_count,
        flagged = report.flagged_stock_items,
        next_open_day = ?report.next_open_day,
        "startup report"
    );
    Ok(report)
}
