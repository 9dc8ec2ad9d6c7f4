//! Wiring of both components onto the in-memory repositories.

use std::sync::Arc;

use tracing::info;

use salonbook_core::{Clock, IdGenerator};
use salonbook_inventory::{Ledger, LedgerConfig, StockItem};
use salonbook_scheduling::{Appointment, ConfigError, Scheduler, SchedulingConfig};

use crate::memory::InMemoryRepository;
use crate::seed::{self, SeedError, SeedReport};

pub type AppointmentStore = Arc<InMemoryRepository<Appointment>>;
pub type StockStore = Arc<InMemoryRepository<StockItem>>;

/// The scheduler and the ledger, each over its own store.
///
/// The two components share the clock and id source but no state.
pub struct Services {
    pub scheduler: Scheduler<AppointmentStore>,
    pub ledger: Ledger<StockStore>,
    appointments: AppointmentStore,
    stock: StockStore,
    ids: Arc<dyn IdGenerator>,
}

impl Services {
    pub fn in_memory(
        scheduling: SchedulingConfig,
        ledger: LedgerConfig,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Result<Self, ConfigError> {
        scheduling.validate()?;

        let appointments: AppointmentStore = Arc::new(InMemoryRepository::new());
        let stock: StockStore = Arc::new(InMemoryRepository::new());

        info!(
            daily_capacity = scheduling.daily_capacity,
            slots = scheduling.available_slots.len(),
            services = scheduling.service_catalog.len(),
            near_expiry_days = ledger.near_expiry_days,
            "services wired"
        );

        Ok(Self {
            scheduler: Scheduler::new(scheduling, appointments.clone(), clock.clone(), ids.clone()),
            ledger: Ledger::new(ledger, stock.clone(), clock, ids.clone()),
            appointments,
            stock,
            ids,
        })
    }

    pub fn seed_demo_data(&self) -> Result<SeedReport, SeedError> {
        seed::load(self.appointments.as_ref(), self.stock.as_ref(), self.ids.as_ref())
    }
}
