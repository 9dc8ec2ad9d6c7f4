use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use salonbook_auth::{Principal, Role, authorize, require_admin};
use salonbook_core::{AppointmentId, Clock, IdGenerator, Repository};

use crate::appointment::{Appointment, AppointmentPatch, BookingRequest};
use crate::config::SchedulingConfig;
use crate::error::{SchedulingError, SchedulingResult};
use crate::rules::{self, SlotAvailability};
use crate::statistics::{self, AppointmentStatistics};

/// Storage for the appointment book.
pub trait AppointmentRepository: Repository<Appointment> {}

impl<T> AppointmentRepository for T where T: Repository<Appointment> + ?Sized {}

/// Owns the appointment book and enforces the booking rules.
///
/// Mutating operations hold `write_lock` for their whole
/// read-validate-write sequence, so capacity and slot exclusivity hold under
/// concurrent callers. Reads go straight to the repository snapshot.
pub struct Scheduler<R> {
    config: SchedulingConfig,
    repo: R,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    write_lock: Mutex<()>,
}

impl<R> Scheduler<R>
where
    R: AppointmentRepository,
{
    pub fn new(config: SchedulingConfig, repo: R, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            config,
            repo,
            clock,
            ids,
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &SchedulingConfig {
        &self.config
    }

    /// Offered services, in catalog order. Public; needs no principal.
    pub fn service_catalog(&self) -> &[String] {
        &self.config.service_catalog
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        // The guard protects no data, so a poisoned lock is still usable.
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All appointments ordered by date, slot, then creation time.
    pub fn list_appointments(&self) -> SchedulingResult<Vec<Appointment>> {
        let mut all = self.repo.list()?;
        all.sort_by(|a, b| (a.date, a.slot, a.created_at).cmp(&(b.date, b.slot, b.created_at)));
        debug!(count = all.len(), "listed appointments");
        Ok(all)
    }

    pub fn get_appointment(&self, id: AppointmentId) -> SchedulingResult<Appointment> {
        self.repo.get(&id)?.ok_or(SchedulingError::NotFound)
    }

    /// Book a new appointment. Any authenticated caller may book.
    pub fn create_appointment(&self, principal: &Principal, request: BookingRequest) -> SchedulingResult<Appointment> {
        authorize(principal, Role::Customer, "appointments.create")?;

        let _guard = self.lock_writes();
        let existing = self.repo.list()?;
        let id = AppointmentId::from_uuid(self.ids.next_id());

        let appointment = rules::book(&self.config, &existing, &request, id, self.clock.now())
            .inspect_err(|e| warn!(code = e.code(), error = %e, "booking rejected"))?;

        self.repo.insert(appointment.clone())?;
        info!(
            appointment_id = %appointment.id,
            date = %appointment.date,
            slot = %appointment.slot,
            service = %appointment.service,
            "appointment booked"
        );
        Ok(appointment)
    }

    /// Apply a partial update. Admin only.
    pub fn update_appointment(
        &self,
        principal: &Principal,
        id: AppointmentId,
        patch: AppointmentPatch,
    ) -> SchedulingResult<Appointment> {
        require_admin(principal, "appointments.update")?;

        let _guard = self.lock_writes();
        let current = self.repo.get(&id)?.ok_or(SchedulingError::NotFound)?;
        let existing = if patch.reschedules() { self.repo.list()? } else { Vec::new() };

        let updated = rules::apply_patch(&self.config, &existing, &current, &patch, self.clock.now())
            .inspect_err(|e| warn!(appointment_id = %id, code = e.code(), error = %e, "update rejected"))?;

        self.repo.update(updated.clone())?;
        info!(
            appointment_id = %id,
            status = %updated.status,
            date = %updated.date,
            slot = %updated.slot,
            "appointment updated"
        );
        Ok(updated)
    }

    /// Permanently remove an appointment. Admin only.
    pub fn delete_appointment(&self, principal: &Principal, id: AppointmentId) -> SchedulingResult<()> {
        require_admin(principal, "appointments.delete")?;

        let _guard = self.lock_writes();
        match self.repo.remove(&id)? {
            Some(removed) => {
                info!(appointment_id = %id, date = %removed.date, slot = %removed.slot, "appointment deleted");
                Ok(())
            }
            None => Err(SchedulingError::NotFound),
        }
    }

    /// Replace the photo reference on an appointment. Any authenticated caller.
    pub fn attach_photo(
        &self,
        principal: &Principal,
        id: AppointmentId,
        photo: Option<String>,
    ) -> SchedulingResult<Appointment> {
        authorize(principal, Role::Customer, "appointments.photo")?;

        let _guard = self.lock_writes();
        let mut appointment = self.repo.get(&id)?.ok_or(SchedulingError::NotFound)?;
        appointment.photo = photo;
        appointment.updated_at = self.clock.now();

        self.repo.update(appointment.clone())?;
        info!(appointment_id = %id, has_photo = appointment.photo.is_some(), "appointment photo replaced");
        Ok(appointment)
    }

    pub fn list_available_slots(&self, date: NaiveDate) -> SchedulingResult<SlotAvailability> {
        let existing = self.repo.list()?;
        let availability = rules::availability(&self.config, &existing, date)?;
        debug!(%date, free = availability.available_slots.len(), booked = availability.booked_count, "slot availability");
        Ok(availability)
    }

    pub fn compute_statistics(&self) -> SchedulingResult<AppointmentStatistics> {
        let existing = self.repo.list()?;
        let today = self.clock.now().date_naive();
        Ok(statistics::compute(&existing, &self.config.service_catalog, today))
    }
}
