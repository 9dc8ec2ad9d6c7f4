//! Demo records loaded at startup when `seed_demo_data` is enabled.
//!
//! Seed rows go straight into the repositories. They are historical
//! records, so booking rules (slot catalog, capacity) are not re-applied.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use tracing::{info, warn};

use salonbook_core::{AppointmentId, IdGenerator, Repository, StockItemId, StoreError};
use salonbook_inventory::{ProductRef, StockItem, StockStatus};
use salonbook_scheduling::{Appointment, AppointmentStatus, CustomerKind, Slot};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid seed row '{row}': {reason}")]
    InvalidRow { row: &'static str, reason: String },

    /// Seed rows bypass the booking rules, so they only go into empty stores.
    #[error("demo data needs empty stores ({appointments} appointments, {stock_items} stock items present)")]
    AlreadySeeded { appointments: usize, stock_items: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub appointments: usize,
    pub stock_items: usize,
}

struct AppointmentRow {
    customer_name: &'static str,
    email: &'static str,
    phone: &'static str,
    date: &'static str,
    slot: &'static str,
    service: &'static str,
    customer_kind: CustomerKind,
    status: AppointmentStatus,
    notes: &'static str,
    created_at: &'static str,
    updated_at: &'static str,
}

const APPOINTMENTS: [AppointmentRow; 3] = [
    AppointmentRow {
        customer_name: "María González",
        email: "maria@email.com",
        phone: "+502 1234-5678",
        date: "2024-01-25",
        slot: "10:00",
        service: "Corte y Peinado",
        customer_kind: CustomerKind::Returning,
        status: AppointmentStatus::Confirmed,
        notes: "Cliente regular, prefiere cortes cortos",
        created_at: "2024-01-20T10:30:00Z",
        updated_at: "2024-01-20T10:30:00Z",
    },
    AppointmentRow {
        customer_name: "Ana López",
        email: "ana@email.com",
        phone: "+502 8765-4321",
        date: "2024-01-25",
        slot: "14:00",
        service: "Tinte y Tratamiento",
        customer_kind: CustomerKind::New,
        status: AppointmentStatus::Pending,
        notes: "Primera vez en el salón",
        created_at: "2024-01-22T15:45:00Z",
        updated_at: "2024-01-22T15:45:00Z",
    },
    AppointmentRow {
        customer_name: "Carmen Ruiz",
        email: "carmen@email.com",
        phone: "+502 5555-1234",
        date: "2024-01-26",
        slot: "11:30",
        service: "Manicure y Pedicure",
        customer_kind: CustomerKind::Returning,
        status: AppointmentStatus::Completed,
        notes: "Servicio completado exitosamente",
        created_at: "2024-01-18T09:15:00Z",
        updated_at: "2024-01-26T12:00:00Z",
    },
];

struct StockRow {
    product_ref: &'static str,
    name: &'static str,
    category: &'static str,
    quantity_on_hand: u32,
    reorder_threshold: u32,
    max_capacity: u32,
    purchase_price: u64,
    sale_price: u64,
    supplier: &'static str,
    location: &'static str,
    last_restocked_on: &'static str,
    last_depleted_on: &'static str,
}

const STOCK: [StockRow; 3] = [
    StockRow {
        product_ref: "1",
        name: "Champú Reparador",
        category: "Cuidado Capilar",
        quantity_on_hand: 5,
        reorder_threshold: 10,
        max_capacity: 100,
        purchase_price: 80_000,
        sale_price: 120_000,
        supplier: "L'Oréal Professionnel",
        location: "Almacén A - Estante 1",
        last_restocked_on: "2024-01-15",
        last_depleted_on: "2024-01-20",
    },
    StockRow {
        product_ref: "2",
        name: "Tinte Castaño",
        category: "Coloración",
        quantity_on_hand: 2,
        reorder_threshold: 5,
        max_capacity: 50,
        purchase_price: 60_000,
        sale_price: 90_000,
        supplier: "Wella",
        location: "Almacén A - Estante 2",
        last_restocked_on: "2024-01-10",
        last_depleted_on: "2024-01-22",
    },
    StockRow {
        product_ref: "3",
        name: "Secador Profesional",
        category: "Equipos",
        quantity_on_hand: 15,
        reorder_threshold: 8,
        max_capacity: 30,
        purchase_price: 150_000,
        sale_price: 220_000,
        supplier: "Babyliss Pro",
        location: "Almacén B - Estante 1",
        last_restocked_on: "2024-01-18",
        last_depleted_on: "2024-01-19",
    },
];

fn timestamp(row: &'static str, raw: &str) -> Result<DateTime<Utc>, SeedError> {
    raw.parse::<DateTime<Utc>>().map_err(|e| SeedError::InvalidRow {
        row,
        reason: format!("timestamp '{raw}': {e}"),
    })
}

fn start_of_day(row: &'static str, raw: &str) -> Result<DateTime<Utc>, SeedError> {
    let date = raw.parse::<NaiveDate>().map_err(|e| SeedError::InvalidRow {
        row,
        reason: format!("date '{raw}': {e}"),
    })?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

pub fn demo_appointments(ids: &dyn IdGenerator) -> Result<Vec<Appointment>, SeedError> {
    APPOINTMENTS
        .iter()
        .map(|row| -> Result<Appointment, SeedError> {
            let label = row.customer_name;
            Ok(Appointment {
                id: AppointmentId::from_uuid(ids.next_id()),
                customer_name: row.customer_name.to_string(),
                email: row.email.to_string(),
                phone: Some(row.phone.to_string()),
                date: row.date.parse::<NaiveDate>().map_err(|e| SeedError::InvalidRow {
                    row: label,
                    reason: format!("date '{}': {e}", row.date),
                })?,
                slot: row.slot.parse::<Slot>().map_err(|e| SeedError::InvalidRow {
                    row: label,
                    reason: e.to_string(),
                })?,
                service: row.service.to_string(),
                customer_kind: row.customer_kind,
                status: row.status,
                notes: Some(row.notes.to_string()),
                photo: None,
                created_at: timestamp(label, row.created_at)?,
                updated_at: timestamp(label, row.updated_at)?,
            })
        })
        .collect()
}

pub fn demo_stock(ids: &dyn IdGenerator) -> Result<Vec<StockItem>, SeedError> {
    STOCK
        .iter()
        .map(|row| -> Result<StockItem, SeedError> {
            Ok(StockItem {
                id: StockItemId::from_uuid(ids.next_id()),
                product_ref: ProductRef::new(row.product_ref),
                name: row.name.to_string(),
                category: row.category.to_string(),
                supplier: Some(row.supplier.to_string()),
                location: Some(row.location.to_string()),
                quantity_on_hand: row.quantity_on_hand,
                reorder_threshold: row.reorder_threshold,
                max_capacity: row.max_capacity,
                purchase_price: row.purchase_price,
                sale_price: row.sale_price,
                last_restocked_at: Some(start_of_day(row.name, row.last_restocked_on)?),
                last_depleted_at: Some(start_of_day(row.name, row.last_depleted_on)?),
                expires_on: None,
                status: StockStatus::Active,
            })
        })
        .collect()
}

/// Insert the demo rows into empty stores.
///
/// Fails with `AlreadySeeded` if either store holds records, so a second call
/// cannot stack bookings past the daily capacity or onto taken slots.
pub fn load<A, S>(appointments: &A, stock: &S, ids: &dyn IdGenerator) -> Result<SeedReport, SeedError>
where
    A: Repository<Appointment> + ?Sized,
    S: Repository<StockItem> + ?Sized,
{
    let present = (appointments.list()?.len(), stock.list()?.len());
    if present != (0, 0) {
        warn!(appointments = present.0, stock_items = present.1, "demo data skipped: stores not empty");
        return Err(SeedError::AlreadySeeded {
            appointments: present.0,
            stock_items: present.1,
        });
    }

    let mut report = SeedReport::default();

    for appointment in demo_appointments(ids)? {
        appointments.insert(appointment)?;
        report.appointments += 1;
    }
    for item in demo_stock(ids)? {
        stock.insert(item)?;
        report.stock_items += 1;
    }

    info!(appointments = report.appointments, stock_items = report.stock_items, "demo data loaded");
    Ok(report)
}
