//! Infrastructure layer: storage adapters, demo data and component wiring.

pub mod memory;
pub mod seed;
pub mod services;

pub use memory::InMemoryRepository;
pub use services::{AppointmentStore, Services, StockStore};

#[cfg(test)]
mod integration_tests;
