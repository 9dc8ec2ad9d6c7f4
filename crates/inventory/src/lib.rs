//! Stock ledger: inventory records, entry/exit movements and derived alerts.
//!
//! Alerts are never stored. They are derived from the quantity, threshold and
//! expiry of an item every time a [`StockRecord`] is produced, so they cannot
//! drift from the numbers they describe.

pub mod alerts;
pub mod config;
pub mod error;
pub mod item;
pub mod ledger;
pub mod movement;
pub mod statistics;

pub use alerts::{AlertSummary, StockAlerts, derive_alerts};
pub use config::LedgerConfig;
pub use error::{LedgerError, LedgerResult};
pub use item::{NewStockItem, ProductRef, StockItem, StockItemPatch, StockRecord, StockStatus};
pub use ledger::{Ledger, StockRepository};
pub use movement::{Movement, MovementKind};
pub use statistics::StockStatistics;
