//! `salonbook-core`: shared building blocks for the booking and stock domains.
//!
//! Everything here is storage- and transport-agnostic: identifiers, the
//! injected clock / id capabilities, and the repository seam.

pub mod clock;
pub mod error;
pub mod id;
pub mod patch;
pub mod repository;

pub use clock::{Clock, FixedClock, IdGenerator, SystemClock, UuidV7Generator};
pub use error::{StoreError, StoreResult};
pub use id::{AppointmentId, InvalidId, StockItemId};
pub use repository::{Entity, Repository};
