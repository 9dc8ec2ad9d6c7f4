//! `salonbook-auth`: authorization boundary for the booking and stock cores.
//!
//! Token decoding and password hashing live in the transport layer; this crate
//! only models the already-authenticated caller and the admin gate.

pub mod authorize;
pub mod principal;
pub mod roles;

pub use authorize::{AuthzError, authorize, require_admin};
pub use principal::{Principal, PrincipalId};
pub use roles::Role;
