use serde::{Deserialize, Serialize};

/// Ledger settings, injected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// `max_capacity` given to items created without one.
    pub default_max_capacity: u32,
    /// Items expiring within this many days (or already expired) are flagged.
    pub near_expiry_days: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_max_capacity: 100,
            near_expiry_days: 30,
        }
    }
}
