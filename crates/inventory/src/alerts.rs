use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::item::StockRecord;

/// Threshold-derived flags for one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAlerts {
    /// `quantity_on_hand <= reorder_threshold`.
    pub low_stock: bool,
    /// `quantity_on_hand <= reorder_threshold * 0.5`; implies `low_stock`.
    pub critical_stock: bool,
    pub near_expiry: bool,
}

impl StockAlerts {
    pub fn any(&self) -> bool {
        self.low_stock || self.critical_stock || self.near_expiry
    }
}

/// Low/critical flags from the on-hand quantity and the reorder threshold.
///
/// `q <= t * 0.5` is evaluated as `2q <= t` to stay in integers.
pub fn derive_alerts(quantity_on_hand: u32, reorder_threshold: u32) -> StockAlerts {
    let q = u64::from(quantity_on_hand);
    let t = u64::from(reorder_threshold);
    StockAlerts {
        low_stock: q <= t,
        critical_stock: q * 2 <= t,
        near_expiry: false,
    }
}

/// Whether `expires_on` falls on or before `today + window_days`.
pub fn is_near_expiry(expires_on: Option<NaiveDate>, today: NaiveDate, window_days: u32) -> bool {
    match expires_on {
        Some(expiry) => (expiry - today).num_days() <= i64::from(window_days),
        None => false,
    }
}

/// Flagged items grouped for the alert dashboard.
///
/// `low_stock` holds items that are low but not critical, so the two lists
/// are disjoint even though every critical item is also low.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub low_stock: Vec<StockRecord>,
    pub critical_stock: Vec<StockRecord>,
    pub near_expiry: Vec<StockRecord>,
    /// Items with at least one flag, counted once each.
    pub total_flagged: usize,
}

impl AlertSummary {
    pub fn from_records(records: &[StockRecord]) -> Self {
        let pick = |keep: fn(&StockAlerts) -> bool| -> Vec<StockRecord> {
            records.iter().filter(|r| keep(&r.alerts)).cloned().collect()
        };

        Self {
            low_stock: pick(|a| a.low_stock && !a.critical_stock),
            critical_stock: pick(|a| a.critical_stock),
            near_expiry: pick(|a| a.near_expiry),
            total_flagged: records.iter().filter(|r| r.alerts.any()).count(),
        }
    }
}
