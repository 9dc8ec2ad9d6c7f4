use serde::{Deserialize, Serialize};

use crate::item::StockRecord;

/// Inventory totals over the whole ledger.
///
/// `low_stock_count` includes critical items (every critical item is low);
/// `normal_count` is whatever is not low.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockStatistics {
    pub total_items: usize,
    pub low_stock_count: usize,
    pub critical_stock_count: usize,
    pub normal_count: usize,
    /// Sum of `quantity_on_hand * purchase_price`, minor units.
    pub total_purchase_value: u64,
    /// Sum of `quantity_on_hand * sale_price`, minor units.
    pub total_sale_value: u64,
    pub potential_profit: i64,
    /// 0 when the ledger is empty.
    pub low_stock_percentage: f64,
}

impl StockStatistics {
    pub fn from_records(records: &[StockRecord]) -> Self {
        let total_items = records.len();
        let low_stock_count = records.iter().filter(|r| r.alerts.low_stock).count();
        let critical_stock_count = records.iter().filter(|r| r.alerts.critical_stock).count();

        let total_purchase_value = records
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.item.purchase_value()));
        let total_sale_value = records
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.item.sale_value()));

        let profit = i128::from(total_sale_value) - i128::from(total_purchase_value);
        let potential_profit = profit.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;

        let low_stock_percentage = if total_items == 0 {
            0.0
        } else {
            low_stock_count as f64 / total_items as f64 * 100.0
        };

        Self {
            total_items,
            low_stock_count,
            critical_stock_count,
            normal_count: total_items - low_stock_count,
            total_purchase_value,
            total_sale_value,
            potential_profit,
            low_stock_percentage,
        }
    }
}
