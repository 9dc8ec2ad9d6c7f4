use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use salonbook_core::patch::{apply_clearable, present};
use salonbook_core::{Entity, StockItemId};

use crate::alerts::{StockAlerts, derive_alerts, is_near_expiry};
use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};

/// Non-owning back-reference to a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRef(String);

impl ProductRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    #[serde(alias = "activo")]
    Active,
    #[serde(alias = "inactivo")]
    Inactive,
}

/// Stored inventory record. Alerts are not part of it; see [`StockRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: StockItemId,
    pub product_ref: ProductRef,
    pub name: String,
    pub category: String,
    pub supplier: Option<String>,
    pub location: Option<String>,
    pub quantity_on_hand: u32,
    pub reorder_threshold: u32,
    pub max_capacity: u32,
    /// Minor currency units.
    pub purchase_price: u64,
    /// Minor currency units.
    pub sale_price: u64,
    pub last_restocked_at: Option<DateTime<Utc>>,
    pub last_depleted_at: Option<DateTime<Utc>>,
    pub expires_on: Option<NaiveDate>,
    pub status: StockStatus,
}

impl Entity for StockItem {
    type Id = StockItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl StockItem {
    pub fn alerts(&self, today: NaiveDate, config: &LedgerConfig) -> StockAlerts {
        StockAlerts {
            near_expiry: is_near_expiry(self.expires_on, today, config.near_expiry_days),
            ..derive_alerts(self.quantity_on_hand, self.reorder_threshold)
        }
    }

    pub fn into_record(self, today: NaiveDate, config: &LedgerConfig) -> StockRecord {
        let alerts = self.alerts(today, config);
        StockRecord { item: self, alerts }
    }

    /// Stock value at purchase price, saturating.
    pub fn purchase_value(&self) -> u64 {
        u64::from(self.quantity_on_hand).saturating_mul(self.purchase_price)
    }

    /// Stock value at sale price, saturating.
    pub fn sale_value(&self) -> u64 {
        u64::from(self.quantity_on_hand).saturating_mul(self.sale_price)
    }
}

/// A stock item together with the alerts derived from its current numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    #[serde(flatten)]
    pub item: StockItem,
    pub alerts: StockAlerts,
}

/// Creation request. Required fields are optional so absence is a domain error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewStockItem {
    pub product_ref: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity_on_hand: Option<u32>,
    pub reorder_threshold: Option<u32>,
    pub max_capacity: Option<u32>,
    pub purchase_price: Option<u64>,
    pub sale_price: Option<u64>,
    pub supplier: Option<String>,
    pub location: Option<String>,
    pub expires_on: Option<NaiveDate>,
    pub status: Option<StockStatus>,
}

fn required_text(value: &Option<String>, field: &'static str) -> LedgerResult<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(LedgerError::MissingField(field)),
    }
}

impl NewStockItem {
    /// Validate and build the stored item with defaults applied.
    pub fn build(&self, id: StockItemId, config: &LedgerConfig) -> LedgerResult<StockItem> {
        let product_ref = required_text(&self.product_ref, "product_ref")?;
        let name = required_text(&self.name, "name")?;
        let category = required_text(&self.category, "category")?;
        let quantity_on_hand = self
            .quantity_on_hand
            .ok_or(LedgerError::MissingField("quantity_on_hand"))?;

        Ok(StockItem {
            id,
            product_ref: ProductRef::new(product_ref),
            name,
            category,
            supplier: self.supplier.clone(),
            location: self.location.clone(),
            quantity_on_hand,
            reorder_threshold: self.reorder_threshold.unwrap_or(0),
            max_capacity: self.max_capacity.unwrap_or(config.default_max_capacity),
            purchase_price: self.purchase_price.unwrap_or(0),
            sale_price: self.sale_price.unwrap_or(0),
            last_restocked_at: None,
            last_depleted_at: None,
            expires_on: self.expires_on,
            status: self.status.unwrap_or(StockStatus::Active),
        })
    }
}

/// Partial update; only supplied fields are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StockItemPatch {
    #[serde(default)]
    pub product_ref: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub supplier: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Option<String>>,
    #[serde(default)]
    pub quantity_on_hand: Option<u32>,
    #[serde(default)]
    pub reorder_threshold: Option<u32>,
    #[serde(default)]
    pub max_capacity: Option<u32>,
    #[serde(default)]
    pub purchase_price: Option<u64>,
    #[serde(default)]
    pub sale_price: Option<u64>,
    #[serde(default, deserialize_with = "present")]
    pub expires_on: Option<Option<NaiveDate>>,
    #[serde(default)]
    pub status: Option<StockStatus>,
}

impl StockItemPatch {
    /// Merge into a copy of `current`; `current` is untouched on error.
    pub fn merge(&self, current: &StockItem) -> LedgerResult<StockItem> {
        let mut next = current.clone();

        if self.product_ref.is_some() {
            next.product_ref = ProductRef::new(required_text(&self.product_ref, "product_ref")?);
        }
        if self.name.is_some() {
            next.name = required_text(&self.name, "name")?;
        }
        if self.category.is_some() {
            next.category = required_text(&self.category, "category")?;
        }

        apply_clearable(&mut next.supplier, self.supplier.clone());
        apply_clearable(&mut next.location, self.location.clone());
        apply_clearable(&mut next.expires_on, self.expires_on);

        if let Some(q) = self.quantity_on_hand {
            next.quantity_on_hand = q;
        }
        if let Some(t) = self.reorder_threshold {
            next.reorder_threshold = t;
        }
        if let Some(max) = self.max_capacity {
            next.max_capacity = max;
        }
        if let Some(p) = self.purchase_price {
            next.purchase_price = p;
        }
        if let Some(p) = self.sale_price {
            next.sale_price = p;
        }
        if let Some(status) = self.status {
            next.status = status;
        }

        Ok(next)
    }
}
