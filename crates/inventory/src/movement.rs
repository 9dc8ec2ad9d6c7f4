//! Entry/exit movements on a stock item.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::item::StockItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Goods received; increases on-hand quantity.
    Entry,
    /// Goods used or sold; decreases on-hand quantity.
    Exit,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Entry => "entry",
            MovementKind::Exit => "exit",
        }
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entry" | "entrada" => Ok(MovementKind::Entry),
            "exit" | "salida" => Ok(MovementKind::Exit),
            _ => Err(LedgerError::InvalidMovementKind(s.to_string())),
        }
    }
}

/// Movement request. `kind` stays textual until applied so that an unknown
/// kind is reported as `InvalidMovementKind` rather than a decoding error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub kind: String,
    pub quantity: u32,
    #[serde(default)]
    pub reason: Option<String>,
    /// Replaces the item's supplier on entries; ignored on exits.
    #[serde(default)]
    pub supplier: Option<String>,
}

impl Movement {
    pub fn entry(quantity: u32) -> Self {
        Self {
            kind: MovementKind::Entry.as_str().to_string(),
            quantity,
            reason: None,
            supplier: None,
        }
    }

    pub fn exit(quantity: u32) -> Self {
        Self {
            kind: MovementKind::Exit.as_str().to_string(),
            quantity,
            reason: None,
            supplier: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    /// Apply to a copy of `item`; `item` is untouched on error.
    pub fn apply(&self, item: &StockItem, now: DateTime<Utc>) -> LedgerResult<(MovementKind, StockItem)> {
        let kind: MovementKind = self.kind.parse()?;

        if self.quantity == 0 {
            return Err(LedgerError::InvalidQuantity("movement quantity must be positive".to_string()));
        }

        let mut next = item.clone();
        match kind {
            MovementKind::Entry => {
                next.quantity_on_hand = item.quantity_on_hand.checked_add(self.quantity).ok_or_else(|| {
                    LedgerError::InvalidQuantity(format!(
                        "entry of {} would overflow on-hand quantity {}",
                        self.quantity, item.quantity_on_hand
                    ))
                })?;
                next.last_restocked_at = Some(now);
                if let Some(supplier) = self.supplier.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                    next.supplier = Some(supplier.to_string());
                }
            }
            MovementKind::Exit => {
                if self.quantity > item.quantity_on_hand {
                    return Err(LedgerError::InsufficientStock {
                        requested: self.quantity,
                        on_hand: item.quantity_on_hand,
                    });
                }
                next.quantity_on_hand = item.quantity_on_hand - self.quantity;
                next.last_depleted_at = Some(now);
            }
        }

        Ok((kind, next))
    }
}
