use thiserror::Error;

use salonbook_auth::AuthzError;
use salonbook_core::StoreError;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger failures. A rejected operation never commits anything.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("stock item not found")]
    NotFound,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("insufficient stock: requested {requested}, on hand {on_hand}")]
    InsufficientStock { requested: u32, on_hand: u32 },

    #[error("invalid movement kind '{0}' (expected 'entry' or 'exit')")]
    InvalidMovementKind(String),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error(transparent)]
    Forbidden(#[from] AuthzError),

    #[error("stock store: {0}")]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Stable machine-readable code for transport layers and logs.
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::NotFound => "not_found",
            LedgerError::MissingField(_) => "missing_field",
            LedgerError::InsufficientStock { .. } => "insufficient_stock",
            LedgerError::InvalidMovementKind(_) => "invalid_movement_kind",
            LedgerError::InvalidQuantity(_) => "invalid_quantity",
            LedgerError::Forbidden(_) => "forbidden",
            LedgerError::Store(_) => "store_error",
        }
    }
}
