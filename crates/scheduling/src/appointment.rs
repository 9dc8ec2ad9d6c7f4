use core::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use salonbook_core::patch::present;
use salonbook_core::{AppointmentId, Entity};

use crate::config::Slot;

/// Informational classification of the customer; not checked against history.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerKind {
    #[serde(alias = "nuevo")]
    New,
    #[serde(alias = "frecuente")]
    Returning,
}

/// Appointment lifecycle status.
///
/// Deleted appointments are removed from the collection; there is no
/// `Cancelled` state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[serde(alias = "pendiente")]
    Pending,
    #[serde(alias = "confirmada")]
    Confirmed,
    #[serde(alias = "completada")]
    Completed,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 3] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
        }
    }
}

impl core::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown appointment status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for AppointmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" | "pendiente" => Ok(AppointmentStatus::Pending),
            "confirmed" | "confirmada" => Ok(AppointmentStatus::Confirmed),
            "completed" | "completada" => Ok(AppointmentStatus::Completed),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// A booked appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date: NaiveDate,
    pub slot: Slot,
    pub service: String,
    pub customer_kind: CustomerKind,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    /// Base64 text reference, stored as given.
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Appointment {
    type Id = AppointmentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Booking request as handed over by the transport layer.
///
/// Required fields are optional here so that their absence surfaces as a
/// domain `MissingField` error rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingRequest {
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date: Option<NaiveDate>,
    /// Raw `HH:MM`; checked against the slot catalog during booking.
    pub slot: Option<String>,
    pub service: Option<String>,
    pub customer_kind: Option<CustomerKind>,
    pub notes: Option<String>,
    pub photo: Option<String>,
}

/// Partial update; only supplied fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppointmentPatch {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub phone: Option<Option<String>>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub slot: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub customer_kind: Option<CustomerKind>,
    #[serde(default)]
    pub status: Option<AppointmentStatus>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub photo: Option<Option<String>>,
}

impl AppointmentPatch {
    /// Whether the patch moves the appointment to another day or slot.
    pub fn reschedules(&self) -> bool {
        self.date.is_some() || self.slot.is_some()
    }
}
