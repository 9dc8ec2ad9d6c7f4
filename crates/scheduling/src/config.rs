//! Booking configuration: capacity, closed weekdays, slot and service catalogs.

use core::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A bookable time of day, written `HH:MM`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot(NaiveTime);

impl Slot {
    const FORMAT: &'static str = "%H:%M";

    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl core::fmt::Display for Slot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a HH:MM time of day")]
pub struct SlotParseError(pub String);

impl FromStr for Slot {
    type Err = SlotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|_| SlotParseError(s.to_string()))
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("daily_capacity must be at least 1")]
    ZeroCapacity,

    #[error("available_slots cannot be empty")]
    NoSlots,

    #[error("slot {0} is listed more than once")]
    DuplicateSlot(Slot),

    #[error("service_catalog cannot be empty")]
    NoServices,
}

/// Scheduler settings, injected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Maximum appointments on one calendar date.
    pub daily_capacity: usize,
    /// Weekdays on which nothing can be booked.
    pub excluded_weekdays: Vec<Weekday>,
    /// Bookable slots, in display order.
    pub available_slots: Vec<Slot>,
    pub service_catalog: Vec<String>,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        let slots = [(9, 0), (10, 0), (11, 0), (12, 0), (14, 0), (15, 0), (16, 0), (17, 0)]
            .into_iter()
            .filter_map(|(h, m)| Slot::new(h, m))
            .collect();

        Self {
            daily_capacity: 3,
            excluded_weekdays: vec![Weekday::Sun],
            available_slots: slots,
            service_catalog: [
                "Corte y Peinado",
                "Tinte y Tratamiento",
                "Manicure y Pedicure",
                "Maquillaje",
                "Tratamiento Facial",
                "Depilación",
                "Peinado para Eventos",
                "Tratamiento Capilar",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl SchedulingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.daily_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.available_slots.is_empty() {
            return Err(ConfigError::NoSlots);
        }
        for (i, slot) in self.available_slots.iter().enumerate() {
            if self.available_slots[..i].contains(slot) {
                return Err(ConfigError::DuplicateSlot(*slot));
            }
        }
        if self.service_catalog.is_empty() {
            return Err(ConfigError::NoServices);
        }
        Ok(())
    }

    pub fn is_excluded(&self, date: NaiveDate) -> bool {
        self.excluded_weekdays.contains(&date.weekday())
    }

    pub fn offers_slot(&self, slot: Slot) -> bool {
        self.available_slots.contains(&slot)
    }

    pub fn offers_service(&self, service: &str) -> bool {
        self.service_catalog.iter().any(|s| s == service)
    }
}
