use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::catalog::{Barber, ScheduleEntry, Service};

/// Transient form state for one booking. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookingDraft {
    pub barber_id: String,
    #[serde(default)]
    pub service_id: Option<String>,
    pub date: NaiveDate,
    // Empty string means no slot selected
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_contact: String,
}

/// Fields that must be filled in before a booking can be handed off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    CustomerName,
    CustomerContact,
    Service,
    Time,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RequiredField::CustomerName => "nome",
            RequiredField::CustomerContact => "telefone",
            RequiredField::Service => "procedimento",
            RequiredField::Time => "horário",
        };
        f.write_str(label)
    }
}

/// Result of a successful hand-off
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub whatsapp_link: String,
    pub notice: String,
}

/// What the side panel of the booking page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSummary {
    pub barber_name: String,
    pub service_label: Option<String>,
    pub price_label: String,
    pub date: NaiveDate,
    pub time: String,
    pub ends_at: Option<String>,
}

// Response structure for the booking endpoint
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    pub whatsapp_link: String,
}

// Response structure for the slots endpoint
#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub barber_id: String,
    pub date: NaiveDate,
    pub slot_minutes: u32,
    pub slots: Vec<String>,
}

// Barber as exposed by the API, with a ready-made contact link
#[derive(Debug, Serialize)]
pub struct BarberView {
    pub id: String,
    pub name: String,
    pub whatsapp: String,
    pub contact_link: String,
    pub schedule: Vec<ScheduleEntry>,
}

// Service as exposed by the API, with its display price
#[derive(Debug, Serialize)]
pub struct ServiceView {
    pub id: String,
    pub label: String,
    pub price_cents: u32,
    pub price_label: String,
    pub only_with: Option<String>,
}

impl From<&Barber> for BarberView {
    fn from(barber: &Barber) -> Self {
        Self {
            id: barber.id.clone(),
            name: barber.name.clone(),
            whatsapp: barber.whatsapp.clone(),
            contact_link: barber.contact_link(),
            schedule: barber.schedule.clone(),
        }
    }
}

impl From<&Service> for ServiceView {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id.clone(),
            label: service.label.clone(),
            price_cents: service.price_cents,
            price_label: service.price_label(),
            only_with: service.only_with.clone(),
        }
    }
}
