//! Barbiere di Pereira booking service
//!
//! Customers pick a barber, a service, a date and one of the generated
//! 40-minute slots, then the booking is handed off to the barber as a
//! pre-filled WhatsApp message. Nothing is stored; the barber keeps track of
//! real availability.
//!
//! # Modules
//!
//! - `models::catalog`: barbers, weekly schedules and the price list
//! - `services::time_slots`: bookable slot generation
//! - `services::booking_form`: the booking draft, its validation and hand-off
//! - `services::whatsapp`: message template and deep-link encoding
//! - `handlers`, `routes`: the HTML page and JSON API

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;


// Re-export the main types for ease of use
pub use config::Config;
pub use error::BookingError;
pub use handlers::api::AppState;
pub use models::catalog::Catalog;
pub use routes::create_router;
pub use services::booking_form::{BookingForm, BrowserHandoff, LinkOpener};
pub use services::time_slots::generate_slots;
