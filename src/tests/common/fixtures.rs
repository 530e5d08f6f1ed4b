use axum_test::{TestServer, TestServerConfig};
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::handlers::api::AppState;
use crate::models::catalog::Catalog;
use crate::opener_mock::{setup_mock_opener, OpenedLinks};
use crate::routes::create_router;

/// A Tuesday: both barbers take online bookings
pub fn tuesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
}

/// A Saturday: walk-in only
pub fn saturday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 5).unwrap()
}

/// A Sunday: the shop is closed
pub fn sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 6).unwrap()
}

/// Generate a complete booking draft as the JSON API expects it
pub fn booking_json(barber: &str, service: &str, time: &str, name: &str, contact: &str) -> Value {
    json!({
        "barber_id": barber,
        "service_id": service,
        "date": tuesday().format("%Y-%m-%d").to_string(),
        "time": time,
        "customer_name": name,
        "customer_contact": contact,
    })
}

/// Test server over the real catalog, with a recording opener
pub fn setup_test_server(is_production: bool) -> (TestServer, Arc<OpenedLinks>) {
    let (mock_opener, opened) = setup_mock_opener();

    let app_state = Arc::new(AppState::new(Catalog::barbiere(), mock_opener));
    let app = create_router(app_state, is_production);

    let config = TestServerConfig::builder().mock_transport().build();
    let server = TestServer::new_with_config(app, config).unwrap();

    (server, opened)
}
