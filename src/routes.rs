use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::info;

use crate::handlers::api::{list_barbers, list_services, list_slots, submit_booking, AppState};
use crate::handlers::health::health_check;
use crate::handlers::page::{booking_page, submit_booking_form};

pub fn create_router(app_state: Arc<AppState>, is_production: bool) -> Router {
    let mut router = Router::new();

    // Health check is always available
    let health_route = Router::new().route("/health", get(health_check));
    router = router.merge(health_route);

    // The booking page is always available
    let page_routes = Router::new()
        .route("/", get(booking_page))
        .route("/agendar", post(submit_booking_form));
    router = router.merge(page_routes);

    // Only add the JSON API if not in production mode
    if !is_production {
        let api_routes = Router::new()
            .route("/api/barbers", get(list_barbers))
            .route("/api/services", get(list_services))
            .route("/api/slots", get(list_slots))
            .route("/api/bookings", post(submit_booking));

        router = router.merge(api_routes);

        info!("JSON API routes enabled - server running in development mode");
    } else {
        info!("Running in production mode - only the booking page and health endpoint exposed");
    }

    router.with_state(app_state)
}
