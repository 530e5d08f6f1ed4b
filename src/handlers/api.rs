use axum::{
    extract::{Json as ExtractJson, Query, State},
    response::Json,
};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::BookingError;
use crate::models::booking::{
    BarberView, BookingDraft, BookingResponse, ServiceView, SlotsResponse,
};
use crate::models::catalog::Catalog;
use crate::models::common::{ServicesParams, SlotsParams};
use crate::services::booking_form::{BookingForm, LinkOpener};
use crate::services::time_slots::{generate_slots, SLOT_MINUTES};

// AppState struct containing shared resources
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub opener: Arc<dyn LinkOpener + Send + Sync>,
}

impl AppState {
    pub fn new(catalog: Catalog, opener: impl LinkOpener + Send + Sync + 'static) -> Self {
        Self {
            catalog: Arc::new(catalog),
            opener: Arc::new(opener),
        }
    }
}

// Today's date on the local wall clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// List barbers endpoint
pub async fn list_barbers(State(state): State<Arc<AppState>>) -> Json<Vec<BarberView>> {
    info!("Received request to list barbers");

    Json(state.catalog.barbers().iter().map(BarberView::from).collect())
}

// List services endpoint, optionally filtered to what one barber offers
pub async fn list_services(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ServicesParams>,
) -> Result<Json<Vec<ServiceView>>, BookingError> {
    info!("Received request to list services for barber {:?}", params.barber);

    let services = match params.barber.as_deref() {
        Some(barber_id) => {
            if state.catalog.barber(barber_id).is_none() {
                warn!("Services requested for unknown barber {}", barber_id);
                return Err(BookingError::UnknownBarber(barber_id.to_string()));
            }
            state.catalog.eligible_services(barber_id)
        }
        None => state.catalog.services().iter().collect(),
    };

    Ok(Json(services.into_iter().map(ServiceView::from).collect()))
}

// Available slots endpoint
pub async fn list_slots(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SlotsParams>,
) -> Result<Json<SlotsResponse>, BookingError> {
    info!(
        "Received request for slots of barber {} on {}",
        params.barber, params.date
    );

    let barber = state
        .catalog
        .barber(&params.barber)
        .ok_or_else(|| BookingError::UnknownBarber(params.barber.clone()))?;

    let slots = generate_slots(barber, params.date);

    Ok(Json(SlotsResponse {
        barber_id: barber.id.clone(),
        date: params.date,
        slot_minutes: SLOT_MINUTES,
        slots,
    }))
}

// Booking submission endpoint
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    ExtractJson(draft): ExtractJson<BookingDraft>,
) -> Result<Json<BookingResponse>, BookingError> {
    info!(
        "Received booking for barber {} on {} at {}",
        draft.barber_id, draft.date, draft.time
    );

    if state.catalog.barber(&draft.barber_id).is_none() {
        return Err(BookingError::UnknownBarber(draft.barber_id));
    }
    if let Some(service_id) = draft.service_id.as_deref() {
        if state.catalog.service(service_id).is_none() {
            return Err(BookingError::UnknownService(service_id.to_string()));
        }
    }

    let mut form = BookingForm::with_draft(&state.catalog, state.opener.as_ref(), today(), draft);
    let confirmation = form.submit()?;

    Ok(Json(BookingResponse {
        success: true,
        message: confirmation.notice,
        whatsapp_link: confirmation.whatsapp_link,
    }))
}
