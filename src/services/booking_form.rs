use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::BookingError;
use crate::models::booking::{BookingDraft, BookingSummary, Confirmation, RequiredField};
use crate::models::catalog::{format_price, Barber, Catalog, Service};
use crate::services::time_slots::{generate_slots, slot_end};
use crate::services::whatsapp::{deep_link, BookingMessage};

pub const SUCCESS_NOTICE: &str = "Agendamento enviado via WhatsApp para o barbeiro.";

/// Opens the confirmation link for the customer. Fire-and-forget.
pub trait LinkOpener {
    fn open(&self, url: &str);
}

/// Hand-off used by the HTTP server. The page returned to the customer carries
/// the link and the browser navigates to it, so this only records the event.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserHandoff;

impl LinkOpener for BrowserHandoff {
    fn open(&self, url: &str) {
        info!("Handing booking off to WhatsApp: {}", url);
    }
}

/// A draft at its initial values: first barber, first service, `today`
pub fn default_draft(catalog: &Catalog, today: NaiveDate) -> BookingDraft {
    BookingDraft {
        barber_id: catalog
            .default_barber()
            .map(|barber| barber.id.clone())
            .unwrap_or_default(),
        service_id: catalog.default_service().map(|service| service.id.clone()),
        date: today,
        time: String::new(),
        customer_name: String::new(),
        customer_contact: String::new(),
    }
}

/// Owns one booking draft and everything derived from it
pub struct BookingForm<'a> {
    catalog: &'a Catalog,
    opener: &'a dyn LinkOpener,
    today: NaiveDate,
    draft: BookingDraft,
}

impl<'a> BookingForm<'a> {
    pub fn new(catalog: &'a Catalog, opener: &'a dyn LinkOpener, today: NaiveDate) -> Self {
        Self::with_draft(catalog, opener, today, default_draft(catalog, today))
    }

    /// Resume from a draft held elsewhere (e.g. the fields of a posted form)
    pub fn with_draft(
        catalog: &'a Catalog,
        opener: &'a dyn LinkOpener,
        today: NaiveDate,
        draft: BookingDraft,
    ) -> Self {
        Self {
            catalog,
            opener,
            today,
            draft,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn barber(&self) -> Option<&'a Barber> {
        self.catalog.barber(&self.draft.barber_id)
    }

    pub fn service(&self) -> Option<&'a Service> {
        self.draft
            .service_id
            .as_deref()
            .and_then(|id| self.catalog.service(id))
    }

    /// Switch barber. A service or time that the new barber cannot offer is
    /// deselected rather than left dangling.
    pub fn select_barber(&mut self, barber_id: &str) -> Result<(), BookingError> {
        let barber = self
            .catalog
            .barber(barber_id)
            .ok_or_else(|| BookingError::UnknownBarber(barber_id.to_string()))?;

        self.draft.barber_id = barber.id.clone();
        self.refresh();
        Ok(())
    }

    pub fn select_service(&mut self, service_id: &str) -> Result<(), BookingError> {
        let service = self
            .catalog
            .service(service_id)
            .ok_or_else(|| BookingError::UnknownService(service_id.to_string()))?;

        self.draft.service_id = Some(service.id.clone());
        Ok(())
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.draft.date = date;
        self.drop_unavailable_time();
    }

    pub fn select_time(&mut self, time: &str) {
        self.draft.time = time.trim().to_string();
    }

    pub fn set_customer_name(&mut self, name: &str) {
        self.draft.customer_name = name.to_string();
    }

    pub fn set_customer_contact(&mut self, contact: &str) {
        self.draft.customer_contact = contact.to_string();
    }

    /// Services that the selected barber offers, in catalog order
    pub fn eligible_services(&self) -> Vec<&'a Service> {
        self.catalog.eligible_services(&self.draft.barber_id)
    }

    /// Bookable start times for the selected barber and date
    pub fn available_slots(&self) -> Vec<String> {
        match self.barber() {
            Some(barber) => generate_slots(barber, self.draft.date),
            None => Vec::new(),
        }
    }

    pub fn summary(&self) -> BookingSummary {
        let service = self.service();
        BookingSummary {
            barber_name: self
                .barber()
                .map(|barber| barber.name.clone())
                .unwrap_or_default(),
            service_label: service.map(|service| service.label.clone()),
            price_label: format_price(service.map_or(0, |service| service.price_cents)),
            date: self.draft.date,
            time: if self.draft.time.is_empty() {
                "—".to_string()
            } else {
                self.draft.time.clone()
            },
            ends_at: slot_end(&self.draft.time),
        }
    }

    pub fn reset(&mut self) {
        self.draft = default_draft(self.catalog, self.today);
    }

    /// Validate the draft and hand the booking off to the barber.
    ///
    /// On failure nothing is opened and the draft is left as it was. On
    /// success the link is passed to the opener and the draft goes back to
    /// its defaults.
    pub fn submit(&mut self) -> Result<Confirmation, BookingError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            let labels: Vec<String> = missing.iter().map(ToString::to_string).collect();
            warn!("Booking not submitted, missing: {}", labels.join(", "));
            return Err(BookingError::Incomplete { missing });
        }

        let (barber, service) = match (self.barber(), self.service()) {
            (Some(barber), Some(service)) => (barber, service),
            _ => {
                return Err(BookingError::Incomplete {
                    missing: vec![RequiredField::Service],
                })
            }
        };

        let message = BookingMessage {
            customer_name: self.draft.customer_name.trim(),
            service_label: &service.label,
            date: self.draft.date,
            time: &self.draft.time,
            customer_contact: self.draft.customer_contact.trim(),
        };
        let link = deep_link(&barber.whatsapp, &message);

        info!(
            "Booking {} with {} on {} at {}",
            service.id, barber.id, self.draft.date, self.draft.time
        );
        self.opener.open(&link);

        self.reset();

        Ok(Confirmation {
            whatsapp_link: link,
            notice: SUCCESS_NOTICE.to_string(),
        })
    }

    fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();

        if self.draft.customer_name.trim().is_empty() {
            missing.push(RequiredField::CustomerName);
        }
        if self.draft.customer_contact.trim().is_empty() {
            missing.push(RequiredField::CustomerContact);
        }

        let service_ok = self
            .service()
            .is_some_and(|service| service.is_available_for(&self.draft.barber_id));
        if !service_ok {
            missing.push(RequiredField::Service);
        }

        if !self.available_slots().contains(&self.draft.time) {
            missing.push(RequiredField::Time);
        }

        missing
    }

    /// Deselect a service the barber does not offer and a time that is not
    /// bookable for the current barber and date.
    pub fn refresh(&mut self) {
        if let Some(service) = self.service() {
            if !service.is_available_for(&self.draft.barber_id) {
                debug!(
                    "Service {} is not offered by {}, clearing selection",
                    service.id, self.draft.barber_id
                );
                self.draft.service_id = None;
            }
        }

        self.drop_unavailable_time();
    }

    fn drop_unavailable_time(&mut self) {
        if !self.draft.time.is_empty() && !self.available_slots().contains(&self.draft.time) {
            debug!(
                "Time {} is no longer available on {}, clearing selection",
                self.draft.time, self.draft.date
            );
            self.draft.time.clear();
        }
    }
}
