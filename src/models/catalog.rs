use chrono::NaiveTime;
use serde::Serialize;

use crate::services::whatsapp::contact_link;

// Weekday index on which the whole shop is closed (0 = Sunday)
pub const CLOSED_WEEKDAY: u8 = 0;

/// Half-open opening interval `[start, end)` within a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpenSegment {
    #[serde(serialize_with = "serialize_time_of_day")]
    pub start: NaiveTime,
    #[serde(serialize_with = "serialize_time_of_day")]
    pub end: NaiveTime,
}

impl OpenSegment {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Build a segment from hour/minute pairs. Out-of-range values fall back to
    /// midnight, which at worst produces an empty segment.
    pub fn hm(start: (u32, u32), end: (u32, u32)) -> Self {
        let at = |(h, m): (u32, u32)| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);
        Self::new(at(start), at(end))
    }
}

fn serialize_time_of_day<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&time.format("%H:%M").to_string())
}

/// One line of a weekly template: the weekdays it covers and their open segments.
/// An empty segment list means walk-in only for those days.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntry {
    pub days: Vec<u8>,
    pub segments: Vec<OpenSegment>,
}

impl ScheduleEntry {
    pub fn new(days: &[u8], segments: Vec<OpenSegment>) -> Self {
        Self {
            days: days.to_vec(),
            segments,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Barber {
    pub id: String,
    pub name: String,
    pub whatsapp: String,
    pub schedule: Vec<ScheduleEntry>,
}

impl Barber {
    /// The schedule entry covering `weekday`, if any
    pub fn entry_for(&self, weekday: u8) -> Option<&ScheduleEntry> {
        self.schedule.iter().find(|entry| entry.days.contains(&weekday))
    }

    pub fn contact_link(&self) -> String {
        contact_link(&self.whatsapp)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Service {
    pub id: String,
    pub label: String,
    pub price_cents: u32,
    pub only_with: Option<String>,
}

impl Service {
    pub fn is_available_for(&self, barber_id: &str) -> bool {
        match &self.only_with {
            Some(only_with) => only_with == barber_id,
            None => true,
        }
    }

    pub fn price_label(&self) -> String {
        format_price(self.price_cents)
    }
}

/// Format an amount in cents as Brazilian reais, e.g. `R$ 35,00`
pub fn format_price(cents: u32) -> String {
    format!("R$ {},{:02}", cents / 100, cents % 100)
}

/// Read-only barber and service tables, built once at start-up
#[derive(Debug, Clone)]
pub struct Catalog {
    barbers: Vec<Barber>,
    services: Vec<Service>,
}

impl Catalog {
    pub fn new(barbers: Vec<Barber>, services: Vec<Service>) -> Self {
        Self { barbers, services }
    }

    /// The shop's own barbers and price list
    pub fn barbiere() -> Self {
        let weekdays: &[u8] = &[1, 2, 3, 4, 5];
        let saturday: &[u8] = &[6];

        let barbers = vec![
            Barber {
                id: "PEREIRA".to_string(),
                name: "Pereira".to_string(),
                whatsapp: "+5546991114797".to_string(),
                schedule: vec![
                    ScheduleEntry::new(
                        weekdays,
                        vec![
                            OpenSegment::hm((8, 0), (11, 30)),
                            OpenSegment::hm((14, 0), (19, 0)),
                        ],
                    ),
                    ScheduleEntry::new(saturday, Vec::new()),
                ],
            },
            Barber {
                id: "JAPA".to_string(),
                name: "Japa".to_string(),
                whatsapp: "+5546999746619".to_string(),
                schedule: vec![
                    ScheduleEntry::new(weekdays, vec![OpenSegment::hm((14, 0), (19, 0))]),
                    ScheduleEntry::new(saturday, Vec::new()),
                ],
            },
        ];

        let service = |id: &str, label: &str, reais: u32, only_with: Option<&str>| Service {
            id: id.to_string(),
            label: label.to_string(),
            price_cents: reais * 100,
            only_with: only_with.map(str::to_string),
        };

        let services = vec![
            service("CABELO_ADULTO", "Cabelo masculino adulto", 35, None),
            service("BARBA", "Barba", 30, None),
            service("CABELO_BARBA", "Cabelo e Barba", 55, None),
            service("CABELO_INFANTIL", "Cabelo infantil masculino", 30, None),
            service("SOBRANCELHA", "Sobrancelha masculina (navalhada)", 15, None),
            service("FEM_CURTO", "Corte feminino curto (Somente Japa)", 35, Some("JAPA")),
            service("FEM_LONGO", "Corte feminino longo (Somente Japa)", 55, Some("JAPA")),
        ];

        Self::new(barbers, services)
    }

    pub fn barbers(&self) -> &[Barber] {
        &self.barbers
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn barber(&self, id: &str) -> Option<&Barber> {
        self.barbers.iter().find(|barber| barber.id == id)
    }

    pub fn service(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }

    pub fn default_barber(&self) -> Option<&Barber> {
        self.barbers.first()
    }

    pub fn default_service(&self) -> Option<&Service> {
        self.services.first()
    }

    /// Services that are unrestricted or restricted to `barber_id`, in catalog order
    pub fn eligible_services(&self, barber_id: &str) -> Vec<&Service> {
        self.services
            .iter()
            .filter(|service| service.is_available_for(barber_id))
            .collect()
    }
}
