use chrono::NaiveDate;
use serde::Deserialize;

// Query parameters for the eligible services endpoint
#[derive(Debug, Deserialize)]
pub struct ServicesParams {
    pub barber: Option<String>,
}

// Query parameters for the slots endpoint
#[derive(Debug, Deserialize)]
pub struct SlotsParams {
    pub barber: String,
    pub date: NaiveDate,
}

// Fields of the HTML booking form. Everything is optional and kept as text so a
// half-filled form can always be re-rendered.
#[derive(Debug, Default, Deserialize)]
pub struct BookingFormParams {
    #[serde(default)]
    pub barber: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}
