use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const WHATSAPP_BASE: &str = "https://wa.me/";

// Characters left as-is by a browser's encodeURIComponent
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a value for use inside a URL query component
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Keep only the ASCII digits of a phone-like handle
pub fn digits_only(handle: &str) -> String {
    handle.chars().filter(char::is_ascii_digit).collect()
}

/// Plain chat link for a contact handle
pub fn contact_link(handle: &str) -> String {
    format!("{}{}", WHATSAPP_BASE, digits_only(handle))
}

/// Everything the confirmation message carries
#[derive(Debug, Clone, Copy)]
pub struct BookingMessage<'a> {
    pub customer_name: &'a str,
    pub service_label: &'a str,
    pub date: NaiveDate,
    pub time: &'a str,
    pub customer_contact: &'a str,
}

impl BookingMessage<'_> {
    /// The `text` query value. Field values are percent-encoded, line breaks are
    /// the literal `%0A`, and the template words themselves are left as they are
    /// so the barbers' existing chat parsing keeps working.
    pub fn encoded_text(&self) -> String {
        format!(
            "Agendamento confirmado:%0ACliente: {}%0AProcedimento: {}%0AData: {} às {}%0ATelefone: {}",
            encode_component(self.customer_name),
            encode_component(self.service_label),
            encode_component(&self.date.format("%Y-%m-%d").to_string()),
            encode_component(self.time),
            encode_component(self.customer_contact),
        )
    }
}

/// Deep link opening a chat with `handle` pre-filled with `message`
pub fn deep_link(handle: &str, message: &BookingMessage<'_>) -> String {
    format!("{}?text={}", contact_link(handle), message.encoded_text())
}
