pub mod booking_form;
pub mod time_slots;
pub mod whatsapp;
