use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use tracing::debug;

use crate::models::catalog::{Barber, OpenSegment, CLOSED_WEEKDAY};

/// Every service takes the same amount of time, whatever its label says
pub const SLOT_MINUTES: u32 = 40;

// Weekday index of a date, 0 = Sunday through 6 = Saturday
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

// Minutes elapsed since midnight
pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

// Zero-padded 24-hour HH:MM
pub fn format_time_of_day(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

// Parse a zero-padded HH:MM string
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// End time of a slot starting at `slot`, or `None` if `slot` is not a time
pub fn slot_end(slot: &str) -> Option<String> {
    parse_time_of_day(slot).map(|start| format_time_of_day(minutes_of_day(start) + SLOT_MINUTES))
}

// Tile one open segment with fixed-length slots. Inverted or too-short
// segments yield nothing.
fn slots_in_segment(segment: &OpenSegment) -> impl Iterator<Item = String> {
    let start = minutes_of_day(segment.start);
    let end = minutes_of_day(segment.end);

    (start..)
        .step_by(SLOT_MINUTES as usize)
        .take_while(move |cur| cur + SLOT_MINUTES <= end)
        .map(format_time_of_day)
}

/// Bookable start times for `barber` on `date`, in schedule order.
///
/// Returns an empty list on the shop's closed weekday, on days the barber has
/// no schedule entry for, and on walk-in days (entries with no segments).
/// Segments are tiled independently and concatenated in the order they are
/// listed; a slot is offered only when all of it fits before the segment end.
pub fn generate_slots(barber: &Barber, date: NaiveDate) -> Vec<String> {
    let day = weekday_index(date);
    if day == CLOSED_WEEKDAY {
        debug!("{} falls on the closed weekday, no slots", date);
        return Vec::new();
    }

    let entry = match barber.entry_for(day) {
        Some(entry) if !entry.segments.is_empty() => entry,
        _ => {
            debug!(
                "Barber {} has no bookable segments on weekday {}",
                barber.id, day
            );
            return Vec::new();
        }
    };

    let slots: Vec<String> = entry.segments.iter().flat_map(slots_in_segment).collect();

    debug!(
        "Generated {} slots for barber {} on {}",
        slots.len(),
        barber.id,
        date
    );

    slots
}
