//! Time-window arithmetic shared by the eligibility and availability checks.
//! All bucketing happens in UTC; the stored appointment times and the
//! candidate slots must use the same convention or exclusions shift by a day.

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// True if `datetime` falls on the given UTC calendar date.
pub fn falls_on(datetime: DateTime<Utc>, date: NaiveDate) -> bool {
    datetime.date_naive() == date
}

/// Start-times covered by the buffer around a confirmed appointment:
/// `center + i * interval` for every slot offset `i` in
/// `[-buffer_slot_count, +buffer_slot_count]`, the center included.
pub fn buffer_window(
    center: DateTime<Utc>,
    slot_interval: Duration,
    buffer_slot_count: u32,
) -> impl Iterator<Item = DateTime<Utc>> {
    // Saturate rather than wrap for counts beyond i32 offsets.
    let buffer = i32::try_from(buffer_slot_count).unwrap_or(i32::MAX);
    (-buffer..=buffer).map(move |i| center + slot_interval * i)
}
