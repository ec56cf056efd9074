use crate::types::BookingRecord;
use chrono::NaiveDate;

/// Read interface of the external booking repository. Reads are assumed
/// eventually consistent; the engine neither retries nor caches.
pub trait BookingBackend: Clone + Send + Sync + 'static {
    /// The client's most recent request by `requested_at`. Older records are
    /// superseded and never considered.
    fn latest_booking_for_client(&self, email: &str) -> Option<BookingRecord>;

    /// Confirmed bookings whose appointment time falls on the UTC date.
    fn confirmed_bookings_on_date(&self, date: NaiveDate) -> Vec<BookingRecord>;
}
