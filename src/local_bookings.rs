use crate::backend::BookingBackend;
use crate::time_window;
use crate::types::{BookingRecord, StaffResponse};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tracing::error;
use uuid::Uuid;

/// In-memory booking store. Lets the engine run without a database and backs
/// most of the tests; the write path below is what the external submission
/// and admin flows would call.
#[derive(Debug, Clone, Default)]
pub struct LocalBookings {
    bookings: Arc<Mutex<HashMap<Uuid, BookingRecord>>>,
}

impl LocalBookings {
    /// Seeds one booking per lifecycle state so the engine has something to
    /// decide on when run without a database.
    pub fn insert_example_bookings(&self) {
        let now = Utc::now();

        self.add_request("pending.client@example.com", now - Duration::hours(2));

        let rejected = self.add_request("rejected.client@example.com", now - Duration::days(1));
        if let Err(err) =
            self.record_response(rejected, StaffResponse::Rejected, now - Duration::hours(1), None)
        {
            error!(%err, "Failed to seed example booking");
        }

        let confirmed = self.add_request("confirmed.client@example.com", now - Duration::days(2));
        if let Err(err) = self.record_response(
            confirmed,
            StaffResponse::Confirmed,
            now - Duration::days(1),
            Some(now + Duration::days(1)),
        ) {
            error!(%err, "Failed to seed example booking");
        }
    }

    pub fn add_request(&self, client_email: &str, requested_at: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        self.bookings.lock().unwrap().insert(
            id,
            BookingRecord {
                id,
                client_email: client_email.into(),
                requested_at,
                responded_at: None,
                response: StaffResponse::Pending,
                appointment_time: None,
            },
        );
        id
    }

    pub fn record_response(
        &self,
        id: Uuid,
        response: StaffResponse,
        responded_at: DateTime<Utc>,
        appointment_time: Option<DateTime<Utc>>,
    ) -> Result<(), String> {
        if response == StaffResponse::Pending {
            let err = "A response can only confirm or reject a request";
            error!(err);
            return Err(err.into());
        }
        if response == StaffResponse::Confirmed && appointment_time.is_none() {
            let err = "A confirmation requires an appointment time";
            error!(err);
            return Err(err.into());
        }

        let mut bookings = self.bookings.lock().unwrap();
        match bookings.get_mut(&id) {
            Some(booking) => {
                booking.response = response;
                booking.responded_at = Some(responded_at);
                booking.appointment_time = appointment_time;
                Ok(())
            }
            None => {
                let err = "Booking does not exist and can therefore not be responded to";
                error!(err);
                Err(err.into())
            }
        }
    }
}

impl BookingBackend for LocalBookings {
    fn latest_booking_for_client(&self, email: &str) -> Option<BookingRecord> {
        self.bookings
            .lock()
            .unwrap()
            .values()
            .filter(|booking| booking.client_email == email)
            .max_by_key(|booking| booking.requested_at)
            .cloned()
    }

    fn confirmed_bookings_on_date(&self, date: NaiveDate) -> Vec<BookingRecord> {
        let mut confirmed: Vec<BookingRecord> = self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|booking| {
                booking.response == StaffResponse::Confirmed
                    && booking
                        .appointment_time
                        .is_some_and(|appointment| time_window::falls_on(appointment, date))
            })
            .cloned()
            .collect();
        confirmed.sort_unstable_by_key(|booking| booking.appointment_time);
        confirmed
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn latest_booking_wins_over_superseded_ones() {
        let local_bookings = LocalBookings::default();
        let email = "client@example.com";

        let first = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        local_bookings.add_request(email, first);
        let second = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        let latest_id = local_bookings.add_request(email, second);
        local_bookings.add_request("someone.else@example.com", second + Duration::days(30));

        let latest = local_bookings.latest_booking_for_client(email).unwrap();
        assert_eq!(latest.id, latest_id);
        assert_eq!(latest.requested_at, second);
        assert_eq!(latest.response, StaffResponse::Pending);

        assert!(local_bookings
            .latest_booking_for_client("unknown@example.com")
            .is_none());
    }

    #[test]
    fn respond_to_request_updates_the_record() {
        let local_bookings = LocalBookings::default();
        let requested_at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let id = local_bookings.add_request("client@example.com", requested_at);

        let responded_at = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        let appointment = Utc.with_ymd_and_hms(2024, 1, 10, 14, 0, 0).unwrap();
        local_bookings
            .record_response(id, StaffResponse::Confirmed, responded_at, Some(appointment))
            .unwrap();

        let latest = local_bookings
            .latest_booking_for_client("client@example.com")
            .unwrap();
        assert_eq!(latest.response, StaffResponse::Confirmed);
        assert_eq!(latest.responded_at, Some(responded_at));
        assert_eq!(latest.appointment_time, Some(appointment));
        latest.check_integrity().unwrap();
    }

    #[test]
    fn invalid_responses_are_refused() {
        let local_bookings = LocalBookings::default();
        let requested_at = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let id = local_bookings.add_request("client@example.com", requested_at);
        let responded_at = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();

        local_bookings
            .record_response(id, StaffResponse::Pending, responded_at, None)
            .unwrap_err();
        local_bookings
            .record_response(id, StaffResponse::Confirmed, responded_at, None)
            .unwrap_err();
        local_bookings
            .record_response(Uuid::new_v4(), StaffResponse::Rejected, responded_at, None)
            .unwrap_err();

        // The pending record is untouched after the refused writes.
        let latest = local_bookings
            .latest_booking_for_client("client@example.com")
            .unwrap();
        assert_eq!(latest.response, StaffResponse::Pending);
        assert_eq!(latest.responded_at, None);
    }

    #[test]
    fn confirmed_bookings_are_bucketed_by_utc_date() {
        let local_bookings = LocalBookings::default();
        let responded_at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

        let on_date_late = Utc.with_ymd_and_hms(2024, 3, 10, 23, 30, 0).unwrap();
        let on_date_early = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let next_day = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap();

        for (email, appointment) in [
            ("a@example.com", on_date_late),
            ("b@example.com", on_date_early),
            ("c@example.com", next_day),
        ] {
            let id = local_bookings.add_request(email, responded_at - Duration::days(1));
            local_bookings
                .record_response(id, StaffResponse::Confirmed, responded_at, Some(appointment))
                .unwrap();
        }
        let rejected_id =
            local_bookings.add_request("d@example.com", responded_at - Duration::days(1));
        local_bookings
            .record_response(rejected_id, StaffResponse::Rejected, responded_at, None)
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let confirmed = local_bookings.confirmed_bookings_on_date(date);
        assert_eq!(confirmed.len(), 2);
        assert_eq!(confirmed[0].appointment_time, Some(on_date_early));
        assert_eq!(confirmed[1].appointment_time, Some(on_date_late));
    }
}
