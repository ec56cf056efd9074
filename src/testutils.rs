use crate::backend::BookingBackend;
use crate::configuration::Configuration;
use crate::types::BookingRecord;
use chrono::{Duration, NaiveDate};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};

pub struct MockBookingBackendInner {
    pub calls_to_latest_booking_for_client: AtomicU64,
    pub calls_to_confirmed_bookings_on_date: AtomicU64,
    pub latest_booking: Mutex<Option<BookingRecord>>,
    pub confirmed_bookings: Mutex<Vec<BookingRecord>>,
}

#[derive(Clone)]
pub struct MockBookingBackend(pub Arc<MockBookingBackendInner>);

impl MockBookingBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingBackendInner {
            calls_to_latest_booking_for_client: AtomicU64::default(),
            calls_to_confirmed_bookings_on_date: AtomicU64::default(),
            latest_booking: Mutex::default(),
            confirmed_bookings: Mutex::default(),
        }))
    }
}

impl BookingBackend for MockBookingBackend {
    fn latest_booking_for_client(&self, _email: &str) -> Option<BookingRecord> {
        self.0
            .calls_to_latest_booking_for_client
            .fetch_add(1, Ordering::SeqCst);
        self.0.latest_booking.lock().unwrap().clone()
    }

    fn confirmed_bookings_on_date(&self, _date: NaiveDate) -> Vec<BookingRecord> {
        self.0
            .calls_to_confirmed_bookings_on_date
            .fetch_add(1, Ordering::SeqCst);
        self.0.confirmed_bookings.lock().unwrap().clone()
    }
}

#[derive(Clone)]
pub struct TestConfiguration {
    pub rejection_cooldown: Duration,
    pub slot_interval_minutes: u32,
    pub buffer_slot_count: u32,
}

impl Default for TestConfiguration {
    fn default() -> Self {
        Self {
            rejection_cooldown: Duration::hours(3),
            slot_interval_minutes: 30,
            buffer_slot_count: 2,
        }
    }
}

impl Configuration for TestConfiguration {
    fn port(&self) -> String {
        "0".into()
    }

    fn database_url(&self) -> Option<String> {
        None
    }

    fn rejection_cooldown(&self) -> Duration {
        self.rejection_cooldown
    }

    fn slot_interval_minutes(&self) -> u32 {
        self.slot_interval_minutes
    }

    fn buffer_slot_count(&self) -> u32 {
        self.buffer_slot_count
    }
}
