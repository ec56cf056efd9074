use crate::time_window;
use crate::types::{BookingRecord, StaffResponse};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::BTreeSet;
use tracing::warn;

/// Start-times that must not be offered for a given date because they fall
/// inside the buffer window of a confirmed appointment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExcludedSlots(BTreeSet<DateTime<Utc>>);

impl ExcludedSlots {
    pub fn is_excluded(&self, candidate: DateTime<Utc>) -> bool {
        self.0.contains(&candidate)
    }

    pub fn iter(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Computes the excluded start-times around confirmed appointments so staff
/// never end up double-booked or in back-to-back consultations. Pure; the
/// requesting client's own history is BookingEligibilityService's concern.
#[derive(Debug, Clone)]
pub struct SlotAvailabilityService {
    slot_interval: Duration,
    buffer_slot_count: u32,
}

impl SlotAvailabilityService {
    pub fn new(slot_interval_minutes: u32, buffer_slot_count: u32) -> Self {
        Self {
            slot_interval: Duration::minutes(slot_interval_minutes as i64),
            buffer_slot_count,
        }
    }

    /// Unions the buffer windows of every confirmed appointment on `date`.
    /// Confirmed records without an appointment time are repository damage;
    /// they are skipped with a warning so one bad row cannot block slot
    /// selection for everyone else.
    pub fn excluded_slots(&self, bookings: &[BookingRecord], date: NaiveDate) -> ExcludedSlots {
        let mut excluded = BTreeSet::new();
        for booking in bookings {
            if booking.response != StaffResponse::Confirmed {
                continue;
            }
            let Some(appointment_time) = booking.appointment_time else {
                warn!(
                    id = %booking.id,
                    "confirmed booking without appointment time, skipping"
                );
                continue;
            };
            if !time_window::falls_on(appointment_time, date) {
                continue;
            }
            excluded.extend(time_window::buffer_window(
                appointment_time,
                self.slot_interval,
                self.buffer_slot_count,
            ));
        }
        ExcludedSlots(excluded)
    }
}
