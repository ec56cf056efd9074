use crate::types::{BookingRecord, DataIntegrityError, EligibilityDecision, StaffResponse};
use chrono::{DateTime, Duration, Utc};

/// Decides whether a client may submit a new booking request right now, based
/// on their most recent request. Pure: the clock is injected, nothing is read
/// from the repository here, and re-evaluation on time or data changes is the
/// caller's job.
#[derive(Debug, Clone)]
pub struct BookingEligibilityService {
    rejection_cooldown: Duration,
}

impl BookingEligibilityService {
    pub fn new(rejection_cooldown: Duration) -> Self {
        Self { rejection_cooldown }
    }

    /// The decision table, first match wins:
    /// 1. no authenticated client -> BlockedNoUser
    /// 2. no prior record -> Allowed
    /// 3. pending request -> BlockedAwaitingResponse
    /// 4. rejected within the cooldown -> BlockedCooldown, afterwards Allowed
    /// 5. confirmed with a future appointment -> BlockedActiveAppointment,
    ///    afterwards Allowed
    pub fn evaluate(
        &self,
        has_identity: bool,
        latest_booking: Option<&BookingRecord>,
        now: DateTime<Utc>,
    ) -> Result<EligibilityDecision, DataIntegrityError> {
        if !has_identity {
            return Ok(EligibilityDecision::BlockedNoUser);
        }
        let Some(booking) = latest_booking else {
            return Ok(EligibilityDecision::Allowed);
        };
        booking.check_integrity()?;

        match booking.response {
            StaffResponse::Pending => Ok(EligibilityDecision::BlockedAwaitingResponse),
            StaffResponse::Rejected => {
                let responded_at = booking
                    .responded_at
                    .ok_or(DataIntegrityError::MissingResponseTimestamp { id: booking.id })?;
                let elapsed = now - responded_at;
                if elapsed < self.rejection_cooldown {
                    Ok(EligibilityDecision::BlockedCooldown {
                        remaining: self.rejection_cooldown - elapsed,
                    })
                } else {
                    Ok(EligibilityDecision::Allowed)
                }
            }
            StaffResponse::Confirmed => {
                let appointment_time = booking
                    .appointment_time
                    .ok_or(DataIntegrityError::MissingAppointmentTime { id: booking.id })?;
                if now < appointment_time {
                    Ok(EligibilityDecision::BlockedActiveAppointment { appointment_time })
                } else {
                    Ok(EligibilityDecision::Allowed)
                }
            }
        }
    }
}
