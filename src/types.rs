use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Staff decision state of a booking request. The legacy data kept "pending"
/// as a NULL response column; here it is an explicit variant so matches are
/// exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffResponse {
    Pending,
    Confirmed,
    Rejected,
}

/// One booking request as stored by the external repository. Read-only for
/// this engine; the submission and admin flows own all mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: Uuid,
    pub client_email: String,
    pub requested_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub response: StaffResponse,
    pub appointment_time: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DataIntegrityError {
    #[error("booking {id} is confirmed but has no appointment time")]
    MissingAppointmentTime { id: Uuid },

    #[error("booking {id} has a staff response but no response timestamp")]
    MissingResponseTimestamp { id: Uuid },

    #[error("booking {id} is pending but carries a response timestamp")]
    PendingWithResponseTimestamp { id: Uuid },
}

impl BookingRecord {
    /// Checks the response/timestamp pairing invariants. Violations come from
    /// the external repository, never from this engine.
    pub fn check_integrity(&self) -> Result<(), DataIntegrityError> {
        match self.response {
            StaffResponse::Pending => {
                if self.responded_at.is_some() {
                    return Err(DataIntegrityError::PendingWithResponseTimestamp { id: self.id });
                }
            }
            StaffResponse::Confirmed => {
                if self.responded_at.is_none() {
                    return Err(DataIntegrityError::MissingResponseTimestamp { id: self.id });
                }
                if self.appointment_time.is_none() {
                    return Err(DataIntegrityError::MissingAppointmentTime { id: self.id });
                }
            }
            StaffResponse::Rejected => {
                if self.responded_at.is_none() {
                    return Err(DataIntegrityError::MissingResponseTimestamp { id: self.id });
                }
            }
        }
        Ok(())
    }
}

/// Outcome of the eligibility check. Blocked states are ordinary decisions,
/// not errors; the caller renders them as messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EligibilityDecision {
    Allowed,
    BlockedNoUser,
    BlockedAwaitingResponse,
    BlockedCooldown {
        remaining: chrono::Duration,
    },
    BlockedActiveAppointment {
        appointment_time: DateTime<Utc>,
    },
}
