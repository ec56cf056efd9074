use crate::availability::SlotAvailabilityService;
use crate::backend::BookingBackend;
use crate::configuration::Configuration;
use crate::eligibility::BookingEligibilityService;
use crate::types::EligibilityDecision;
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;
use validator::Validate;

lazy_static! {
    static ref DATE_FORMAT: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

#[derive(Debug, Clone, Deserialize, Validate)]
struct EligibilityQuery {
    /// Missing email means no authenticated client.
    #[validate(email)]
    email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
struct ExcludedSlotsQuery {
    #[validate(regex(path = *DATE_FORMAT))]
    date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EligibilityResponse {
    status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remaining_cooldown_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active_appointment_time: Option<DateTime<Utc>>,
}

impl From<EligibilityDecision> for EligibilityResponse {
    fn from(decision: EligibilityDecision) -> Self {
        let mut response = EligibilityResponse {
            status: String::new(),
            remaining_cooldown_seconds: None,
            active_appointment_time: None,
        };
        match decision {
            EligibilityDecision::Allowed => response.status = "allowed".into(),
            EligibilityDecision::BlockedNoUser => response.status = "blocked_no_user".into(),
            EligibilityDecision::BlockedAwaitingResponse => {
                response.status = "blocked_awaiting_response".into()
            }
            EligibilityDecision::BlockedCooldown { remaining } => {
                response.status = "blocked_cooldown".into();
                // Rounded up: a blocked client must never see zero seconds left.
                response.remaining_cooldown_seconds =
                    Some((remaining.num_milliseconds() + 999) / 1000);
            }
            EligibilityDecision::BlockedActiveAppointment { appointment_time } => {
                response.status = "blocked_active_appointment".into();
                response.active_appointment_time = Some(appointment_time);
            }
        }
        response
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExcludedSlotsResponse {
    date: NaiveDate,
    excluded_starts: Vec<DateTime<Utc>>,
}

pub fn create_app<T: BookingBackend>(backend: T, configuration: impl Configuration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        eligibility: BookingEligibilityService::new(configuration.rejection_cooldown()),
        availability: SlotAvailabilityService::new(
            configuration.slot_interval_minutes(),
            configuration.buffer_slot_count(),
        ),
        bookings: backend,
    };

    Router::new()
        .route("/eligibility", get(get_eligibility))
        .route("/excluded_slots", get(get_excluded_slots))
        .with_state(state)
        .layer(cors)
}

async fn get_eligibility<T: BookingBackend>(
    State(state): State<AppState<T>>,
    Query(query): Query<EligibilityQuery>,
) -> Result<Json<EligibilityResponse>, (StatusCode, String)> {
    if let Err(err) = query.validate() {
        return Err((StatusCode::BAD_REQUEST, err.to_string()));
    }

    let now = Utc::now();
    let latest_booking = query
        .email
        .as_deref()
        .and_then(|email| state.bookings.latest_booking_for_client(email));

    let decision = match state
        .eligibility
        .evaluate(query.email.is_some(), latest_booking.as_ref(), now)
    {
        Ok(decision) => decision,
        // Fail open: a broken record from the repository should trigger a
        // manual review, not lock the client out.
        Err(err) => {
            warn!(?err, "Data integrity violation, treating client as unblocked");
            EligibilityDecision::Allowed
        }
    };
    Ok(Json(EligibilityResponse::from(decision)))
}

async fn get_excluded_slots<T: BookingBackend>(
    State(state): State<AppState<T>>,
    Query(query): Query<ExcludedSlotsQuery>,
) -> Result<Json<ExcludedSlotsResponse>, (StatusCode, String)> {
    if let Err(err) = query.validate() {
        return Err((StatusCode::BAD_REQUEST, err.to_string()));
    }
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|err| (StatusCode::BAD_REQUEST, format!("Invalid date: {err}")))?;

    let confirmed = state.bookings.confirmed_bookings_on_date(date);
    let excluded = state.availability.excluded_slots(&confirmed, date);

    Ok(Json(ExcludedSlotsResponse {
        date,
        excluded_starts: excluded.iter().collect(),
    }))
}
