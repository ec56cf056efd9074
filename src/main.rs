use crate::availability::SlotAvailabilityService;
use crate::backend::BookingBackend;
use crate::configuration::Configuration;
use crate::configuration_handler::ConfigurationHandler;
use crate::database_interface::DatabaseInterface;
use crate::eligibility::BookingEligibilityService;
use crate::http::create_app;
use crate::local_bookings::LocalBookings;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod availability;
mod backend;
mod configuration;
mod configuration_handler;
mod database_interface;
mod eligibility;
mod http;
mod local_bookings;
mod schema;
#[cfg(test)]
mod testutils;
mod time_window;
mod types;

#[derive(Clone)]
pub struct AppState<T: BookingBackend> {
    pub bookings: T,
    pub eligibility: BookingEligibilityService,
    pub availability: SlotAvailabilityService,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let configuration = ConfigurationHandler::parse_arguments();

    let address = format!("0.0.0.0:{}", configuration.port());
    info!("Booking engine accessible at {address}");
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();

    let app = if let Some(database_url) = configuration.database_url() {
        let backend = loop {
            match DatabaseInterface::new(&database_url) {
                Ok(backend) => {
                    info!("Successfully connected to database");
                    break backend;
                }
                Err(err) => {
                    error!(?err, "Failed to establish database connection: {database_url}. Retry in 1 sec. You may want to restart without a database (impersistent bookings).");
                    sleep(Duration::from_secs(1)).await;
                }
            }
        };
        create_app(backend, configuration)
    } else {
        let backend = LocalBookings::default();
        backend.insert_example_bookings();
        create_app(backend, configuration)
    };

    axum::serve(listener, app).await.unwrap();
}
