use crate::configuration::Configuration;
use chrono::Duration;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(about = "Slot-contention and booking-eligibility engine")]
pub struct ConfigurationHandler {
    #[arg(long, default_value = "3000")]
    port: String,

    /// PostgreSQL connection URL. Without it bookings are kept in memory.
    #[arg(long)]
    database_url: Option<String>,

    #[arg(long, default_value_t = 3)]
    rejection_cooldown_hours: i64,

    #[arg(long, default_value_t = 30)]
    slot_interval_minutes: u32,

    #[arg(long, default_value_t = 2)]
    buffer_slot_count: u32,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        dotenvy::dotenv().ok();
        let mut configuration = Self::parse();
        if configuration.database_url.is_none() {
            configuration.database_url = std::env::var("DATABASE_URL").ok();
        }
        configuration
    }
}

impl Configuration for ConfigurationHandler {
    fn port(&self) -> String {
        self.port.clone()
    }

    fn database_url(&self) -> Option<String> {
        self.database_url.clone()
    }

    fn rejection_cooldown(&self) -> Duration {
        Duration::hours(self.rejection_cooldown_hours)
    }

    fn slot_interval_minutes(&self) -> u32 {
        self.slot_interval_minutes
    }

    fn buffer_slot_count(&self) -> u32 {
        self.buffer_slot_count
    }
}
