use chrono::Duration;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn port(&self) -> String;
    fn database_url(&self) -> Option<String>;
    /// Minimum waiting period after a rejection before the same client may
    /// submit a new request.
    fn rejection_cooldown(&self) -> Duration;
    fn slot_interval_minutes(&self) -> u32;
    /// Slots blocked on either side of a confirmed appointment.
    fn buffer_slot_count(&self) -> u32;
}
