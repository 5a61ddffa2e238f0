// Public API - what other modules can use
pub use alerter::{AlertHandle, BlindAlerter, BlindSession, TokioBlindAlerter};
pub use schedule::{
    alert_message, blind_increment, blind_schedule, ScheduledAlert, BLIND_AMOUNTS,
    DEFAULT_BLIND_UNIT,
};
pub use sink::{AlertError, AlertSink, WriterSink};

// Internal modules
mod alerter;
mod schedule;
mod sink;
