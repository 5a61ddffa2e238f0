use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{alert_message, AlertSink};

/// Arranges for a blind alert to be written to a sink once its delay has passed
pub trait BlindAlerter: Send + Sync {
    /// Must return without waiting for the alert to fire
    fn schedule_alert_at(
        &self,
        delay: Duration,
        amount: u32,
        sink: Arc<dyn AlertSink>,
    ) -> AlertHandle;
}

/// One scheduled alert. Dropping the handle cancels the alert if it has not fired.
#[derive(Debug, Default)]
pub struct AlertHandle(Option<JoinHandle<()>>);

impl AlertHandle {
    /// Handle for an alert with nothing to cancel
    pub fn detached() -> Self {
        Self(None)
    }

    pub fn is_pending(&self) -> bool {
        self.0.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Returns true if the alert was still waiting to fire
    pub fn cancel(&mut self) -> bool {
        match self.0.take() {
            Some(task) => {
                let pending = !task.is_finished();
                task.abort();
                pending
            }
            None => false,
        }
    }
}

impl From<JoinHandle<()>> for AlertHandle {
    fn from(task: JoinHandle<()>) -> Self {
        Self(Some(task))
    }
}

impl Drop for AlertHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Every alert scheduled for one game
///
/// Owned by whoever started the game (a websocket connection, the terminal).
/// Dropping the session cancels the alerts still pending, so games never
/// cancel each other and a closed connection leaves no timers behind.
#[derive(Debug, Default)]
pub struct BlindSession {
    alerts: Vec<AlertHandle>,
}

impl BlindSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, alert: AlertHandle) {
        self.alerts.push(alert);
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Alerts scheduled but not yet fired or cancelled
    pub fn pending_count(&self) -> usize {
        self.alerts.iter().filter(|alert| alert.is_pending()).count()
    }

    /// Cancels the alerts that have not fired, returning how many there were
    pub fn cancel(&mut self) -> usize {
        let cancelled = self
            .alerts
            .iter_mut()
            .map(AlertHandle::cancel)
            .filter(|pending| *pending)
            .count();

        if cancelled > 0 {
            debug!(cancelled, "Cancelled pending blind alerts");
        }
        cancelled
    }
}

impl FromIterator<AlertHandle> for BlindSession {
    fn from_iter<I: IntoIterator<Item = AlertHandle>>(iter: I) -> Self {
        Self {
            alerts: iter.into_iter().collect(),
        }
    }
}

/// Runs each alert as its own tokio timer task. Must be used from within a tokio runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioBlindAlerter;

impl TokioBlindAlerter {
    pub fn new() -> Self {
        Self
    }
}

impl BlindAlerter for TokioBlindAlerter {
    fn schedule_alert_at(
        &self,
        delay: Duration,
        amount: u32,
        sink: Arc<dyn AlertSink>,
    ) -> AlertHandle {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            match sink.send_alert(alert_message(amount)).await {
                Ok(()) => debug!(amount, "Blind alert delivered"),
                Err(e) => warn!(amount, error = %e, "Failed to deliver blind alert"),
            }
        })
        .into()
    }
}
